//! XLSX package writer

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use fincast_core::{CellAddress, CellValue, CfRule, Workbook, Worksheet};

use crate::drawing::{chart_xml, drawing_xml};
use crate::error::{Error, Result};
use crate::styles::{escape_xml, StyleTable};

/// XLSX file writer
///
/// Serializes a read-only [`Workbook`] into an Office Open XML package.
/// Formula strings are preserved verbatim (minus the leading `=`, which the
/// file format does not store); nothing is evaluated.
pub struct XlsxWriter;

/// Bookkeeping for a sheet that carries charts
struct SheetDrawing {
    sheet_index: usize,
    /// 1-based drawing part number
    drawing_number: usize,
    /// 1-based part number of the sheet's first chart
    first_chart_number: usize,
    chart_count: usize,
}

impl XlsxWriter {
    /// Write a workbook to a file path
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> Result<()> {
        let file = File::create(path)?;
        Self::write(workbook, file)
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> Result<()> {
        if workbook.sheet_count() == 0 {
            return Err(Error::InvalidWorkbook("workbook has no sheets".into()));
        }

        let mut zip = zip::ZipWriter::new(writer);
        let style_table = StyleTable::build(workbook);
        let drawings = Self::plan_drawings(workbook);

        log::debug!(
            "writing workbook: {} sheets, {} drawings",
            workbook.sheet_count(),
            drawings.len()
        );

        Self::write_content_types(&mut zip, workbook, &drawings)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_doc_props(&mut zip)?;
        Self::write_workbook_xml(&mut zip, workbook)?;
        Self::write_workbook_rels(&mut zip, workbook)?;
        Self::write_part(&mut zip, "xl/styles.xml", &style_table.to_styles_xml())?;

        for (i, sheet) in workbook.sheets().enumerate() {
            let drawing = drawings.iter().find(|d| d.sheet_index == i);
            Self::write_worksheet(&mut zip, sheet, i, &style_table, drawing.is_some())?;

            if let Some(drawing) = drawing {
                Self::write_sheet_rels(&mut zip, i, drawing.drawing_number)?;
                Self::write_drawing(&mut zip, sheet, drawing)?;
            }
        }

        zip.finish()?;
        Ok(())
    }

    fn plan_drawings(workbook: &Workbook) -> Vec<SheetDrawing> {
        let mut drawings = Vec::new();
        let mut next_chart = 1usize;
        for (i, sheet) in workbook.sheets().enumerate() {
            let count = sheet.charts().len();
            if count > 0 {
                drawings.push(SheetDrawing {
                    sheet_index: i,
                    drawing_number: drawings.len() + 1,
                    first_chart_number: next_chart,
                    chart_count: count,
                });
                next_chart += count;
            }
        }
        drawings
    }

    fn write_part<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        name: &str,
        content: &str,
    ) -> Result<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(name, options)?;
        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
        drawings: &[SheetDrawing],
    ) -> Result<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
    <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }

        for drawing in drawings {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/drawings/drawing{}.xml" ContentType="application/vnd.openxmlformats-officedocument.drawing+xml"/>"#,
                drawing.drawing_number
            ));
            for c in 0..drawing.chart_count {
                content.push_str(&format!(
                    r#"
    <Override PartName="/xl/charts/chart{}.xml" ContentType="application/vnd.openxmlformats-officedocument.drawingml.chart+xml"/>"#,
                    drawing.first_chart_number + c
                ));
            }
        }

        content.push_str("\n</Types>");
        Self::write_part(zip, "[Content_Types].xml", &content)
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> Result<()> {
        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
    <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#;
        Self::write_part(zip, "_rels/.rels", content)
    }

    fn write_doc_props<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> Result<()> {
        let stamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        let core = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <dc:creator>fincast</dc:creator>
    <cp:lastModifiedBy>fincast</cp:lastModifiedBy>
    <dcterms:created xsi:type="dcterms:W3CDTF">{stamp}</dcterms:created>
    <dcterms:modified xsi:type="dcterms:W3CDTF">{stamp}</dcterms:modified>
</cp:coreProperties>"#
        );
        Self::write_part(zip, "docProps/core.xml", &core)?;

        let app = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">
    <Application>fincast</Application>
</Properties>"#;
        Self::write_part(zip, "docProps/app.xml", app)
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> Result<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
        );

        for (i, sheet) in workbook.sheets().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape_xml(sheet.name()),
                i + 1,
                i + 1
            ));
        }

        content.push_str(
            r#"
    </sheets>
</workbook>"#,
        );
        Self::write_part(zip, "xl/workbook.xml", &content)
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> Result<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
            workbook.sheet_count() + 1
        ));

        content.push_str("\n</Relationships>");
        Self::write_part(zip, "xl/_rels/workbook.xml.rels", &content)
    }

    fn write_worksheet<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        sheet: &Worksheet,
        index: usize,
        style_table: &StyleTable,
        has_drawing: bool,
    ) -> Result<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        );

        if !sheet.column_widths().is_empty() {
            content.push_str("\n    <cols>");
            for (&col, &width) in sheet.column_widths() {
                content.push_str(&format!(
                    "\n        <col min=\"{0}\" max=\"{0}\" width=\"{1}\" customWidth=\"1\"/>",
                    col + 1,
                    width
                ));
            }
            content.push_str("\n    </cols>");
        }

        content.push_str("\n    <sheetData>");
        let mut current_row: Option<u32> = None;
        for (row, col, cell) in sheet.iter_cells() {
            if current_row != Some(row) {
                if current_row.is_some() {
                    content.push_str("\n        </row>");
                }
                content.push_str(&format!("\n        <row r=\"{}\">", row + 1));
                current_row = Some(row);
            }

            let cell_ref = CellAddress::new(row, col).to_a1_string();
            let xf_id = style_table.xf_id_for(index, cell.style_index);
            let style_attr = if xf_id != 0 {
                format!(" s=\"{xf_id}\"")
            } else {
                String::new()
            };

            match &cell.value {
                CellValue::Number(n) => {
                    content.push_str(&format!(
                        "\n            <c r=\"{cell_ref}\"{style_attr}><v>{n}</v></c>"
                    ));
                }
                CellValue::String(s) => {
                    content.push_str(&format!(
                        "\n            <c r=\"{cell_ref}\"{style_attr} t=\"inlineStr\"><is><t>{}</t></is></c>",
                        escape_xml(s)
                    ));
                }
                CellValue::Boolean(b) => {
                    content.push_str(&format!(
                        "\n            <c r=\"{cell_ref}\"{style_attr} t=\"b\"><v>{}</v></c>",
                        if *b { 1 } else { 0 }
                    ));
                }
                CellValue::Formula(text) => {
                    let formula = text.strip_prefix('=').unwrap_or(text);
                    content.push_str(&format!(
                        "\n            <c r=\"{cell_ref}\"{style_attr}><f>{}</f></c>",
                        escape_xml(formula)
                    ));
                }
                CellValue::Empty => {
                    // Style-only cells keep their formatting
                    if xf_id != 0 {
                        content.push_str(&format!("\n            <c r=\"{cell_ref}\"{style_attr}/>"));
                    }
                }
            }
        }
        if current_row.is_some() {
            content.push_str("\n        </row>");
        }
        content.push_str("\n    </sheetData>");

        Self::append_conditional_formatting(&mut content, sheet, index, style_table);
        Self::append_data_validations(&mut content, sheet);

        if has_drawing {
            content.push_str("\n    <drawing r:id=\"rId1\"/>");
        }

        content.push_str("\n</worksheet>");
        Self::write_part(zip, &format!("xl/worksheets/sheet{}.xml", index + 1), &content)
    }

    fn append_conditional_formatting(
        content: &mut String,
        sheet: &Worksheet,
        sheet_index: usize,
        style_table: &StyleTable,
    ) {
        for (rule_idx, rule) in sheet.conditional_formats().iter().enumerate() {
            content.push_str(&format!(
                "\n    <conditionalFormatting sqref=\"{}\">",
                rule.range
            ));

            match &rule.rule {
                CfRule::CellIs {
                    operator, formula, ..
                } => {
                    let dxf_attr = style_table
                        .dxf_id_for(sheet_index, rule_idx)
                        .map(|id| format!(" dxfId=\"{id}\""))
                        .unwrap_or_default();
                    content.push_str(&format!(
                        "\n        <cfRule type=\"cellIs\" operator=\"{}\" priority=\"{}\"{}>\n            <formula>{}</formula>\n        </cfRule>",
                        operator.xlsx_operator(),
                        rule_idx + 1,
                        dxf_attr,
                        escape_xml(formula)
                    ));
                }
                CfRule::ColorScale(points) => {
                    content.push_str(&format!(
                        "\n        <cfRule type=\"colorScale\" priority=\"{}\">\n            <colorScale>",
                        rule_idx + 1
                    ));
                    for point in points {
                        let val_attr = point
                            .value
                            .map(|v| format!(" val=\"{v}\""))
                            .unwrap_or_default();
                        content.push_str(&format!(
                            "\n                <cfvo type=\"{}\"{}/>",
                            point.value_type.xlsx_type(),
                            val_attr
                        ));
                    }
                    for point in points {
                        content.push_str(&format!(
                            "\n                <color rgb=\"{}\"/>",
                            point.color.to_argb_hex()
                        ));
                    }
                    content.push_str("\n            </colorScale>\n        </cfRule>");
                }
            }

            content.push_str("\n    </conditionalFormatting>");
        }
    }

    fn append_data_validations(content: &mut String, sheet: &Worksheet) {
        let validations = sheet.data_validations();
        if validations.is_empty() {
            return;
        }

        content.push_str(&format!(
            "\n    <dataValidations count=\"{}\">",
            validations.len()
        ));

        for validation in validations {
            if validation.ranges.is_empty() {
                continue;
            }
            let sqref: String = validation
                .ranges
                .iter()
                .map(|r| r.to_string())
                .collect::<Vec<_>>()
                .join(" ");

            let error_title = validation
                .error_title
                .as_ref()
                .map(|t| format!(" errorTitle=\"{}\"", escape_xml(t)))
                .unwrap_or_default();
            let error_msg = validation
                .error_message
                .as_ref()
                .map(|m| format!(" error=\"{}\"", escape_xml(m)))
                .unwrap_or_default();

            content.push_str(&format!(
                "\n        <dataValidation type=\"decimal\" operator=\"{}\" allowBlank=\"1\" showErrorMessage=\"1\"{}{} sqref=\"{}\">",
                validation.operator.xlsx_operator(),
                error_title,
                error_msg,
                sqref
            ));
            content.push_str(&format!(
                "\n            <formula1>{}</formula1>",
                escape_xml(&validation.formula1)
            ));
            if let Some(f2) = &validation.formula2 {
                content.push_str(&format!(
                    "\n            <formula2>{}</formula2>",
                    escape_xml(f2)
                ));
            }
            content.push_str("\n        </dataValidation>");
        }

        content.push_str("\n    </dataValidations>");
    }

    fn write_sheet_rels<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        sheet_index: usize,
        drawing_number: usize,
    ) -> Result<()> {
        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/drawing" Target="../drawings/drawing{drawing_number}.xml"/>
</Relationships>"#
        );
        Self::write_part(
            zip,
            &format!("xl/worksheets/_rels/sheet{}.xml.rels", sheet_index + 1),
            &content,
        )
    }

    fn write_drawing<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        sheet: &Worksheet,
        drawing: &SheetDrawing,
    ) -> Result<()> {
        let charts = sheet.charts();
        Self::write_part(
            zip,
            &format!("xl/drawings/drawing{}.xml", drawing.drawing_number),
            &drawing_xml(charts, 1),
        )?;

        let mut rels = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for (i, _) in charts.iter().enumerate() {
            rels.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/chart" Target="../charts/chart{}.xml"/>"#,
                i + 1,
                drawing.first_chart_number + i
            ));
        }
        rels.push_str("\n</Relationships>");
        Self::write_part(
            zip,
            &format!("xl/drawings/_rels/drawing{}.xml.rels", drawing.drawing_number),
            &rels,
        )?;

        for (i, chart) in charts.iter().enumerate() {
            Self::write_part(
                zip,
                &format!("xl/charts/chart{}.xml", drawing.first_chart_number + i),
                &chart_xml(chart),
            )?;
        }
        Ok(())
    }
}
