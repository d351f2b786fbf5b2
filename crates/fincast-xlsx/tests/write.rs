//! End-to-end write tests: serialize a workbook, then reopen the package
//! and check the parts that came out.

use std::io::Read;

use fincast_chart::{Chart, ChartType, DataReference, DataSeries};
use fincast_core::{
    CellRange, CfOperator, CfRule, Color, ConditionalFormatRule, DataValidation, Style, Workbook,
};
use fincast_xlsx::XlsxWriter;
use quick_xml::events::Event;
use quick_xml::Reader;

fn sample_workbook() -> Workbook {
    let mut wb = Workbook::new();
    wb.add_sheet("Revenue_Forecast").unwrap();
    wb.add_sheet("Summary").unwrap();

    let sheet = wb.sheet_mut("Revenue_Forecast").unwrap();
    sheet.set_value("A1", "REVENUE FORECAST").unwrap();
    sheet.set_style("A1", &Style::new().bold(true).font_size(14)).unwrap();
    sheet.set_value("B5", 1_000_000.0).unwrap();
    sheet.set_value("B6", 750_000.0).unwrap();
    sheet.set_value("B7", 500_000.0).unwrap();
    sheet.set_formula("B9", "=SUM(B5:B7)").unwrap();
    sheet
        .set_style(
            "B9",
            &Style::new()
                .bold(true)
                .fill(Color::from_hex(0xE2EFDA))
                .number_format("#,##0"),
        )
        .unwrap();
    sheet.set_column_width(0, 20.0);

    let summary = wb.sheet_mut("Summary").unwrap();
    summary.set_formula("B5", "=Revenue_Forecast!B9").unwrap();
    summary.add_conditional_format(ConditionalFormatRule::new(
        CellRange::parse("B5:B5").unwrap(),
        CfRule::CellIs {
            operator: CfOperator::NotEqual,
            formula: "0".to_string(),
            format: Style::new().font_color(Color::from_hex(0xFF0000)),
        },
    ));
    let mut validation = DataValidation::decimal_greater_than("0")
        .with_error("Invalid Input", "Value must be greater than 0");
    validation.add_range(CellRange::parse("B5").unwrap());
    summary.add_data_validation(validation);

    let mut chart = Chart::new(ChartType::Column).with_title("Revenue");
    chart.add_series(DataSeries::new(DataReference::numbers(
        "Revenue_Forecast!$B$5:$B$7",
    )));
    summary.add_chart_at(chart, "A10").unwrap();

    wb
}

fn write_to_archive(wb: &Workbook) -> zip::ZipArchive<std::io::Cursor<Vec<u8>>> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    XlsxWriter::write(wb, &mut cursor).unwrap();
    zip::ZipArchive::new(cursor).unwrap()
}

fn part(archive: &mut zip::ZipArchive<std::io::Cursor<Vec<u8>>>, name: &str) -> String {
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("missing part {name}"))
        .read_to_string(&mut content)
        .unwrap();
    content
}

#[test]
fn package_contains_expected_parts() {
    let mut archive = write_to_archive(&sample_workbook());
    for name in [
        "[Content_Types].xml",
        "_rels/.rels",
        "docProps/core.xml",
        "docProps/app.xml",
        "xl/workbook.xml",
        "xl/_rels/workbook.xml.rels",
        "xl/styles.xml",
        "xl/worksheets/sheet1.xml",
        "xl/worksheets/sheet2.xml",
        "xl/worksheets/_rels/sheet2.xml.rels",
        "xl/drawings/drawing1.xml",
        "xl/drawings/_rels/drawing1.xml.rels",
        "xl/charts/chart1.xml",
    ] {
        assert!(archive.by_name(name).is_ok(), "missing part {name}");
    }
}

#[test]
fn formulas_are_stored_without_the_equals_sign() {
    let mut archive = write_to_archive(&sample_workbook());
    let sheet1 = part(&mut archive, "xl/worksheets/sheet1.xml");
    assert!(sheet1.contains("<f>SUM(B5:B7)</f>"));
    assert!(!sheet1.contains("<f>=SUM"));

    let sheet2 = part(&mut archive, "xl/worksheets/sheet2.xml");
    assert!(sheet2.contains("<f>Revenue_Forecast!B9</f>"));
}

#[test]
fn sheet_xml_is_well_formed_with_expected_cells() {
    let mut archive = write_to_archive(&sample_workbook());
    let sheet1 = part(&mut archive, "xl/worksheets/sheet1.xml");

    let mut reader = Reader::from_str(&sheet1);
    let mut buf = Vec::new();
    let mut cell_count = 0;
    loop {
        match reader.read_event_into(&mut buf).expect("well-formed XML") {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"c" => cell_count += 1,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    // A1 title, B5:B7 literals, B9 formula
    assert_eq!(cell_count, 5);
}

#[test]
fn workbook_xml_lists_sheets_in_tab_order() {
    let mut archive = write_to_archive(&sample_workbook());
    let workbook = part(&mut archive, "xl/workbook.xml");
    let forecast = workbook.find("name=\"Revenue_Forecast\"").unwrap();
    let summary = workbook.find("name=\"Summary\"").unwrap();
    assert!(forecast < summary);
}

#[test]
fn conditional_formats_and_validations_are_written() {
    let mut archive = write_to_archive(&sample_workbook());
    let sheet2 = part(&mut archive, "xl/worksheets/sheet2.xml");
    assert!(sheet2.contains("cfRule type=\"cellIs\" operator=\"notEqual\""));
    assert!(sheet2.contains("dxfId=\"0\""));
    assert!(sheet2.contains("dataValidation type=\"decimal\" operator=\"greaterThan\""));
    assert!(sheet2.contains("<formula1>0</formula1>"));
    assert!(sheet2.contains("<drawing r:id=\"rId1\"/>"));

    let styles = part(&mut archive, "xl/styles.xml");
    assert!(styles.contains("<dxfs count=\"1\">"));
    assert!(styles.contains("FFFF0000"));
}

#[test]
fn chart_part_references_its_data() {
    let mut archive = write_to_archive(&sample_workbook());
    let chart = part(&mut archive, "xl/charts/chart1.xml");
    assert!(chart.contains("<c:barChart>"));
    assert!(chart.contains("Revenue_Forecast!$B$5:$B$7"));
}

#[test]
fn write_file_creates_a_readable_package() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.xlsx");
    XlsxWriter::write_file(&sample_workbook(), &path).unwrap();

    let file = std::fs::File::open(&path).unwrap();
    let archive = zip::ZipArchive::new(file).unwrap();
    assert!(archive.len() > 10);
}

#[test]
fn empty_workbook_is_rejected() {
    let wb = Workbook::new();
    let mut cursor = std::io::Cursor::new(Vec::new());
    assert!(XlsxWriter::write(&wb, &mut cursor).is_err());
}
