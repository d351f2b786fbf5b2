//! XLSX styles (styles.xml) write helpers

use std::collections::HashMap;

use fincast_core::style::{BorderLineStyle, Color, FontStyle, NumberFormat, Style};
use fincast_core::{CfRule, Workbook};

/// Workbook-wide style table
///
/// Worksheets deduplicate styles locally; this table merges them into the
/// single global cellXfs list styles.xml wants, and remembers the local →
/// global index mapping per sheet. Differential formats (dxf) used by
/// conditional formatting get their own table.
#[derive(Debug)]
pub(crate) struct StyleTable {
    /// Global, deduplicated styles. Index corresponds to the cellXfs index.
    styles: Vec<Style>,
    /// Per-worksheet mapping: local style index -> global xf id.
    sheet_maps: Vec<HashMap<u32, u32>>,
    /// DXF styles for conditional formatting.
    dxf_styles: Vec<Style>,
    /// Mapping from (sheet_index, cf_rule_index) to dxf id.
    dxf_map: HashMap<(usize, usize), u32>,
}

impl StyleTable {
    pub(crate) fn build(workbook: &Workbook) -> Self {
        let mut styles: Vec<Style> = Vec::new();
        let mut style_to_xf: HashMap<Style, u32> = HashMap::new();

        // Index 0 is always the default style
        let default = Style::default();
        styles.push(default.clone());
        style_to_xf.insert(default, 0);

        let mut sheet_maps: Vec<HashMap<u32, u32>> = Vec::with_capacity(workbook.sheet_count());
        let mut dxf_styles: Vec<Style> = Vec::new();
        let mut dxf_map: HashMap<(usize, usize), u32> = HashMap::new();
        let mut dxf_to_id: HashMap<Style, u32> = HashMap::new();

        for (sheet_idx, sheet) in workbook.sheets().enumerate() {
            let mut map: HashMap<u32, u32> = HashMap::new();
            map.insert(0, 0);

            for (_row, _col, cell) in sheet.iter_cells() {
                let local_idx = cell.style_index;
                if local_idx == 0 || map.contains_key(&local_idx) {
                    continue;
                }
                let style = sheet
                    .style_by_index(local_idx)
                    .cloned()
                    .unwrap_or_default();
                let xf_id = match style_to_xf.get(&style) {
                    Some(&id) => id,
                    None => {
                        let id = styles.len() as u32;
                        styles.push(style.clone());
                        style_to_xf.insert(style, id);
                        id
                    }
                };
                map.insert(local_idx, xf_id);
            }
            sheet_maps.push(map);

            for (rule_idx, rule) in sheet.conditional_formats().iter().enumerate() {
                if let CfRule::CellIs { format, .. } = &rule.rule {
                    let dxf_id = match dxf_to_id.get(format) {
                        Some(&id) => id,
                        None => {
                            let id = dxf_styles.len() as u32;
                            dxf_styles.push(format.clone());
                            dxf_to_id.insert(format.clone(), id);
                            id
                        }
                    };
                    dxf_map.insert((sheet_idx, rule_idx), dxf_id);
                }
            }
        }

        Self {
            styles,
            sheet_maps,
            dxf_styles,
            dxf_map,
        }
    }

    pub(crate) fn xf_id_for(&self, sheet_index: usize, local_style_index: u32) -> u32 {
        self.sheet_maps
            .get(sheet_index)
            .and_then(|m| m.get(&local_style_index).copied())
            .unwrap_or(0)
    }

    pub(crate) fn dxf_id_for(&self, sheet_index: usize, rule_index: usize) -> Option<u32> {
        self.dxf_map.get(&(sheet_index, rule_index)).copied()
    }

    pub(crate) fn to_styles_xml(&self) -> String {
        // Component tables, resolved in style order so ids are deterministic
        let mut font_ids: HashMap<FontStyle, u32> = HashMap::new();
        let mut fonts: Vec<FontStyle> = Vec::new();
        let default_font = FontStyle::default();
        fonts.push(default_font.clone());
        font_ids.insert(default_font, 0);

        let mut fill_ids: HashMap<Color, u32> = HashMap::new();
        let mut fills: Vec<Option<Color>> = Vec::new();
        // The first two fills are fixed: none and gray125
        fills.push(None);
        fills.push(None);

        let mut border_ids: HashMap<BorderLineStyle, u32> = HashMap::new();
        let mut borders: Vec<Option<BorderLineStyle>> = Vec::new();
        borders.push(None);

        let mut numfmt_ids: HashMap<String, u32> = HashMap::new();
        let mut numfmts: Vec<(u32, String)> = Vec::new();
        let mut next_numfmt_id: u32 = 164;

        struct ResolvedIds {
            font_id: u32,
            fill_id: u32,
            border_id: u32,
            num_fmt_id: u32,
        }

        let mut resolved: Vec<ResolvedIds> = Vec::with_capacity(self.styles.len());
        for style in &self.styles {
            let font_id = match font_ids.get(&style.font) {
                Some(&id) => id,
                None => {
                    let id = fonts.len() as u32;
                    fonts.push(style.font.clone());
                    font_ids.insert(style.font.clone(), id);
                    id
                }
            };

            let fill_id = match style.fill {
                None => 0,
                Some(color) => match fill_ids.get(&color) {
                    Some(&id) => id,
                    None => {
                        let id = fills.len() as u32;
                        fills.push(Some(color));
                        fill_ids.insert(color, id);
                        id
                    }
                },
            };

            let border_id = match style.border {
                None => 0,
                Some(line) => match border_ids.get(&line) {
                    Some(&id) => id,
                    None => {
                        let id = borders.len() as u32;
                        borders.push(Some(line));
                        border_ids.insert(line, id);
                        id
                    }
                },
            };

            let num_fmt_id = match &style.number_format {
                NumberFormat::General => 0,
                NumberFormat::Custom(code) => match numfmt_ids.get(code) {
                    Some(&id) => id,
                    None => {
                        let id = next_numfmt_id;
                        next_numfmt_id += 1;
                        numfmt_ids.insert(code.clone(), id);
                        numfmts.push((id, code.clone()));
                        id
                    }
                },
            };

            resolved.push(ResolvedIds {
                font_id,
                fill_id,
                border_id,
                num_fmt_id,
            });
        }

        let mut xml = String::new();
        xml.push_str(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        if !numfmts.is_empty() {
            xml.push_str(&format!("\n  <numFmts count=\"{}\">", numfmts.len()));
            for (id, code) in &numfmts {
                xml.push_str(&format!(
                    "\n    <numFmt numFmtId=\"{}\" formatCode=\"{}\"/>",
                    id,
                    escape_xml(code)
                ));
            }
            xml.push_str("\n  </numFmts>");
        }

        xml.push_str(&format!("\n  <fonts count=\"{}\">", fonts.len()));
        for font in &fonts {
            xml.push_str("\n    ");
            xml.push_str(&write_font(font));
        }
        xml.push_str("\n  </fonts>");

        xml.push_str(&format!("\n  <fills count=\"{}\">", fills.len()));
        xml.push_str("\n    <fill><patternFill patternType=\"none\"/></fill>");
        xml.push_str("\n    <fill><patternFill patternType=\"gray125\"/></fill>");
        for fill in fills.iter().skip(2) {
            if let Some(color) = fill {
                xml.push_str(&format!(
                    "\n    <fill><patternFill patternType=\"solid\"><fgColor rgb=\"{}\"/><bgColor indexed=\"64\"/></patternFill></fill>",
                    color.to_argb_hex()
                ));
            }
        }
        xml.push_str("\n  </fills>");

        xml.push_str(&format!("\n  <borders count=\"{}\">", borders.len()));
        xml.push_str("\n    <border><left/><right/><top/><bottom/><diagonal/></border>");
        for border in borders.iter().skip(1) {
            if let Some(line) = border {
                let s = line.xlsx_name();
                xml.push_str(&format!(
                    "\n    <border><left style=\"{s}\"/><right style=\"{s}\"/><top style=\"{s}\"/><bottom style=\"{s}\"/><diagonal/></border>"
                ));
            }
        }
        xml.push_str("\n  </borders>");

        xml.push_str(
            r#"
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
        );

        xml.push_str(&format!("\n  <cellXfs count=\"{}\">", self.styles.len()));
        for (style, ids) in self.styles.iter().zip(&resolved) {
            let mut attrs = String::new();
            if ids.num_fmt_id != 0 {
                attrs.push_str(" applyNumberFormat=\"1\"");
            }
            if style.font != FontStyle::default() {
                attrs.push_str(" applyFont=\"1\"");
            }
            if style.fill.is_some() {
                attrs.push_str(" applyFill=\"1\"");
            }
            if style.border.is_some() {
                attrs.push_str(" applyBorder=\"1\"");
            }
            if style.wrap_text {
                attrs.push_str(" applyAlignment=\"1\"");
            }
            let body = if style.wrap_text {
                "><alignment wrapText=\"1\"/></xf>".to_string()
            } else {
                "/>".to_string()
            };
            xml.push_str(&format!(
                "\n    <xf numFmtId=\"{}\" fontId=\"{}\" fillId=\"{}\" borderId=\"{}\" xfId=\"0\"{}{}",
                ids.num_fmt_id, ids.font_id, ids.fill_id, ids.border_id, attrs, body
            ));
        }
        xml.push_str("\n  </cellXfs>");

        xml.push_str(
            r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>"#,
        );

        if self.dxf_styles.is_empty() {
            xml.push_str("\n  <dxfs count=\"0\"/>");
        } else {
            xml.push_str(&format!("\n  <dxfs count=\"{}\">", self.dxf_styles.len()));
            for style in &self.dxf_styles {
                xml.push_str("\n    <dxf>");
                if style.font != FontStyle::default() {
                    xml.push_str(&write_font(&style.font));
                }
                if let Some(color) = style.fill {
                    xml.push_str(&format!(
                        "<fill><patternFill patternType=\"solid\"><fgColor rgb=\"{}\"/><bgColor indexed=\"64\"/></patternFill></fill>",
                        color.to_argb_hex()
                    ));
                }
                xml.push_str("</dxf>");
            }
            xml.push_str("\n  </dxfs>");
        }

        xml.push_str("\n</styleSheet>");
        xml
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn write_font(font: &FontStyle) -> String {
    let mut s = String::from("<font>");
    if font.bold {
        s.push_str("<b/>");
    }
    s.push_str(&format!("<sz val=\"{}\"/>", font.size));
    if let Some(color) = font.color {
        s.push_str(&format!("<color rgb=\"{}\"/>", color.to_argb_hex()));
    }
    s.push_str(&format!("<name val=\"{}\"/>", escape_xml(&font.name)));
    s.push_str("</font>");
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use fincast_core::{Color, Style, Workbook};

    #[test]
    fn deduplicates_styles_across_sheets() {
        let mut wb = Workbook::new();
        wb.add_sheet("One").unwrap();
        wb.add_sheet("Two").unwrap();
        let bold = Style::new().bold(true);
        for name in ["One", "Two"] {
            let sheet = wb.sheet_mut(name).unwrap();
            sheet.set_value("A1", 1.0).unwrap();
            sheet.set_style("A1", &bold).unwrap();
        }

        let table = StyleTable::build(&wb);
        assert_eq!(table.xf_id_for(0, 1), table.xf_id_for(1, 1));

        let xml = table.to_styles_xml();
        assert!(xml.contains("cellXfs count=\"2\""));
        assert!(xml.contains("<b/>"));
    }

    #[test]
    fn custom_number_formats_start_at_164() {
        let mut wb = Workbook::new();
        wb.add_sheet("One").unwrap();
        let sheet = wb.sheet_mut("One").unwrap();
        sheet.set_value("A1", 0.24).unwrap();
        sheet.set_style("A1", &Style::new().number_format("0.00%")).unwrap();

        let xml = StyleTable::build(&wb).to_styles_xml();
        assert!(xml.contains("numFmtId=\"164\" formatCode=\"0.00%\""));
    }

    #[test]
    fn fills_keep_the_two_fixed_slots() {
        let mut wb = Workbook::new();
        wb.add_sheet("One").unwrap();
        let sheet = wb.sheet_mut("One").unwrap();
        sheet
            .set_style("A1", &Style::new().fill(Color::from_hex(0xE2EFDA)))
            .unwrap();

        let xml = StyleTable::build(&wb).to_styles_xml();
        assert!(xml.contains("fills count=\"3\""));
        assert!(xml.contains("fgColor rgb=\"FFE2EFDA\""));
    }
}
