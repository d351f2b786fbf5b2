//! DrawingML parts for embedded charts
//!
//! Each worksheet with charts gets one drawing part anchoring every chart,
//! and each chart gets its own chartSpace part referenced from the drawing.

use fincast_chart::{Chart, ChartType, DataReference, RefKind};

use crate::styles::escape_xml;

/// Build xl/drawings/drawingN.xml for a sheet's charts
///
/// `first_rid` is the relationship id of the sheet's first chart within the
/// drawing's own rels part; charts take consecutive ids.
pub(crate) fn drawing_xml(charts: &[Chart], first_rid: u32) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<xdr:wsDr xmlns:xdr="http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">"#,
    );

    for (i, chart) in charts.iter().enumerate() {
        let anchor = &chart.anchor;
        let rid = first_rid + i as u32;
        xml.push_str(&format!(
            r#"
    <xdr:twoCellAnchor>
        <xdr:from><xdr:col>{from_col}</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>{from_row}</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:from>
        <xdr:to><xdr:col>{to_col}</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>{to_row}</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:to>
        <xdr:graphicFrame macro="">
            <xdr:nvGraphicFramePr>
                <xdr:cNvPr id="{shape_id}" name="Chart {shape_id}"/>
                <xdr:cNvGraphicFramePr/>
            </xdr:nvGraphicFramePr>
            <xdr:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/></xdr:xfrm>
            <a:graphic>
                <a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart">
                    <c:chart xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" r:id="rId{rid}"/>
                </a:graphicData>
            </a:graphic>
        </xdr:graphicFrame>
        <xdr:clientData/>
    </xdr:twoCellAnchor>"#,
            from_col = anchor.col,
            from_row = anchor.row,
            to_col = anchor.col + anchor.col_span,
            to_row = anchor.row + anchor.row_span,
            shape_id = i + 2,
            rid = rid,
        ));
    }

    xml.push_str("\n</xdr:wsDr>");
    xml
}

/// Build xl/charts/chartN.xml for one chart
pub(crate) fn chart_xml(chart: &Chart) -> String {
    // Axis ids only need to be unique within the chart part
    const CAT_AX_ID: u32 = 100_000_001;
    const VAL_AX_ID: u32 = 100_000_002;

    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<c:chartSpace xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <c:chart>"#,
    );

    if let Some(title) = &chart.title {
        xml.push_str(&title_xml(title, 2));
        xml.push_str("\n        <c:autoTitleDeleted val=\"0\"/>");
    }

    xml.push_str("\n        <c:plotArea>\n            <c:layout/>");

    match chart.chart_type {
        ChartType::Column => {
            xml.push_str(
                "\n            <c:barChart>\n                <c:barDir val=\"col\"/>\n                <c:grouping val=\"clustered\"/>\n                <c:varyColors val=\"0\"/>",
            );
            for (i, _) in chart.series.iter().enumerate() {
                xml.push_str(&series_xml(chart, i, SeriesShape::Category));
            }
            xml.push_str(&format!(
                "\n                <c:axId val=\"{CAT_AX_ID}\"/>\n                <c:axId val=\"{VAL_AX_ID}\"/>\n            </c:barChart>"
            ));
            xml.push_str(&category_axes_xml(chart, CAT_AX_ID, VAL_AX_ID));
        }
        ChartType::Line => {
            xml.push_str(
                "\n            <c:lineChart>\n                <c:grouping val=\"standard\"/>\n                <c:varyColors val=\"0\"/>",
            );
            for (i, _) in chart.series.iter().enumerate() {
                xml.push_str(&series_xml(chart, i, SeriesShape::Line));
            }
            xml.push_str(&format!(
                "\n                <c:marker val=\"1\"/>\n                <c:axId val=\"{CAT_AX_ID}\"/>\n                <c:axId val=\"{VAL_AX_ID}\"/>\n            </c:lineChart>"
            ));
            xml.push_str(&category_axes_xml(chart, CAT_AX_ID, VAL_AX_ID));
        }
        ChartType::Pie => {
            xml.push_str("\n            <c:pieChart>\n                <c:varyColors val=\"1\"/>");
            for (i, _) in chart.series.iter().enumerate() {
                xml.push_str(&series_xml(chart, i, SeriesShape::Category));
            }
            xml.push_str("\n                <c:firstSliceAng val=\"0\"/>\n            </c:pieChart>");
        }
        ChartType::Scatter => {
            xml.push_str(
                "\n            <c:scatterChart>\n                <c:scatterStyle val=\"lineMarker\"/>\n                <c:varyColors val=\"0\"/>",
            );
            for (i, _) in chart.series.iter().enumerate() {
                xml.push_str(&series_xml(chart, i, SeriesShape::Scatter));
            }
            xml.push_str(&format!(
                "\n                <c:axId val=\"{CAT_AX_ID}\"/>\n                <c:axId val=\"{VAL_AX_ID}\"/>\n            </c:scatterChart>"
            ));
            xml.push_str(&scatter_axes_xml(chart, CAT_AX_ID, VAL_AX_ID));
        }
    }

    xml.push_str("\n        </c:plotArea>");

    if let Some(legend) = &chart.legend {
        xml.push_str(&format!(
            "\n        <c:legend>\n            <c:legendPos val=\"{}\"/>\n            <c:overlay val=\"0\"/>\n        </c:legend>",
            legend.position.xlsx_pos()
        ));
    }

    xml.push_str("\n        <c:plotVisOnly val=\"1\"/>\n    </c:chart>\n</c:chartSpace>");
    xml
}

enum SeriesShape {
    /// cat + val (bar, pie)
    Category,
    /// cat + val + smooth flag (line)
    Line,
    /// xVal + yVal (scatter)
    Scatter,
}

fn series_xml(chart: &Chart, index: usize, shape: SeriesShape) -> String {
    let series = &chart.series[index];
    let mut xml = format!(
        "\n                <c:ser>\n                    <c:idx val=\"{index}\"/>\n                    <c:order val=\"{index}\"/>"
    );

    if let Some(name) = &series.name {
        xml.push_str(&format!(
            "\n                    <c:tx><c:v>{}</c:v></c:tx>",
            escape_xml(name)
        ));
    }

    match shape {
        SeriesShape::Category | SeriesShape::Line => {
            if let Some(categories) = &series.categories {
                xml.push_str(&format!(
                    "\n                    <c:cat>{}</c:cat>",
                    data_ref_xml(categories)
                ));
            }
            xml.push_str(&format!(
                "\n                    <c:val>{}</c:val>",
                data_ref_xml(&series.values)
            ));
            if matches!(shape, SeriesShape::Line) {
                xml.push_str("\n                    <c:smooth val=\"0\"/>");
            }
        }
        SeriesShape::Scatter => {
            if let Some(x_values) = &series.categories {
                xml.push_str(&format!(
                    "\n                    <c:xVal>{}</c:xVal>",
                    data_ref_xml(x_values)
                ));
            }
            xml.push_str(&format!(
                "\n                    <c:yVal>{}</c:yVal>",
                data_ref_xml(&series.values)
            ));
            xml.push_str("\n                    <c:smooth val=\"0\"/>");
        }
    }

    xml.push_str("\n                </c:ser>");
    xml
}

fn data_ref_xml(reference: &DataReference) -> String {
    let formula = escape_xml(&reference.formula);
    match reference.kind {
        RefKind::Numbers => format!("<c:numRef><c:f>{formula}</c:f></c:numRef>"),
        RefKind::Strings => format!("<c:strRef><c:f>{formula}</c:f></c:strRef>"),
    }
}

fn title_xml(text: &str, indent: usize) -> String {
    let pad = "    ".repeat(indent);
    format!(
        "\n{pad}<c:title>\n{pad}    <c:tx><c:rich><a:bodyPr/><a:lstStyle/><a:p><a:r><a:t>{}</a:t></a:r></a:p></c:rich></c:tx>\n{pad}    <c:overlay val=\"0\"/>\n{pad}</c:title>",
        escape_xml(text)
    )
}

fn category_axes_xml(chart: &Chart, cat_ax_id: u32, val_ax_id: u32) -> String {
    let mut xml = format!(
        "\n            <c:catAx>\n                <c:axId val=\"{cat_ax_id}\"/>\n                <c:scaling><c:orientation val=\"minMax\"/></c:scaling>\n                <c:delete val=\"0\"/>\n                <c:axPos val=\"b\"/>"
    );
    if let Some(title) = &chart.x_axis.title {
        xml.push_str(&title_xml(title, 4));
    }
    xml.push_str(&format!(
        "\n                <c:crossAx val=\"{val_ax_id}\"/>\n            </c:catAx>"
    ));

    xml.push_str(&format!(
        "\n            <c:valAx>\n                <c:axId val=\"{val_ax_id}\"/>\n                <c:scaling><c:orientation val=\"minMax\"/></c:scaling>\n                <c:delete val=\"0\"/>\n                <c:axPos val=\"l\"/>"
    ));
    if let Some(title) = &chart.y_axis.title {
        xml.push_str(&title_xml(title, 4));
    }
    xml.push_str(&format!(
        "\n                <c:crossAx val=\"{cat_ax_id}\"/>\n            </c:valAx>"
    ));
    xml
}

fn scatter_axes_xml(chart: &Chart, x_ax_id: u32, y_ax_id: u32) -> String {
    let mut xml = format!(
        "\n            <c:valAx>\n                <c:axId val=\"{x_ax_id}\"/>\n                <c:scaling><c:orientation val=\"minMax\"/></c:scaling>\n                <c:delete val=\"0\"/>\n                <c:axPos val=\"b\"/>"
    );
    if let Some(title) = &chart.x_axis.title {
        xml.push_str(&title_xml(title, 4));
    }
    xml.push_str(&format!(
        "\n                <c:crossAx val=\"{y_ax_id}\"/>\n            </c:valAx>"
    ));

    xml.push_str(&format!(
        "\n            <c:valAx>\n                <c:axId val=\"{y_ax_id}\"/>\n                <c:scaling><c:orientation val=\"minMax\"/></c:scaling>\n                <c:delete val=\"0\"/>\n                <c:axPos val=\"l\"/>"
    ));
    if let Some(title) = &chart.y_axis.title {
        xml.push_str(&title_xml(title, 4));
    }
    xml.push_str(&format!(
        "\n                <c:crossAx val=\"{x_ax_id}\"/>\n            </c:valAx>"
    ));
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use fincast_chart::DataSeries;

    fn sample_chart(chart_type: ChartType) -> Chart {
        let mut chart = Chart::new(chart_type).with_title("Revenue Forecast 2025-2029");
        chart.add_series(
            DataSeries::new(DataReference::numbers("Dashboard!$B$16:$F$16"))
                .with_categories(DataReference::strings("Dashboard!$B$15:$F$15")),
        );
        chart
    }

    #[test]
    fn bar_chart_xml_shape() {
        let xml = chart_xml(&sample_chart(ChartType::Column));
        assert!(xml.contains("<c:barChart>"));
        assert!(xml.contains("<c:barDir val=\"col\"/>"));
        assert!(xml.contains("<c:numRef><c:f>Dashboard!$B$16:$F$16</c:f></c:numRef>"));
        assert!(xml.contains("<c:strRef><c:f>Dashboard!$B$15:$F$15</c:f></c:strRef>"));
        assert!(xml.contains("Revenue Forecast 2025-2029"));
    }

    #[test]
    fn scatter_series_uses_xy_values() {
        let xml = chart_xml(&sample_chart(ChartType::Scatter));
        assert!(xml.contains("<c:scatterChart>"));
        assert!(xml.contains("<c:xVal>"));
        assert!(xml.contains("<c:yVal>"));
        assert!(!xml.contains("<c:cat>"));
    }

    #[test]
    fn drawing_anchors_follow_chart_placement() {
        let mut chart = sample_chart(ChartType::Line);
        chart.anchor.row = 19;
        chart.anchor.col = 0;
        let xml = drawing_xml(&[chart], 1);
        assert!(xml.contains("<xdr:row>19</xdr:row>"));
        assert!(xml.contains("<xdr:col>8</xdr:col>"));
        assert!(xml.contains("r:id=\"rId1\""));
    }
}
