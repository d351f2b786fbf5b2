//! Business_Overview sheet: static company profile

use fincast_core::{Result, Workbook};

use crate::layout::{bold, title_style, HEADER_BLUE, LIGHT_GRAY};

pub fn populate(wb: &mut Workbook) -> Result<()> {
    let ws = wb.sheet_mut("Business_Overview")?;

    ws.set_value("A1", "COMPANY OVERVIEW")?;
    ws.set_style("A1", &title_style())?;

    ws.set_value("A3", "Company Name:")?;
    ws.set_value("B3", "TechVision Solutions Inc.")?;
    ws.set_value("A4", "Industry:")?;
    ws.set_value("B4", "Enterprise Software & Cloud Services")?;
    ws.set_value("A5", "Business Model:")?;
    ws.set_value(
        "B5",
        "B2B SaaS provider offering enterprise software solutions with a subscription-based revenue model",
    )?;

    ws.set_value("A7", "Company Description")?;
    ws.set_style("A7", &bold())?;
    ws.set_value(
        "A8",
        "TechVision Solutions Inc. is a leading provider of enterprise software solutions, \
         specializing in cloud-based business intelligence, data analytics, and process \
         automation tools. Founded in 2020, the company has rapidly grown to serve over 500 \
         enterprise clients across multiple industries.",
    )?;

    ws.set_value("A10", "Products and Services")?;
    ws.set_style("A10", &bold())?;

    let products: [(&str, &str, u32); 4] = [
        (
            "DataInsight Pro",
            "Advanced business intelligence and analytics platform",
            40,
        ),
        ("CloudFlow", "Cloud-based workflow automation solution", 30),
        (
            "SecureConnect",
            "Enterprise security and integration platform",
            20,
        ),
        ("AI Assistant", "AI-powered business process automation tool", 10),
    ];
    for (i, (product, description, revenue_share)) in products.iter().enumerate() {
        let row = i + 12;
        ws.set_value(&format!("A{row}"), *product)?;
        ws.set_style(&format!("A{row}"), &bold())?;
        ws.set_value(&format!("B{row}"), *description)?;
        ws.set_value(&format!("C{row}"), format!("{revenue_share}%"))?;
    }

    ws.set_value("A17", "Market Analysis")?;
    ws.set_style("A17", &bold())?;

    let market_points = [
        "Total Addressable Market (TAM): $50 billion",
        "Serviceable Addressable Market (SAM): $20 billion",
        "Serviceable Obtainable Market (SOM): $2 billion",
        "Expected CAGR: 15% (2025-2029)",
        "Key Growth Drivers: Digital transformation, AI adoption, cloud migration",
    ];
    for (i, point) in market_points.iter().enumerate() {
        ws.set_value(&format!("A{}", 19 + i), *point)?;
    }

    ws.set_value("A26", "Competitive Advantages")?;
    ws.set_style("A26", &bold())?;

    let advantages = [
        "Proprietary AI/ML technology",
        "Strong IP portfolio with 15 patents",
        "99.9% platform uptime",
        "24/7 enterprise support",
        "ISO 27001 certified security",
    ];
    for (i, advantage) in advantages.iter().enumerate() {
        ws.set_value(&format!("A{}", 28 + i), format!("\u{2022} {advantage}"))?;
    }

    ws.set_value("A35", "Growth Strategy")?;
    ws.set_style("A35", &bold())?;

    let strategies = [
        "Geographic expansion into APAC region",
        "New product development in AI/ML space",
        "Strategic acquisitions in complementary technologies",
        "Channel partner program expansion",
        "Investment in R&D (15% of revenue)",
    ];
    for (i, strategy) in strategies.iter().enumerate() {
        ws.set_value(&format!("A{}", 37 + i), format!("\u{2022} {strategy}"))?;
    }

    ws.set_value("A44", "Financial Highlights (2024)")?;
    ws.set_style("A44", &bold())?;

    let highlights: [(&str, &str); 5] = [
        ("Annual Revenue", "$100 million"),
        ("Gross Margin", "75%"),
        ("EBITDA Margin", "25%"),
        ("ARR Growth", "35%"),
        ("Customer Retention", "95%"),
    ];
    for (i, (metric, value)) in highlights.iter().enumerate() {
        let row = 46 + i;
        ws.set_value(&format!("A{row}"), *metric)?;
        ws.set_value(&format!("B{row}"), *value)?;
    }

    // Long description cells wrap instead of overflowing
    for row in 8..=49u32 {
        ws.amend_style(&format!("A{row}"), |s| s.wrap_text(true))?;
        ws.amend_style(&format!("B{row}"), |s| s.wrap_text(true))?;
    }

    ws.set_column_width(0, 30.0);
    ws.set_column_width(1, 60.0);
    ws.set_column_width(2, 15.0);

    ws.amend_style("A1", |s| s.fill(HEADER_BLUE))?;
    for row in [7u32, 10, 17, 26, 35, 44] {
        ws.amend_style(&format!("A{row}"), |s| s.fill(LIGHT_GRAY))?;
    }

    Ok(())
}
