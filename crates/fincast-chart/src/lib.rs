//! # fincast-chart
//!
//! Chart definitions embedded into the generated workbook. These are pure
//! data; the xlsx serializer turns them into DrawingML parts.

mod axis;
mod chart;
mod legend;
mod series;

pub use axis::Axis;
pub use chart::{Chart, ChartAnchor, ChartType};
pub use legend::{Legend, LegendPosition};
pub use series::{DataReference, DataSeries, RefKind};
