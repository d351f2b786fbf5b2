//! Data series types

/// What kind of cells a reference points at
///
/// The serializer uses this to choose between numeric and string reference
/// elements in the chart XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Numbers,
    Strings,
}

/// A reference to a cell range feeding a chart (e.g. "Dashboard!$B$16:$F$16")
#[derive(Debug, Clone, PartialEq)]
pub struct DataReference {
    /// Range formula, sheet-qualified
    pub formula: String,
    /// Whether the range holds numbers or strings
    pub kind: RefKind,
}

impl DataReference {
    /// Reference a range of numeric cells
    pub fn numbers<S: Into<String>>(formula: S) -> Self {
        Self {
            formula: formula.into(),
            kind: RefKind::Numbers,
        }
    }

    /// Reference a range of string cells (category labels)
    pub fn strings<S: Into<String>>(formula: S) -> Self {
        Self {
            formula: formula.into(),
            kind: RefKind::Strings,
        }
    }
}

/// One data series of a chart
#[derive(Debug, Clone, PartialEq)]
pub struct DataSeries {
    /// Series name shown in the legend
    pub name: Option<String>,
    /// Values (Y data)
    pub values: DataReference,
    /// Categories (X data)
    pub categories: Option<DataReference>,
}

impl DataSeries {
    /// Create a new series from its value range
    pub fn new(values: DataReference) -> Self {
        Self {
            name: None,
            values,
            categories: None,
        }
    }

    /// Set the series name
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the category range
    pub fn with_categories(mut self, categories: DataReference) -> Self {
        self.categories = Some(categories);
        self
    }
}
