use crate::process::to_number;

/// Column whose value drives row highlighting and the default sort.
pub const EDGE_COLUMN: &str = "model edge";

pub const GREAT_EDGE: f64 = 6.0;
pub const GOOD_EDGE: f64 = 2.0;
pub const BAD_EDGE: f64 = -2.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowClass {
    #[default]
    None,
    Great,
    Good,
    Bad,
}

impl RowClass {
    /// Thresholds are checked great → good → bad; anything else, including
    /// a missing or non-numeric edge, is `None`.
    pub fn from_edge(edge: Option<f64>) -> Self {
        match edge {
            Some(e) if e >= GREAT_EDGE => RowClass::Great,
            Some(e) if e >= GOOD_EDGE => RowClass::Good,
            Some(e) if e <= BAD_EDGE => RowClass::Bad,
            _ => RowClass::None,
        }
    }

    pub fn from_raw(raw: Option<&str>) -> Self {
        Self::from_edge(to_number(raw))
    }

    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            RowClass::None => None,
            RowClass::Great => Some("edge-great"),
            RowClass::Good => Some("edge-good"),
            RowClass::Bad => Some("edge-bad"),
        }
    }
}
