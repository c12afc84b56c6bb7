use crate::process::coerce::to_number;

/// Decimal places used by the fixed-decimal formatter unless a column asks otherwise.
pub const DEFAULT_DIGITS: usize = 2;

/// Render a cell as a percentage with two decimals.
///
/// Values are already percentage-scale (`65.96` means 65.96%), so nothing is
/// multiplied by 100. Text that does not coerce is returned unchanged.
pub fn fmt_pct(raw: Option<&str>) -> String {
    match to_number(raw) {
        Some(n) => format!("{:.2}%", n),
        None => raw.unwrap_or_default().to_string(),
    }
}

/// Render a cell as a fixed-decimal number, falling back to the raw text.
pub fn fmt_num(raw: Option<&str>, digits: usize) -> String {
    match to_number(raw) {
        Some(n) => format!("{:.*}", digits, n),
        None => raw.unwrap_or_default().to_string(),
    }
}

/// Per-column rendering rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    Percent,
    Fixed(usize),
    Identity,
}

impl Formatter {
    pub fn apply(&self, raw: Option<&str>) -> String {
        match self {
            Formatter::Percent => fmt_pct(raw),
            Formatter::Fixed(digits) => fmt_num(raw, *digits),
            Formatter::Identity => raw.unwrap_or_default().to_string(),
        }
    }

    /// Numeric formatters always sort by their coerced value.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Formatter::Identity)
    }
}
