use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use tracing::{debug, trace};

use super::LoadError;

/// One CSV data row keyed by header name.
///
/// Short rows simply lack the trailing columns; nothing is inserted for them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: HashMap<String, String>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    TooFewFields,
    TooManyFields,
    Malformed,
}

/// A non-fatal problem found while parsing; the caller logs it and carries on.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseWarning {
    /// Zero-based data row index (the header is not counted).
    pub row: usize,
    pub kind: WarningKind,
    pub message: String,
}

/// Header fields, data records and any warnings from one parse.
#[derive(Debug, Clone, Default)]
pub struct ParsedCsv {
    pub fields: Vec<String>,
    pub records: Vec<Record>,
    pub warnings: Vec<ParseWarning>,
}

/// Parse CSV text whose first row names the fields. Empty lines are skipped.
///
/// Only an unreadable header is fatal. Ragged rows are kept and reported,
/// rows the reader cannot decode are dropped and reported.
pub fn parse_csv(text: &str) -> Result<ParsedCsv, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // ragged rows become warnings, not errors
        .trim(Trim::None)
        .from_reader(text.as_bytes());

    let fields: Vec<String> = rdr
        .headers()
        .map_err(LoadError::Parse)?
        .iter()
        .map(str::to_string)
        .collect();
    debug!(columns = fields.len(), "parsed CSV header");

    let mut parsed = ParsedCsv {
        fields,
        ..Default::default()
    };

    let mut record = StringRecord::new();
    let mut row = 0usize;
    loop {
        match rdr.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                parsed.warnings.push(ParseWarning {
                    row,
                    kind: WarningKind::Malformed,
                    message: e.to_string(),
                });
                row += 1;
                continue;
            }
        }

        let expected = parsed.fields.len();
        if record.len() != expected {
            let kind = if record.len() < expected {
                WarningKind::TooFewFields
            } else {
                WarningKind::TooManyFields
            };
            trace!(row, found = record.len(), expected, "ragged row");
            parsed.warnings.push(ParseWarning {
                row,
                kind,
                message: format!("expected {} fields but parsed {}", expected, record.len()),
            });
        }

        parsed.records.push(
            parsed
                .fields
                .iter()
                .zip(record.iter())
                .map(|(k, v)| (k.clone(), v.to_string()))
                .collect(),
        );
        row += 1;
    }

    Ok(parsed)
}
