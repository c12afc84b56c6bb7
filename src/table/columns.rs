use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::process::{Formatter, DEFAULT_DIGITS};

/// Raw CSV header → label shown in the table. Exact, case-sensitive match.
static HEADER_RENAME: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("home team", "Home"),
        ("away team", "Away"),
        ("market spread", "Market Spread"),
        ("market odds", "Market Odds"),
        ("model mean", "Model Mean"),
        ("model P(cover)", "Model P(Cover)"),
        ("model edge", "Edge"),
        ("model fair odds", "Fair Odds"),
        ("# members cover", "# Models Cover"),
    ])
});

pub fn display_label(column: &str) -> &str {
    HEADER_RENAME.get(column).copied().unwrap_or(column)
}

/// Picks a formatter for columns named `exact`, or whose lowercased name contains `needle`.
#[derive(Debug, Clone, Copy)]
pub struct FormatRule {
    pub exact: &'static str,
    pub needle: &'static str,
    pub formatter: Formatter,
}

impl FormatRule {
    pub fn matches(&self, column: &str) -> bool {
        column == self.exact || column.to_lowercase().contains(self.needle)
    }
}

/// Evaluated top to bottom; the first matching rule wins.
pub const FORMAT_RULES: &[FormatRule] = &[
    FormatRule {
        exact: "model P(cover)",
        needle: "p(cover)",
        formatter: Formatter::Percent,
    },
    FormatRule {
        exact: "model edge",
        needle: "edge",
        formatter: Formatter::Percent,
    },
    FormatRule {
        exact: "model mean",
        needle: "mean",
        formatter: Formatter::Fixed(DEFAULT_DIGITS),
    },
];

pub fn formatter_for(column: &str, rules: &[FormatRule]) -> Formatter {
    rules
        .iter()
        .find(|rule| rule.matches(column))
        .map(|rule| rule.formatter)
        .unwrap_or(Formatter::Identity)
}

/// A grid column: the raw header name, its display title and how cells render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub title: String,
    pub formatter: Formatter,
}

pub fn column_specs(fields: &[String]) -> Vec<ColumnSpec> {
    fields
        .iter()
        .map(|name| ColumnSpec {
            name: name.clone(),
            title: display_label(name).to_string(),
            formatter: formatter_for(name, FORMAT_RULES),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_headers_are_renamed() {
        assert_eq!(display_label("home team"), "Home");
        assert_eq!(display_label("model P(cover)"), "Model P(Cover)");
        assert_eq!(display_label("model edge"), "Edge");
        assert_eq!(display_label("# members cover"), "# Models Cover");
    }

    #[test]
    fn rename_is_case_sensitive_and_passes_unknowns_through() {
        assert_eq!(display_label("Home Team"), "Home Team");
        assert_eq!(display_label("kickoff"), "kickoff");
        assert_eq!(display_label(""), "");
    }

    #[test]
    fn rules_match_by_substring_ignoring_case() {
        assert_eq!(formatter_for("model P(cover)", FORMAT_RULES), Formatter::Percent);
        assert_eq!(formatter_for("Alt P(COVER)", FORMAT_RULES), Formatter::Percent);
        assert_eq!(formatter_for("model edge", FORMAT_RULES), Formatter::Percent);
        assert_eq!(formatter_for("Hedge Ratio", FORMAT_RULES), Formatter::Percent);
        assert_eq!(formatter_for("model mean", FORMAT_RULES), Formatter::Fixed(2));
        assert_eq!(formatter_for("MEAN margin", FORMAT_RULES), Formatter::Fixed(2));
        assert_eq!(formatter_for("home team", FORMAT_RULES), Formatter::Identity);
        assert_eq!(formatter_for("market odds", FORMAT_RULES), Formatter::Identity);
    }

    #[test]
    fn first_matching_rule_wins() {
        // contains both "edge" and "mean"; the edge rule is listed first
        assert_eq!(formatter_for("mean edge", FORMAT_RULES), Formatter::Percent);
        assert_eq!(formatter_for("p(cover) mean", FORMAT_RULES), Formatter::Percent);
    }

    #[test]
    fn custom_rule_lists_are_honoured() {
        let rules = [FormatRule {
            exact: "spread",
            needle: "spread",
            formatter: Formatter::Fixed(1),
        }];
        assert_eq!(formatter_for("market spread", &rules), Formatter::Fixed(1));
        assert_eq!(formatter_for("model edge", &rules), Formatter::Identity);
    }

    #[test]
    fn specs_follow_header_order() {
        let fields: Vec<String> = ["away team", "model mean", "notes"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let specs = column_specs(&fields);
        let titles: Vec<_> = specs.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Away", "Model Mean", "notes"]);
        assert_eq!(specs[1].formatter, Formatter::Fixed(2));
        assert_eq!(specs[2].formatter, Formatter::Identity);
    }
}
