/// Characters stripped before parsing: percent signs, thousands separators, currency.
const DECORATIONS: [char; 3] = ['%', ',', '$'];

/// Coerce a loosely formatted cell (`"$1,200"`, `"65.96%"`, `" -3 "`) into a finite number.
///
/// Returns `None` for absent input, text that does not parse, and non-finite
/// results such as `"inf"` or `"NaN"`.
pub fn to_number(raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    let cleaned: String = raw.chars().filter(|c| !DECORATIONS.contains(c)).collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}
