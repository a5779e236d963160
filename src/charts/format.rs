//! Value Formatting Module
//! One formatter shared by axis ticks, data labels, wedge labels and tooltips.

use crate::deck::{CellValue, ChartSpec};

/// Fraction digits kept by grouped (locale-style) formatting.
const GROUPED_MAX_FRACTION: usize = 3;

/// Any finite f64 prints exactly within this many fraction digits.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Unit hint attached to a chart.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Suffix {
    #[default]
    None,
    /// Millions; 1000 and above rescale to billions.
    Millions,
    /// Thousands; 1000 and above rescale to millions.
    Thousands,
    /// Unit picked per row from the category label.
    Mixed,
    /// Appended verbatim.
    Literal(String),
}

impl Suffix {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Suffix::None,
            Some("M") => Suffix::Millions,
            Some("k") => Suffix::Thousands,
            Some("mixed") => Suffix::Mixed,
            Some(other) => Suffix::Literal(other.to_string()),
        }
    }

    /// Concrete suffix for one row. `Mixed` looks at the row's category text:
    /// "%" wins over "Mult" (shown as "x"); anything else, or no row, is bare.
    pub fn resolve(&self, category: Option<&str>) -> Suffix {
        match self {
            Suffix::Mixed => match category {
                Some(text) if text.contains('%') => Suffix::Literal("%".to_string()),
                Some(text) if text.contains("Mult") => Suffix::Literal("x".to_string()),
                _ => Suffix::None,
            },
            other => other.clone(),
        }
    }
}

/// Format a cell. Text passes through unchanged.
pub fn format_value(value: &CellValue, suffix: &Suffix, category: Option<&str>) -> String {
    match value {
        CellValue::Number(n) => format_number(*n, suffix, category),
        CellValue::Text(text) => text.clone(),
    }
}

/// Format a number under `suffix`, resolved against the row `category`.
pub fn format_number(value: f64, suffix: &Suffix, category: Option<&str>) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    match suffix.resolve(category) {
        Suffix::Millions if value >= 1000.0 => format!("{}B", to_fixed(value / 1000.0, 1)),
        Suffix::Millions => format!("{}M", group_thousands(value)),
        Suffix::Thousands if value >= 1000.0 => format!("{}M", to_fixed(value / 1000.0, 1)),
        Suffix::Thousands => format!("{}k", group_thousands(value)),
        Suffix::Literal(unit) => format!("{}{}", group_thousands(value), unit),
        Suffix::None | Suffix::Mixed => group_thousands(value),
    }
}

/// Comma-grouped integer part, up to three fraction digits, trailing zeros dropped.
pub fn group_thousands(value: f64) -> String {
    // Shortest round-trip digits, then decimal rounding on the digits themselves.
    let shortest = format!("{}", value.abs());
    let (int_part, frac_part) = round_half_up(&shortest, GROUPED_MAX_FRACTION);
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Exactly `digits` fraction digits, rounding the exact binary value half-up.
pub fn to_fixed(value: f64, digits: usize) -> String {
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = round_half_up(&exact, digits);
    let sign = if value < 0.0 { "-" } else { "" };
    if digits == 0 {
        format!("{}{}", sign, int_part)
    } else {
        format!("{}{}.{:0<width$}", sign, int_part, frac_part, width = digits)
    }
}

/// Round a plain unsigned decimal string to at most `max_fraction` digits.
fn round_half_up(decimal: &str, max_fraction: usize) -> (String, String) {
    let (int_part, frac_part) = decimal.split_once('.').unwrap_or((decimal, ""));
    if frac_part.len() <= max_fraction {
        return (int_part.to_string(), frac_part.to_string());
    }

    let round_up = frac_part.as_bytes()[max_fraction] >= b'5';
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part[..max_fraction].bytes())
        .collect();

    if round_up {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, b'1');
                break;
            }
            i -= 1;
            if digits[i] == b'9' {
                digits[i] = b'0';
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - max_fraction;
    let int_digits = String::from_utf8_lossy(&digits[..split]).into_owned();
    let frac_digits = String::from_utf8_lossy(&digits[split..]).into_owned();
    (int_digits, frac_digits)
}

/// Formatter bound to one chart: its suffix and row category labels.
#[derive(Debug, Clone, Default)]
pub struct ValueFormatter {
    suffix: Suffix,
    categories: Vec<String>,
}

impl ValueFormatter {
    pub fn new(suffix: Suffix, categories: Vec<String>) -> Self {
        Self { suffix, categories }
    }

    pub fn for_chart(spec: &ChartSpec) -> Self {
        Self::new(Suffix::parse(spec.suffix.as_deref()), spec.categories())
    }

    /// Format a number; `row` selects the category used by mixed units.
    pub fn number(&self, value: f64, row: Option<usize>) -> String {
        format_number(value, &self.suffix, self.category(row))
    }

    /// Format a data cell; text passes through.
    pub fn cell(&self, value: &CellValue, row: Option<usize>) -> String {
        format_value(value, &self.suffix, self.category(row))
    }

    fn category(&self, row: Option<usize>) -> Option<&str> {
        row.and_then(|r| self.categories.get(r)).map(String::as_str)
    }

    /// Axis tick text; ticks belong to no row.
    pub fn tick(&self, value: f64) -> String {
        self.number(value, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(value: f64, suffix: Option<&str>) -> String {
        format_number(value, &Suffix::parse(suffix), None)
    }

    #[test]
    fn test_millions_rescale_to_billions() {
        assert_eq!(fmt(1660.0, Some("M")), "1.7B");
        assert_eq!(fmt(1000.0, Some("M")), "1.0B");
        assert_eq!(fmt(4090.0, Some("M")), "4.1B");
        assert_eq!(fmt(1070.0, Some("M")), "1.1B");
    }

    #[test]
    fn test_millions_below_threshold() {
        assert_eq!(fmt(832.0, Some("M")), "832M");
        assert_eq!(fmt(0.96, Some("M")), "0.96M");
        assert_eq!(fmt(999.9995, Some("M")), "1,000M");
    }

    #[test]
    fn test_thousands_rescale_to_millions() {
        assert_eq!(fmt(1280.0, Some("k")), "1.3M");
        assert_eq!(fmt(640.0, Some("k")), "640k");
    }

    #[test]
    fn test_exact_ties_round_up() {
        assert_eq!(fmt(1250.0, Some("M")), "1.3B");
        assert_eq!(fmt(2750.0, Some("k")), "2.8M");
        assert_eq!(to_fixed(0.25, 1), "0.3");
        // 1.005 is stored just below the tie
        assert_eq!(to_fixed(1.005, 2), "1.00");
    }

    #[test]
    fn test_no_suffix_and_literal_suffix() {
        assert_eq!(fmt(59.5, None), "59.5");
        assert_eq!(fmt(7000.0, None), "7,000");
        assert_eq!(fmt(126.0, Some("%")), "126%");
        assert_eq!(fmt(22.5, Some("x")), "22.5x");
        assert_eq!(fmt(4.48, Some("B")), "4.48B");
        assert_eq!(fmt(1234567.0, Some("$")), "1,234,567$");
    }

    #[test]
    fn test_mixed_suffix_resolves_per_row() {
        let mixed = Suffix::parse(Some("mixed"));
        assert_eq!(format_number(13.5, &mixed, Some("CAGR %")), "13.5%");
        assert_eq!(format_number(23.5, &mixed, Some("EBITDA Mult")), "23.5x");
        assert_eq!(format_number(4.0, &mixed, Some("Margin")), "4");
        assert_eq!(format_number(16.0, &mixed, None), "16");
        assert!(!format_number(1.0, &mixed, Some("mixed")).contains("mixed"));
    }

    #[test]
    fn test_mixed_percent_takes_priority() {
        let mixed = Suffix::Mixed;
        assert_eq!(mixed.resolve(Some("Mult %")), Suffix::Literal("%".into()));
    }

    #[test]
    fn test_text_passes_through() {
        let value = CellValue::Text("n/a".into());
        assert_eq!(format_value(&value, &Suffix::Millions, None), "n/a");
        assert_eq!(
            format_value(&CellValue::Number(2040.0), &Suffix::Millions, None),
            "2.0B"
        );
    }

    #[test]
    fn test_grouping() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1000.0), "1,000");
        assert_eq!(group_thousands(158.2), "158.2");
        assert_eq!(group_thousands(1234.5678), "1,234.568");
        assert_eq!(group_thousands(-4500.25), "-4,500.25");
        assert_eq!(group_thousands(14.0), "14");
    }

    #[test]
    fn test_non_finite_passes_through() {
        assert_eq!(fmt(f64::NAN, Some("M")), "NaN");
    }

    #[test]
    fn test_value_formatter_uses_row_categories() {
        let formatter = ValueFormatter::new(
            Suffix::Mixed,
            vec!["CAGR %".to_string(), "EBITDA Mult".to_string()],
        );
        assert_eq!(formatter.number(13.5, Some(0)), "13.5%");
        assert_eq!(formatter.number(23.5, Some(1)), "23.5x");
        assert_eq!(formatter.number(23.5, Some(9)), "23.5");
        assert_eq!(formatter.tick(20.0), "20");
    }

    #[test]
    fn test_value_formatter_cells() {
        let formatter = ValueFormatter::new(
            Suffix::Mixed,
            vec!["CAGR %".to_string(), "EBITDA Mult".to_string()],
        );
        assert_eq!(formatter.cell(&CellValue::Number(23.5), Some(1)), "23.5x");
        assert_eq!(formatter.cell(&CellValue::Text("TBD".into()), Some(0)), "TBD");
    }
}
