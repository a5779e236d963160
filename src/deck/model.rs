//! Deck Data Model
//! Slides, chart definitions and data rows as read from the deck payload.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One cell of a chart data row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

/// A data row: field name to value.
pub type DataRow = BTreeMap<String, CellValue>;

/// Chart type tag. Tags outside the known set load as `Unsupported`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Area,
    Composed,
    Donut,
    Pie,
    Scatter,
    #[serde(other)]
    Unsupported,
}

/// One plotted series within a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub key: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SeriesSpec {
    /// Legend label, falling back to the field key.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.key)
    }
}

/// Declarative description of one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub title: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: Vec<DataRow>,
    pub data_keys: Vec<SeriesSpec>,
    pub x_axis_key: String,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl ChartSpec {
    /// Category label of a row, i.e. the text of its `x_axis_key` field.
    pub fn category(&self, row: usize) -> Option<String> {
        self.data
            .get(row)
            .and_then(|r| r.get(&self.x_axis_key))
            .map(|v| v.to_string())
    }

    /// All category labels in row order. Rows without the axis field get "".
    pub fn categories(&self) -> Vec<String> {
        (0..self.data.len())
            .map(|row| self.category(row).unwrap_or_default())
            .collect()
    }
}

/// One page of the presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_title: Option<String>,
    pub main_message: String,
    pub chart1: ChartSpec,
    pub chart2: ChartSpec,
    #[serde(default)]
    pub key_takeaways: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Slide {
    pub fn charts(&self) -> [&ChartSpec; 2] {
        [&self.chart1, &self.chart2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_spec_from_camel_case_json() {
        let json = r##"{
            "title": "Mix",
            "type": "composed",
            "xAxisKey": "year",
            "data": [{ "year": "2026", "revenue": 4.48 }],
            "dataKeys": [{ "key": "revenue", "color": "#3b82f6" }],
            "note": "n"
        }"##;
        let spec: ChartSpec = serde_json::from_str(json).unwrap();

        assert_eq!(spec.chart_type, ChartType::Composed);
        assert_eq!(spec.x_axis_key, "year");
        assert_eq!(spec.suffix, None);
        assert_eq!(spec.data[0]["revenue"], CellValue::Number(4.48));
        assert_eq!(spec.data[0]["year"], CellValue::Text("2026".into()));
        assert_eq!(spec.data_keys[0].display_name(), "revenue");
    }

    #[test]
    fn test_unknown_chart_type_is_unsupported() {
        let tag: ChartType = serde_json::from_str("\"radar\"").unwrap();
        assert_eq!(tag, ChartType::Unsupported);

        let tag: ChartType = serde_json::from_str("\"scatter\"").unwrap();
        assert_eq!(tag, ChartType::Scatter);
    }

    #[test]
    fn test_category_text_for_numbers_and_strings() {
        let mut row = DataRow::new();
        row.insert("year".into(), CellValue::Number(2031.0));
        let spec = ChartSpec {
            title: String::new(),
            chart_type: ChartType::Bar,
            data: vec![row],
            data_keys: Vec::new(),
            x_axis_key: "year".into(),
            note: String::new(),
            suffix: None,
        };

        assert_eq!(spec.category(0).as_deref(), Some("2031"));
        assert_eq!(spec.category(1), None);
        assert_eq!(spec.categories(), vec!["2031".to_string()]);
    }
}
