use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Doughnut,
    Pie,
    Radar,
}

/// A color setting that is either shared by every point or given per point.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Colors {
    One(String),
    Each(Vec<String>),
}

impl From<&str> for Colors {
    fn from(color: &str) -> Self {
        Colors::One(color.to_string())
    }
}

impl From<Vec<String>> for Colors {
    fn from(colors: Vec<String>) -> Self {
        Colors::Each(colors)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    /// Overrides the chart type for this dataset (bar + line combos).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ChartKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Colors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Colors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

impl Dataset {
    pub fn new(data: Vec<f64>) -> Self {
        Dataset {
            data,
            ..Dataset::default()
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn kind(mut self, kind: ChartKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn background(mut self, colors: impl Into<Colors>) -> Self {
        self.background_color = Some(colors.into());
        self
    }

    pub fn border(mut self, colors: impl Into<Colors>) -> Self {
        self.border_color = Some(colors.into());
        self
    }

    pub fn border_width(mut self, width: u32) -> Self {
        self.border_width = Some(width);
        self
    }

    pub fn border_radius(mut self, radius: u32) -> Self {
        self.border_radius = Some(radius);
        self
    }

    /// Smoothed, filled area under a line.
    pub fn area(mut self, tension: f64) -> Self {
        self.tension = Some(tension);
        self.fill = Some(true);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Chart.js configuration object. `options` stays free-form JSON since each
/// visualization only sets a handful of keys.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: Value,
}

impl ChartConfig {
    pub fn new(kind: ChartKind, labels: Vec<String>, datasets: Vec<Dataset>, options: Value) -> Self {
        ChartConfig {
            kind,
            data: ChartData { labels, datasets },
            options,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
