// Chart configuration domain model
//
// Mirrors the document accepted by the Chart.js bar chart constructor.
use serde::Serialize;

/// Integer bounds of the value axis. `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayRange {
    pub min: i64,
    pub max: i64,
}

impl DisplayRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartConfiguration {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[cfg(test)]
impl ChartConfiguration {
    pub fn labels(&self) -> &[String] {
        &self.data.labels
    }

    /// Temperatures of the single bar dataset, index-aligned with `labels`.
    pub fn dataset(&self) -> &[f64] {
        self.data
            .datasets
            .first()
            .map(|d| d.data.as_slice())
            .unwrap_or(&[])
    }

    pub fn range(&self) -> DisplayRange {
        DisplayRange::new(self.options.scales.y.min, self.options.scales.y.max)
    }

    /// Text shown for a value-axis tick, as the page's tick callback renders it.
    pub fn format_tick(&self, value: f64) -> String {
        format!("{}{}", value, self.options.scales.y.ticks.unit_suffix)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<BarDataset>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: String,
    pub border_color: String,
    pub border_width: u32,
    pub border_radius: u32,
    pub bar_thickness: u32,
    pub max_bar_thickness: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub scales: Scales,
    pub plugins: Plugins,
    pub animation: Animation,
    pub layout: Layout,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scales {
    pub y: ValueAxis,
    pub x: CategoryAxis,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueAxis {
    pub begin_at_zero: bool,
    pub min: i64,
    pub max: i64,
    pub title: AxisTitle,
    pub ticks: ValueTicks,
    pub grid: Grid,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueTicks {
    pub auto_skip: bool,
    pub max_ticks_limit: u32,
    /// Appended to each tick label by the page's `callback`.
    pub unit_suffix: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryAxis {
    pub title: AxisTitle,
    pub ticks: CategoryTicks,
    pub grid: Grid,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTicks {
    pub max_rotation: u32,
    pub min_rotation: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: String,
    pub font: Font,
}

#[derive(Debug, Clone, Serialize)]
pub struct Font {
    pub size: u32,
    pub weight: FontWeight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Serialize)]
pub struct Grid {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Plugins {
    pub title: TitlePlugin,
    pub tooltip: TooltipPlugin,
    pub legend: LegendPlugin,
}

#[derive(Debug, Clone, Serialize)]
pub struct TitlePlugin {
    pub display: bool,
    pub text: String,
    pub font: Font,
    pub padding: TitlePadding,
}

#[derive(Debug, Clone, Serialize)]
pub struct TitlePadding {
    pub top: u32,
    pub bottom: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipPlugin {
    pub enabled: bool,
    pub background_color: String,
    pub padding: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendPlugin {
    pub display: bool,
    pub position: LegendPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
}

#[derive(Debug, Clone, Serialize)]
pub struct Animation {
    pub duration: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub padding: u32,
}
