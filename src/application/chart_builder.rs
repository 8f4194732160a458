// Chart configuration builder - Assembles the bar chart document
use crate::application::ChartError;
use crate::domain::chart::{
    Animation, AxisTitle, BarDataset, CategoryAxis, CategoryTicks, ChartConfiguration, ChartData,
    ChartKind, ChartOptions, DisplayRange, Font, FontWeight, Grid, Layout, LegendPlugin,
    LegendPosition, Plugins, Scales, TitlePadding, TitlePlugin, TooltipPlugin, ValueAxis,
    ValueTicks,
};
use crate::infrastructure::config::ChartSettings;

const BAR_FILL_COLOR: &str = "rgba(54, 162, 235, 0.8)";
const BAR_BORDER_COLOR: &str = "rgba(54, 162, 235, 1)";
const BAR_BORDER_WIDTH: u32 = 1;
const BAR_BORDER_RADIUS: u32 = 3;
const BAR_THICKNESS: u32 = 30;
const MAX_BAR_THICKNESS: u32 = 50;

const VALUE_GRID_COLOR: &str = "rgba(0, 0, 0, 0.1)";
const VALUE_MAX_TICKS: u32 = 8;
const LABEL_MAX_ROTATION: u32 = 45;
const LABEL_MIN_ROTATION: u32 = 30;

const AXIS_TITLE_SIZE: u32 = 14;
const CHART_TITLE_SIZE: u32 = 16;
const TOOLTIP_BACKGROUND: &str = "rgba(0, 0, 0, 0.8)";
const TOOLTIP_PADDING: u32 = 8;
const LAYOUT_PADDING: u32 = 10;

/// Builds the configuration for one render. Pure assembly: the range is
/// embedded as given.
pub fn build_chart_configuration(
    cities: &[String],
    temperatures: &[f64],
    range: DisplayRange,
    settings: &ChartSettings,
) -> Result<ChartConfiguration, ChartError> {
    if cities.len() != temperatures.len() {
        return Err(ChartError::LengthMismatch {
            cities: cities.len(),
            temperatures: temperatures.len(),
        });
    }

    let dataset = BarDataset {
        label: settings.dataset_label.clone(),
        data: temperatures.to_vec(),
        background_color: BAR_FILL_COLOR.to_string(),
        border_color: BAR_BORDER_COLOR.to_string(),
        border_width: BAR_BORDER_WIDTH,
        border_radius: BAR_BORDER_RADIUS,
        bar_thickness: BAR_THICKNESS,
        max_bar_thickness: MAX_BAR_THICKNESS,
    };

    let scales = Scales {
        y: ValueAxis {
            begin_at_zero: false,
            min: range.min,
            max: range.max,
            title: axis_title(&settings.y_axis_title),
            ticks: ValueTicks {
                auto_skip: true,
                max_ticks_limit: VALUE_MAX_TICKS,
                unit_suffix: settings.unit_suffix.clone(),
            },
            grid: Grid {
                display: None,
                color: Some(VALUE_GRID_COLOR.to_string()),
            },
        },
        x: CategoryAxis {
            title: axis_title(&settings.x_axis_title),
            ticks: CategoryTicks {
                max_rotation: LABEL_MAX_ROTATION,
                min_rotation: LABEL_MIN_ROTATION,
            },
            grid: Grid {
                display: Some(false),
                color: None,
            },
        },
    };

    let plugins = Plugins {
        title: TitlePlugin {
            display: true,
            text: settings.title.clone(),
            font: Font {
                size: CHART_TITLE_SIZE,
                weight: FontWeight::Bold,
            },
            padding: TitlePadding { top: 5, bottom: 20 },
        },
        tooltip: TooltipPlugin {
            enabled: true,
            background_color: TOOLTIP_BACKGROUND.to_string(),
            padding: TOOLTIP_PADDING,
        },
        legend: LegendPlugin {
            display: true,
            position: LegendPosition::Top,
        },
    };

    Ok(ChartConfiguration {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: cities.to_vec(),
            datasets: vec![dataset],
        },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: false,
            scales,
            plugins,
            // rebuilds must show immediately
            animation: Animation { duration: 0 },
            layout: Layout {
                padding: LAYOUT_PADDING,
            },
        },
    })
}

fn axis_title(text: &str) -> AxisTitle {
    AxisTitle {
        display: true,
        text: text.to_string(),
        font: Font {
            size: AXIS_TITLE_SIZE,
            weight: FontWeight::Normal,
        },
    }
}
