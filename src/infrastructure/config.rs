use crate::application::range::RangePolicy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub chart: ChartSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ChartSettings {
    pub title: String,
    pub dataset_label: String,
    pub y_axis_title: String,
    pub x_axis_title: String,
    pub unit_suffix: String,
    pub range_policy: RangePolicy,
    pub element_id: String,
    /// Chart.js bundle loaded by the page. Without it the page shows the static table.
    pub script_url: Option<String>,
    pub popular_cities: Vec<String>,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            title: "热门城市温度实时对比".to_string(),
            dataset_label: "当前温度 (°C)".to_string(),
            y_axis_title: "温度 (°C)".to_string(),
            x_axis_title: "城市".to_string(),
            unit_suffix: "°C".to_string(),
            range_policy: RangePolicy::default(),
            element_id: "temperatureChart".to_string(),
            script_url: Some("https://cdn.jsdelivr.net/npm/chart.js@4.4.0".to_string()),
            popular_cities: [
                "北京", "上海", "广州", "深圳", "杭州", "成都", "武汉", "西安", "重庆", "南京",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:5000".to_string()
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load_app_config_from("config/chart")
}

/// Loads `<path>.{toml,yaml,json,...}` if present, then `TEMPCHART__*` environment overrides.
pub fn load_app_config_from(path: &str) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(config::Environment::with_prefix("TEMPCHART").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent");
        let config = load_app_config_from(path.to_str().unwrap()).unwrap();

        assert_eq!(config.server.bind, "0.0.0.0:5000");
        assert_eq!(config.chart.range_policy, RangePolicy::ValidReadings);
        assert_eq!(config.chart.popular_cities.len(), 10);
        assert_eq!(config.chart.element_id, "temperatureChart");
    }

    #[test]
    fn test_file_overrides_selected_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[server]
bind = "127.0.0.1:8081"

[chart]
range_policy = "non_zero"
unit_suffix = "℃"
popular_cities = ["拉萨", "西宁"]
"#
        )
        .unwrap();

        let base = dir.path().join("chart");
        let config = load_app_config_from(base.to_str().unwrap()).unwrap();

        assert_eq!(config.server.bind, "127.0.0.1:8081");
        assert_eq!(config.chart.range_policy, RangePolicy::NonZero);
        assert_eq!(config.chart.unit_suffix, "℃");
        assert_eq!(config.chart.popular_cities, vec!["拉萨", "西宁"]);
        // untouched fields keep their defaults
        assert_eq!(config.chart.title, "热门城市温度实时对比");
    }
}
