// Static temperature table - shown when the chart surface is unavailable
use super::temperature::NormalizedTemperature;

const CITY_HEADER: &str = "城市";
const TEMPERATURE_HEADER: &str = "温度 (°C)";
const FALLBACK_CELL: &str = "--";

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub city: String,
    pub temperature: NormalizedTemperature,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureTable {
    pub rows: Vec<TableRow>,
}

impl TemperatureTable {
    /// Pairs cities with their temperatures by index; callers guarantee equal lengths.
    pub fn new(cities: &[String], temperatures: &[NormalizedTemperature]) -> Self {
        let rows = cities
            .iter()
            .zip(temperatures)
            .map(|(city, temperature)| TableRow {
                city: city.clone(),
                temperature: *temperature,
            })
            .collect();
        Self { rows }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<table class=\"temperature-table\">\n");
        html.push_str(&format!(
            "  <thead><tr><th>{}</th><th>{}</th></tr></thead>\n  <tbody>\n",
            CITY_HEADER, TEMPERATURE_HEADER
        ));

        for row in &self.rows {
            let city = html_escape::encode_text(&row.city);
            if row.temperature.valid {
                html.push_str(&format!(
                    "    <tr><td>{}</td><td>{}</td></tr>\n",
                    city, row.temperature.value
                ));
            } else {
                html.push_str(&format!(
                    "    <tr data-fallback=\"true\"><td>{}</td><td>{}</td></tr>\n",
                    city, FALLBACK_CELL
                ));
            }
        }

        html.push_str("  </tbody>\n</table>");
        html
    }
}
