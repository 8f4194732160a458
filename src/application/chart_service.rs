// Chart service - Use case for turning city readings into a chart configuration
use crate::application::ChartError;
use crate::application::chart_builder::build_chart_configuration;
use crate::application::normalizer::{NormalizedBatch, normalize_all};
use crate::application::range::compute_display_range;
use crate::domain::chart::{ChartConfiguration, DisplayRange};
use crate::domain::table::TemperatureTable;
use crate::domain::temperature::{
    CityTemperatureSample, NormalizedTemperature, RawTemperature, TemperatureAnomaly,
};
use crate::infrastructure::config::ChartSettings;

/// Normalized readings for one batch, index-aligned with `cities`.
#[derive(Debug, Clone)]
pub struct PreparedReadings {
    pub cities: Vec<String>,
    pub normalized: Vec<NormalizedTemperature>,
    pub anomalies: Vec<TemperatureAnomaly>,
}

impl PreparedReadings {
    pub fn values(&self) -> Vec<f64> {
        self.normalized.iter().map(|t| t.value).collect()
    }

    pub fn table(&self) -> TemperatureTable {
        TemperatureTable::new(&self.cities, &self.normalized)
    }
}

#[derive(Debug, Clone)]
pub struct ChartBuild {
    pub configuration: ChartConfiguration,
    pub readings: PreparedReadings,
    pub range: DisplayRange,
}

#[derive(Debug, Clone)]
pub struct TemperatureChartService {
    settings: ChartSettings,
}

impl TemperatureChartService {
    pub fn new(settings: ChartSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn prepare(&self, samples: &[CityTemperatureSample]) -> PreparedReadings {
        let NormalizedBatch { values, anomalies } = normalize_all(samples);

        if !anomalies.is_empty() {
            tracing::info!(
                "{} of {} temperature readings replaced by fallback",
                anomalies.len(),
                samples.len()
            );
        }

        PreparedReadings {
            cities: samples.iter().map(|s| s.city.clone()).collect(),
            normalized: values,
            anomalies,
        }
    }

    /// Zips the two columns into samples; unequal lengths are rejected rather
    /// than truncated.
    pub fn prepare_columns(
        &self,
        cities: &[String],
        temperatures: &[RawTemperature],
    ) -> Result<PreparedReadings, ChartError> {
        if cities.len() != temperatures.len() {
            return Err(ChartError::LengthMismatch {
                cities: cities.len(),
                temperatures: temperatures.len(),
            });
        }

        let samples: Vec<CityTemperatureSample> = cities
            .iter()
            .zip(temperatures)
            .map(|(city, raw)| CityTemperatureSample::new(city.clone(), raw.clone()))
            .collect();

        Ok(self.prepare(&samples))
    }

    pub fn configure(&self, readings: PreparedReadings) -> Result<ChartBuild, ChartError> {
        let range = compute_display_range(&readings.normalized, self.settings.range_policy);
        tracing::debug!(
            min = range.min,
            max = range.max,
            policy = ?self.settings.range_policy,
            "computed temperature display range"
        );

        let configuration =
            build_chart_configuration(&readings.cities, &readings.values(), range, &self.settings)?;

        Ok(ChartBuild {
            configuration,
            readings,
            range,
        })
    }

    #[cfg(test)]
    pub fn build(&self, samples: &[CityTemperatureSample]) -> Result<ChartBuild, ChartError> {
        self.configure(self.prepare(samples))
    }

    pub fn build_from_columns(
        &self,
        cities: &[String],
        temperatures: &[RawTemperature],
    ) -> Result<ChartBuild, ChartError> {
        self.configure(self.prepare_columns(cities, temperatures)?)
    }
}
