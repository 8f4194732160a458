// Render orchestration - Owns the chart handle and degrades to the static table
use crate::application::chart_service::TemperatureChartService;
use crate::application::{ChartError, SurfaceError};
use crate::domain::chart::{ChartConfiguration, DisplayRange};
use crate::domain::table::TemperatureTable;
use crate::domain::temperature::{RawTemperature, TemperatureAnomaly};

/// An acquired drawing surface, e.g. a canvas with a 2d context.
pub trait DrawingSurface {
    fn element_id(&self) -> &str;
}

/// A live chart created on a surface. Must be destroyed before it is replaced.
pub trait ChartHandle {
    fn destroy(&mut self);
}

/// Capabilities the renderer needs from its environment.
pub trait RenderContext {
    type Surface: DrawingSurface;
    type Chart: ChartHandle;

    fn acquire_surface(&mut self, element_id: &str) -> Result<Self::Surface, SurfaceError>;

    fn create_chart(
        &mut self,
        surface: Self::Surface,
        configuration: &ChartConfiguration,
    ) -> Result<Self::Chart, SurfaceError>;

    fn show_table(&mut self, table: &TemperatureTable);
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    Chart {
        range: DisplayRange,
        anomalies: Vec<TemperatureAnomaly>,
    },
    Table {
        reason: SurfaceError,
        anomalies: Vec<TemperatureAnomaly>,
    },
}

pub struct ChartRenderer<C: RenderContext> {
    context: C,
    element_id: String,
    service: TemperatureChartService,
    current: Option<C::Chart>,
}

impl<C: RenderContext> ChartRenderer<C> {
    pub fn new(context: C, service: TemperatureChartService) -> Self {
        let element_id = service.settings().element_id.clone();
        Self {
            context,
            element_id,
            service,
            current: None,
        }
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    #[cfg(test)]
    pub fn has_chart(&self) -> bool {
        self.current.is_some()
    }

    /// Renders one batch of readings. A surface that cannot be acquired is not
    /// an error: the normalized data is shown as a table instead.
    pub fn render(
        &mut self,
        cities: &[String],
        temperatures: &[RawTemperature],
    ) -> Result<RenderOutcome, ChartError> {
        let readings = self.service.prepare_columns(cities, temperatures)?;

        self.release();

        let surface = match self.context.acquire_surface(&self.element_id) {
            Ok(surface) => surface,
            Err(reason) => {
                tracing::error!("chart surface unavailable, showing table: {}", reason);
                self.context.show_table(&readings.table());
                return Ok(RenderOutcome::Table {
                    reason,
                    anomalies: readings.anomalies,
                });
            }
        };

        let table = readings.table();
        let build = self.service.configure(readings)?;

        match self.context.create_chart(surface, &build.configuration) {
            Ok(chart) => {
                self.current = Some(chart);
                Ok(RenderOutcome::Chart {
                    range: build.range,
                    anomalies: build.readings.anomalies,
                })
            }
            Err(reason) => {
                tracing::error!("chart creation failed, showing table: {}", reason);
                self.context.show_table(&table);
                Ok(RenderOutcome::Table {
                    reason,
                    anomalies: build.readings.anomalies,
                })
            }
        }
    }

    /// Destroys the retained chart, if any.
    pub fn teardown(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut chart) = self.current.take() {
            tracing::debug!("destroying previous chart on '{}'", self.element_id);
            chart.destroy();
        }
    }
}

impl<C: RenderContext> Drop for ChartRenderer<C> {
    fn drop(&mut self) {
        self.release();
    }
}
