// Application state for HTTP handlers
use crate::application::chart_service::TemperatureChartService;

#[derive(Clone)]
pub struct AppState {
    pub chart_service: TemperatureChartService,
}
