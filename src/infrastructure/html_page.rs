// HTML page render context - Emits a Chart.js page or the static table
use crate::application::SurfaceError;
use crate::application::render::{ChartHandle, DrawingSurface, RenderContext};
use crate::domain::chart::ChartConfiguration;
use crate::domain::table::TemperatureTable;
use std::cell::RefCell;
use std::rc::Rc;

type FragmentSlot = Rc<RefCell<Option<String>>>;

/// The `<canvas>` the chart is drawn on.
pub struct CanvasSurface {
    id: String,
}

impl DrawingSurface for CanvasSurface {
    fn element_id(&self) -> &str {
        &self.id
    }
}

/// Chart embedded in the page. Destroying it removes its markup.
pub struct PageChart {
    slot: FragmentSlot,
}

impl ChartHandle for PageChart {
    fn destroy(&mut self) {
        self.slot.borrow_mut().take();
    }
}

#[derive(Debug, Default)]
pub struct HtmlPageContext {
    title: String,
    script_url: Option<String>,
    chart: FragmentSlot,
    table: Option<String>,
}

impl HtmlPageContext {
    pub fn new(title: impl Into<String>, script_url: Option<String>) -> Self {
        Self {
            title: title.into(),
            script_url,
            ..Self::default()
        }
    }

    /// Configured Chart.js URL, if it is non-blank.
    fn chart_library(&self) -> Option<&str> {
        self.script_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }

    pub fn to_html(&self) -> String {
        let script = match (self.chart_library(), self.chart.borrow().is_some()) {
            (Some(url), true) => format!(
                "  <script src=\"{}\"></script>\n",
                html_escape::encode_double_quoted_attribute(url)
            ),
            _ => String::new(),
        };
        let content = self
            .chart
            .borrow()
            .clone()
            .or_else(|| self.table.clone())
            .unwrap_or_default();

        format!(
            "<!DOCTYPE html>\n<html lang=\"zh-CN\">\n<head>\n  <meta charset=\"utf-8\">\n  <title>{}</title>\n{}</head>\n<body>\n<div id=\"chartContainer\" style=\"position: relative; height: 400px;\">\n{}\n</div>\n</body>\n</html>\n",
            html_escape::encode_text(&self.title),
            script,
            content
        )
    }
}

impl RenderContext for HtmlPageContext {
    type Surface = CanvasSurface;
    type Chart = PageChart;

    fn acquire_surface(&mut self, element_id: &str) -> Result<CanvasSurface, SurfaceError> {
        if element_id.trim().is_empty() {
            return Err(SurfaceError::ElementMissing(element_id.to_string()));
        }
        if self.chart_library().is_none() {
            return Err(SurfaceError::ContextUnavailable(
                element_id.to_string(),
                "no charting library configured".to_string(),
            ));
        }
        Ok(CanvasSurface {
            id: element_id.to_string(),
        })
    }

    fn create_chart(
        &mut self,
        surface: CanvasSurface,
        configuration: &ChartConfiguration,
    ) -> Result<PageChart, SurfaceError> {
        let json = serde_json::to_string(configuration).map_err(|e| {
            SurfaceError::ContextUnavailable(surface.element_id().to_string(), e.to_string())
        })?;
        let id = html_escape::encode_double_quoted_attribute(surface.element_id());

        let fragment = format!(
            r#"<canvas id="{id}"></canvas>
<script>
(function () {{
  var config = {json};
  var suffix = config.options.scales.y.ticks.unitSuffix;
  config.options.scales.y.ticks.callback = function (value) {{ return value + suffix; }};
  var ctx = document.getElementById("{id}").getContext("2d");
  if (window.temperatureChart) {{ window.temperatureChart.destroy(); }}
  window.temperatureChart = new Chart(ctx, config);
}})();
</script>"#,
            id = id,
            json = json.replace("</", "<\\/"),
        );

        self.table = None;
        *self.chart.borrow_mut() = Some(fragment);
        Ok(PageChart {
            slot: self.chart.clone(),
        })
    }

    fn show_table(&mut self, table: &TemperatureTable) {
        self.table = Some(table.to_html());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_service::TemperatureChartService;
    use crate::application::render::{ChartRenderer, RenderOutcome};
    use crate::domain::temperature::RawTemperature;
    use crate::infrastructure::config::{ChartSettings, load_app_config_from};

    fn cities() -> Vec<String> {
        vec!["北京".to_string(), "</script>".to_string()]
    }

    fn raw() -> Vec<RawTemperature> {
        vec![RawTemperature::Numeric(1.0), RawTemperature::Missing]
    }

    #[test]
    fn test_page_embeds_chart_when_library_available() {
        let settings = ChartSettings::default();
        let context = HtmlPageContext::new(&settings.title, settings.script_url.clone());
        let mut renderer = ChartRenderer::new(context, TemperatureChartService::new(settings));

        let outcome = renderer.render(&cities(), &raw()).unwrap();
        assert!(matches!(outcome, RenderOutcome::Chart { .. }));

        let html = renderer.context().to_html();
        assert!(html.contains("<canvas id=\"temperatureChart\"></canvas>"));
        assert!(html.contains("new Chart(ctx, config)"));
        assert!(html.contains("chart.js@4.4.0"));
        assert!(html.contains("\"type\":\"bar\""));
        // embedded JSON cannot close the script element early
        assert_eq!(html.matches("</script>").count(), 2);
        assert!(!html.contains("temperature-table"));
    }

    #[test]
    fn test_page_falls_back_to_table_without_library() {
        let settings = ChartSettings {
            script_url: None,
            ..ChartSettings::default()
        };
        let context = HtmlPageContext::new(&settings.title, None);
        let mut renderer = ChartRenderer::new(context, TemperatureChartService::new(settings));

        let outcome = renderer.render(&cities(), &raw()).unwrap();
        assert!(matches!(
            outcome,
            RenderOutcome::Table {
                reason: SurfaceError::ContextUnavailable(..),
                ..
            }
        ));

        let html = renderer.context().to_html();
        assert!(html.contains("temperature-table"));
        assert!(html.contains("&lt;/script&gt;"));
        assert!(!html.contains("<canvas"));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn test_blank_script_url_from_config_falls_back_to_table() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("chart.toml"), "[chart]\nscript_url = \"  \"\n").unwrap();
        let config = load_app_config_from(dir.path().join("chart").to_str().unwrap()).unwrap();
        assert_eq!(config.chart.script_url.as_deref(), Some("  "));

        let context = HtmlPageContext::new(&config.chart.title, config.chart.script_url.clone());
        let mut renderer =
            ChartRenderer::new(context, TemperatureChartService::new(config.chart));

        let outcome = renderer.render(&cities(), &raw()).unwrap();
        assert!(matches!(
            outcome,
            RenderOutcome::Table {
                reason: SurfaceError::ContextUnavailable(..),
                ..
            }
        ));

        let html = renderer.context().to_html();
        assert!(html.contains("temperature-table"));
        assert!(!html.contains("<script"));
        assert!(!html.contains("new Chart("));
    }

    #[test]
    fn test_empty_script_url_has_no_surface() {
        let mut context = HtmlPageContext::new("t", Some(String::new()));
        assert!(matches!(
            context.acquire_surface("temperatureChart"),
            Err(SurfaceError::ContextUnavailable(..))
        ));
    }

    #[test]
    fn test_destroying_chart_clears_markup() {
        let mut context = HtmlPageContext::new("t", Some("chart.js".to_string()));
        let settings = ChartSettings::default();
        let build = TemperatureChartService::new(settings)
            .build_from_columns(&cities(), &raw())
            .unwrap();

        let surface = context.acquire_surface("temperatureChart").unwrap();
        let mut chart = context.create_chart(surface, &build.configuration).unwrap();
        assert!(context.to_html().contains("<canvas"));

        chart.destroy();
        assert!(!context.to_html().contains("<canvas"));
    }
}
