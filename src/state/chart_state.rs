// src/state/chart_state.rs
use crate::config::RankedEntry;

pub const SERIES_LABEL: &str = "Nº de Intentos Fallidos";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self { r, g, b, alpha }
    }
}

pub const BAR_FILL: Rgba = Rgba::new(26, 35, 126, 0.7);
pub const BAR_BORDER: Rgba = Rgba::new(26, 35, 126, 1.0);

/// Everything a backend needs to draw the top-addresses chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartConfig {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub series_label: String,
    pub fill: Rgba,
    pub border: Rgba,
    pub border_width: f32,
    pub responsive: bool,
    pub begin_at_zero: bool,
}

impl BarChartConfig {
    pub fn from_series(series: &[RankedEntry]) -> Self {
        let (labels, values) = series
            .iter()
            .map(|entry| (entry.label().to_string(), entry.count() as f64))
            .unzip();

        Self {
            labels,
            values,
            series_label: SERIES_LABEL.to_string(),
            fill: BAR_FILL,
            border: BAR_BORDER,
            border_width: 1.0,
            responsive: true,
            begin_at_zero: true,
        }
    }
}

/// A charting widget whose instances must be torn down explicitly.
pub trait ChartBackend {
    type Chart;

    fn create(&mut self, config: BarChartConfig) -> Self::Chart;
    fn destroy(&mut self, chart: Self::Chart);
}

/// Owns at most one live chart and replaces it on every render.
pub struct ChartLifecycleManager<B: ChartBackend> {
    backend: B,
    chart: Option<B::Chart>,
}

impl<B: ChartBackend> ChartLifecycleManager<B> {
    pub fn new(backend: B) -> Self {
        Self { backend, chart: None }
    }

    pub fn render(&mut self, series: &[RankedEntry]) {
        self.clear();
        let config = BarChartConfig::from_series(series);
        tracing::debug!("Creating chart with {} bars", config.labels.len());
        self.chart = Some(self.backend.create(config));
    }

    pub fn clear(&mut self) {
        if let Some(chart) = self.chart.take() {
            tracing::debug!("Destroying previous chart");
            self.backend.destroy(chart);
        }
    }

    pub fn current(&self) -> Option<&B::Chart> {
        self.chart.as_ref()
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}
