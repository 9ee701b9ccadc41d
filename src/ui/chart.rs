// src/ui/chart.rs
use eframe::egui;
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, Text};

use crate::state::chart_state::{BarChartConfig, ChartBackend, Rgba};

const CHART_HEIGHT: f32 = 260.0;

fn color(rgba: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(
        rgba.r,
        rgba.g,
        rgba.b,
        (rgba.alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

/// Retained bar chart. Each instance gets its own plot id so no zoom or
/// bounds leak from the chart it replaced.
#[derive(Debug)]
pub struct EguiBarChart {
    plot_id: String,
    config: BarChartConfig,
}

impl EguiBarChart {
    pub fn show(&self, ui: &mut egui::Ui) {
        let config = &self.config;
        let max = config.values.iter().cloned().fold(0.0, f64::max);

        let mut plot = Plot::new(&self.plot_id)
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .show_axes([false, true])
            // Leave room for the labels drawn above each bar
            .include_y(max * 1.15);
        if config.begin_at_zero {
            plot = plot.include_y(0.0);
        }
        if !config.responsive {
            plot = plot.width(ui.available_width().min(480.0));
        }

        let fill = color(config.fill);
        let stroke = egui::Stroke::new(config.border_width, color(config.border));

        plot.show(ui, |plot_ui| {
            let bars: Vec<Bar> = config.labels.iter()
                .zip(&config.values)
                .enumerate()
                .map(|(i, (label, value))| {
                    Bar::new(i as f64, *value)
                        .name(label)
                        .width(0.6)
                        .fill(fill)
                        .stroke(stroke)
                })
                .collect();

            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name(&config.series_label)
                    .color(color(config.border))
            );

            for (i, (label, value)) in config.labels.iter().zip(&config.values).enumerate() {
                plot_ui.text(
                    Text::new(PlotPoint::new(i as f64, *value), label.as_str())
                        .anchor(egui::Align2::CENTER_BOTTOM)
                );
            }
        });
    }
}

#[derive(Debug, Default)]
pub struct EguiChartBackend {
    created: u64,
}

impl ChartBackend for EguiChartBackend {
    type Chart = EguiBarChart;

    fn create(&mut self, config: BarChartConfig) -> EguiBarChart {
        self.created += 1;
        EguiBarChart {
            plot_id: format!("ip_chart_{}", self.created),
            config,
        }
    }

    fn destroy(&mut self, chart: EguiBarChart) {
        tracing::trace!("Dropping {}", chart.plot_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RankedEntry;
    use crate::state::chart_state::{BAR_BORDER, BAR_FILL};

    #[test]
    fn test_colors() {
        assert_eq!(color(BAR_BORDER), egui::Color32::from_rgb(26, 35, 126));
        let alpha = color(BAR_FILL).a();
        assert!((178..=179).contains(&alpha));
    }

    #[test]
    fn test_each_chart_gets_fresh_plot_id() {
        let mut backend = EguiChartBackend::default();
        let series = [RankedEntry::new("10.0.0.1", 4)];
        let first = backend.create(BarChartConfig::from_series(&series));
        let second = backend.create(BarChartConfig::from_series(&series));
        assert_ne!(first.plot_id, second.plot_id);
        backend.destroy(first);
        backend.destroy(second);
    }
}
