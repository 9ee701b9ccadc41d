// src/ui/map.rs
use eframe::egui;
use egui_plot::{MarkerShape, Plot, PlotPoint, Points, Text};

use crate::state::map_state::{MapBackend, MapView, MarkerPlacement, TileLayer};
use crate::utils::{mercator_y, plain_attribution, visible_span};

const MARKER_COLOR: egui::Color32 = egui::Color32::from_rgb(198, 40, 40);
const MARKER_RADIUS: f32 = 6.0;
// Pointer distance, in pixels, that still counts as touching a marker
const HIT_RADIUS: f32 = 10.0;

/// Markers drawn on a Web-Mercator plot. Tiles are not rasterised; the
/// layer is kept for its attribution.
#[derive(Debug)]
pub struct EguiMap {
    plot_id: String,
    view: MapView,
    layers: Vec<TileLayer>,
    markers: Vec<MarkerPlacement>,
    reset_bounds: bool,
    open_popup: Option<usize>,
}

impl EguiMap {
    fn marker_point(marker: &MarkerPlacement) -> PlotPoint {
        PlotPoint::new(marker.lon, mercator_y(marker.lat))
    }

    pub fn show(&mut self, ui: &mut egui::Ui, height: f32) {
        let half_span = visible_span(self.view.zoom) / 2.0;
        let center_y = mercator_y(self.view.center_lat);

        let mut plot = Plot::new(&self.plot_id)
            .height(height)
            .data_aspect(1.0)
            .show_axes([false, false])
            .show_x(false)
            .show_y(false)
            .include_x(self.view.center_lon - half_span)
            .include_x(self.view.center_lon + half_span)
            .include_y(center_y - half_span / 2.0)
            .include_y(center_y + half_span / 2.0);
        if self.reset_bounds {
            plot = plot.reset();
            self.reset_bounds = false;
        }

        let markers = &self.markers;
        let open_popup = self.open_popup;

        let response = plot.show(ui, |plot_ui| {
            for marker in markers {
                let point = Self::marker_point(marker);
                plot_ui.points(
                    Points::new(vec![[point.x, point.y]])
                        .shape(MarkerShape::Circle)
                        .radius(MARKER_RADIUS)
                        .filled(true)
                        .color(MARKER_COLOR)
                );
            }

            if let Some(marker) = open_popup.and_then(|i| markers.get(i)) {
                plot_ui.text(
                    Text::new(Self::marker_point(marker), marker.popup.as_str())
                        .anchor(egui::Align2::LEFT_BOTTOM)
                );
            }

            let pointer = plot_ui.pointer_coordinate()?;
            let pointer = plot_ui.screen_from_plot(pointer);
            markers.iter()
                .map(|m| plot_ui.screen_from_plot(Self::marker_point(m)).distance(pointer))
                .enumerate()
                .filter(|(_, distance)| *distance <= HIT_RADIUS)
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(i, _)| i)
        });

        let hovered = response.inner;
        if response.response.clicked() {
            // Clicking the open marker again closes its popup
            self.open_popup = match hovered {
                Some(i) if self.open_popup == Some(i) => None,
                other => other,
            };
        }

        for layer in &self.layers {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                ui.small(plain_attribution(&layer.attribution))
                    .on_hover_text(format!("Tiles: {}", layer.url_template));
            });
        }
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }
}

#[derive(Debug, Default)]
pub struct EguiMapBackend {
    created: u64,
}

impl MapBackend for EguiMapBackend {
    type Map = EguiMap;

    fn create(&mut self, view: MapView) -> EguiMap {
        self.created += 1;
        EguiMap {
            plot_id: format!("attack_map_{}", self.created),
            view,
            layers: Vec::new(),
            markers: Vec::new(),
            reset_bounds: false,
            open_popup: None,
        }
    }

    fn add_tile_layer(&mut self, map: &mut EguiMap, layer: &TileLayer) {
        map.layers.push(layer.clone());
    }

    fn add_marker(&mut self, map: &mut EguiMap, marker: MarkerPlacement) {
        map.markers.push(marker);
    }

    fn invalidate_size(&mut self, map: &mut EguiMap) {
        map.reset_bounds = true;
    }

    fn remove(&mut self, map: EguiMap) {
        tracing::trace!("Dropping {} ({} markers)", map.plot_id, map.markers.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidate_size_resets_bounds_on_next_frame() {
        let mut backend = EguiMapBackend::default();
        let mut map = backend.create(MapView { center_lat: 47.0, center_lon: 2.0, zoom: 3 });
        assert!(!map.reset_bounds);

        backend.invalidate_size(&mut map);
        assert!(map.reset_bounds);
    }

    #[test]
    fn test_markers_use_mercator_projection() {
        let marker = MarkerPlacement { lat: 48.8, lon: 2.3, popup: String::new() };
        let point = EguiMap::marker_point(&marker);
        assert_eq!(point.x, 2.3);
        assert_eq!(point.y, mercator_y(48.8));
    }

    #[test]
    fn test_each_map_gets_fresh_plot_id() {
        let mut backend = EguiMapBackend::default();
        let view = MapView { center_lat: 0.0, center_lon: 0.0, zoom: 1 };
        let first = backend.create(view);
        let second = backend.create(view);
        assert_ne!(first.plot_id, second.plot_id);
    }
}
