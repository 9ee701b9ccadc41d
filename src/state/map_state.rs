// src/state/map_state.rs
use std::time::{Duration, Instant};

use crate::config::{GeoRecord, MapSettings};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPlacement {
    pub lat: f64,
    pub lon: f64,
    pub popup: String,
}

/// A map widget bound to a single container. Instances must be removed
/// before another one is created for the same container.
pub trait MapBackend {
    type Map;

    fn create(&mut self, view: MapView) -> Self::Map;
    fn add_tile_layer(&mut self, map: &mut Self::Map, layer: &TileLayer);
    fn add_marker(&mut self, map: &mut Self::Map, marker: MarkerPlacement);
    fn invalidate_size(&mut self, map: &mut Self::Map);
    fn remove(&mut self, map: Self::Map);
}

struct LiveMap<M> {
    generation: u64,
    map: M,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingResize {
    generation: u64,
    due: Instant,
}

/// Owns at most one live map. Each render replaces it with a fresh
/// generation; a resize armed for an older generation is dropped.
pub struct MapLifecycleManager<B: MapBackend> {
    backend: B,
    live: Option<LiveMap<B::Map>>,
    generation: u64,
    view: MapView,
    tile_layer: TileLayer,
    resize_delay: Duration,
    pending_resize: Option<PendingResize>,
}

impl<B: MapBackend> MapLifecycleManager<B> {
    pub fn new(backend: B, settings: &MapSettings) -> Self {
        Self {
            backend,
            live: None,
            generation: 0,
            view: MapView {
                center_lat: settings.center_lat,
                center_lon: settings.center_lon,
                zoom: settings.zoom,
            },
            tile_layer: TileLayer {
                url_template: settings.tile_url.clone(),
                attribution: settings.attribution.clone(),
            },
            resize_delay: settings.resize_delay(),
            pending_resize: None,
        }
    }

    /// Rebuilds the map from scratch and returns how many markers were placed.
    pub fn render(&mut self, points: &[GeoRecord]) -> usize {
        self.clear();

        self.generation += 1;
        let mut map = self.backend.create(self.view);
        self.backend.add_tile_layer(&mut map, &self.tile_layer);

        let mut placed = 0;
        for point in points.iter().filter(|p| p.is_located()) {
            self.backend.add_marker(&mut map, MarkerPlacement {
                lat: point.lat,
                lon: point.lon,
                popup: point.popup_text(),
            });
            placed += 1;
        }

        let skipped = points.len() - placed;
        if skipped > 0 {
            tracing::debug!("{} addresses could not be geolocated", skipped);
        }
        tracing::debug!("Created map #{} with {} markers", self.generation, placed);

        self.live = Some(LiveMap { generation: self.generation, map });
        placed
    }

    pub fn clear(&mut self) {
        if let Some(live) = self.live.take() {
            tracing::debug!("Removing map #{}", live.generation);
            self.backend.remove(live.map);
        }
        self.pending_resize = None;
    }

    /// Arms the size fix-up for the current map. The container was probably
    /// hidden when the map was created.
    pub fn schedule_resize(&mut self, now: Instant) {
        if let Some(live) = &self.live {
            self.pending_resize = Some(PendingResize {
                generation: live.generation,
                due: now + self.resize_delay,
            });
        }
    }

    /// Called with the container's laid-out size. A non-zero size means the
    /// container is visible, so a pending fix-up runs right away.
    pub fn observe_container(&mut self, size: [f32; 2]) -> bool {
        if size[0] <= 0.0 || size[1] <= 0.0 {
            return false;
        }
        self.fire_pending()
    }

    /// Timer fallback for environments that never report a size.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending_resize {
            Some(pending) if pending.due <= now => self.fire_pending(),
            _ => false,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending_resize.map(|p| p.due)
    }

    fn fire_pending(&mut self) -> bool {
        let Some(pending) = self.pending_resize.take() else {
            return false;
        };

        match self.live.as_mut() {
            Some(live) if live.generation == pending.generation => {
                tracing::trace!("Recalculating size of map #{}", live.generation);
                self.backend.invalidate_size(&mut live.map);
                true
            }
            _ => {
                tracing::trace!("Dropping resize for removed map #{}", pending.generation);
                false
            }
        }
    }

    pub fn current(&self) -> Option<&B::Map> {
        self.live.as_ref().map(|live| &live.map)
    }

    pub fn current_mut(&mut self) -> Option<&mut B::Map> {
        self.live.as_mut().map(|live| &mut live.map)
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::BTreeSet;

    #[derive(Debug)]
    pub struct RecordedMap {
        pub id: u64,
        pub view: MapView,
        pub layers: Vec<TileLayer>,
        pub markers: Vec<MarkerPlacement>,
        pub resized: u32,
    }

    #[derive(Debug, Default)]
    pub struct RecordingMapBackend {
        pub created: u64,
        pub live: BTreeSet<u64>,
        pub resizes: Vec<u64>,
    }

    impl MapBackend for RecordingMapBackend {
        type Map = RecordedMap;

        fn create(&mut self, view: MapView) -> RecordedMap {
            assert!(self.live.is_empty(), "container already has a map");
            self.created += 1;
            self.live.insert(self.created);
            RecordedMap {
                id: self.created,
                view,
                layers: Vec::new(),
                markers: Vec::new(),
                resized: 0,
            }
        }

        fn add_tile_layer(&mut self, map: &mut RecordedMap, layer: &TileLayer) {
            map.layers.push(layer.clone());
        }

        fn add_marker(&mut self, map: &mut RecordedMap, marker: MarkerPlacement) {
            map.markers.push(marker);
        }

        fn invalidate_size(&mut self, map: &mut RecordedMap) {
            assert!(self.live.contains(&map.id), "resized a removed map");
            map.resized += 1;
            self.resizes.push(map.id);
        }

        fn remove(&mut self, map: RecordedMap) {
            assert!(self.live.remove(&map.id), "map {} removed twice", map.id);
        }
    }
}
