// City map domain models
use serde::{Deserialize, Serialize};

pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors";

const HIGHLIGHT_RADIUS_M: f64 = 500.0;
const NORMAL_RADIUS_M: f64 = 300.0;
const FILL_OPACITY: f64 = 0.45;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CongestionPoint {
    pub lat: f64,
    pub lng: f64,
    pub label: String,
}

impl CongestionPoint {
    pub fn new(lat: f64, lng: f64, label: &str) -> Self {
        Self {
            lat,
            lng,
            label: label.to_string(),
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapMode {
    #[default]
    Heatmap,
    Markers,
}

impl MapMode {
    pub fn toggled(self) -> Self {
        match self {
            MapMode::Heatmap => MapMode::Markers,
            MapMode::Markers => MapMode::Heatmap,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
}

impl MapView {
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self { center, zoom }
    }

    pub fn pan(&mut self, center: LatLng, zoom: u8) {
        self.center = center;
        self.zoom = zoom;
    }

    pub fn recenter(&mut self, initial: &MapView) {
        *self = *initial;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MapOverlay {
    Circle {
        center: LatLng,
        radius: f64,
        color: String,
        fill_color: String,
        fill_opacity: f64,
        label: String,
    },
    Marker {
        position: LatLng,
        label: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapData {
    pub view: MapView,
    pub tile_url: String,
    pub attribution: String,
    pub overlays: Vec<MapOverlay>,
}

/// One overlay per congestion point, shaped by mode and highlight, followed
/// by the landmark marker which is drawn in every mode.
pub fn render_overlays(
    points: &[CongestionPoint],
    highlighted: bool,
    mode: MapMode,
    landmark: LatLng,
) -> Vec<MapOverlay> {
    let mut overlays: Vec<MapOverlay> = points
        .iter()
        .map(|point| match mode {
            MapMode::Heatmap => MapOverlay::Circle {
                center: point.position(),
                radius: if highlighted {
                    HIGHLIGHT_RADIUS_M
                } else {
                    NORMAL_RADIUS_M
                },
                color: if highlighted { "orange" } else { "red" }.to_string(),
                fill_color: if highlighted { "#ffd580" } else { "orange" }.to_string(),
                fill_opacity: FILL_OPACITY,
                label: point.label.clone(),
            },
            MapMode::Markers => MapOverlay::Marker {
                position: point.position(),
                label: Some(point.label.clone()),
            },
        })
        .collect();

    overlays.push(MapOverlay::Marker {
        position: landmark,
        label: None,
    });
    overlays
}

pub fn render_map(
    view: MapView,
    points: &[CongestionPoint],
    highlighted: bool,
    mode: MapMode,
    landmark: LatLng,
) -> MapData {
    MapData {
        view,
        tile_url: TILE_URL.to_string(),
        attribution: TILE_ATTRIBUTION.to_string(),
        overlays: render_overlays(points, highlighted, mode, landmark),
    }
}
