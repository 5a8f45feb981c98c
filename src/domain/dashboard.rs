// Dashboard state, actions and the views rendered from them
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::alert::{Banner, EmergencyAlert};
use super::city_map::{render_map, CongestionPoint, LatLng, MapData, MapMode, MapView};
use super::landing::LandingView;
use super::metrics::Metric;
use super::traffic::{ChartData, ChartKind, SeriesBounds, TrafficChart, TrafficSeries};

pub const BRAND: &str = "AIVISTA";
pub const SUBTITLE: &str = "Sensor-first, AI-driven traffic management";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Landing,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toggles {
    pub paused: bool,
    pub highlighted: bool,
    pub map_mode: MapMode,
    pub prediction_mode: bool,
    pub signals_enabled: bool,
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            paused: false,
            highlighted: false,
            map_mode: MapMode::Heatmap,
            prediction_mode: false,
            signals_enabled: true,
        }
    }
}

/// Messages sent up from the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Action {
    EnterDashboard,
    ShowFrontPage,
    TogglePause,
    ToggleHighlight,
    ToggleMapMode,
    TogglePrediction,
    ToggleSignals,
    TriggerEmergency,
    SelectChartKind { kind: ChartKind },
    RecenterMap,
    PanMap { center: LatLng, zoom: u8 },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::EnterDashboard => "enter-dashboard",
            Action::ShowFrontPage => "show-front-page",
            Action::TogglePause => "toggle-pause",
            Action::ToggleHighlight => "toggle-highlight",
            Action::ToggleMapMode => "toggle-map-mode",
            Action::TogglePrediction => "toggle-prediction",
            Action::ToggleSignals => "toggle-signals",
            Action::TriggerEmergency => "trigger-emergency",
            Action::SelectChartKind { .. } => "select-chart-kind",
            Action::RecenterMap => "recenter-map",
            Action::PanMap { .. } => "pan-map",
        }
    }

    /// Actions owned by the mounted chart and map panels rather than the controller.
    pub fn targets_panels(&self) -> bool {
        matches!(
            self,
            Action::SelectChartKind { .. } | Action::RecenterMap | Action::PanMap { .. }
        )
    }
}

/// Controller state. Every transition is a whole-value replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardState {
    pub screen: Screen,
    pub toggles: Toggles,
    pub alert: EmergencyAlert,
}

impl DashboardState {
    pub fn new(alert: EmergencyAlert) -> Self {
        Self {
            screen: Screen::Landing,
            toggles: Toggles::default(),
            alert,
        }
    }

    pub fn landing_visible(&self) -> bool {
        self.screen == Screen::Landing
    }

    pub fn enter_dashboard(self) -> Self {
        Self {
            screen: Screen::Dashboard,
            ..self
        }
    }

    pub fn show_front_page(self) -> Self {
        Self {
            screen: Screen::Landing,
            ..self
        }
    }

    pub fn toggle_pause(mut self) -> Self {
        self.toggles.paused = !self.toggles.paused;
        self
    }

    pub fn toggle_highlight(mut self) -> Self {
        self.toggles.highlighted = !self.toggles.highlighted;
        self
    }

    pub fn toggle_map_mode(mut self) -> Self {
        self.toggles.map_mode = self.toggles.map_mode.toggled();
        self
    }

    pub fn toggle_prediction(mut self) -> Self {
        self.toggles.prediction_mode = !self.toggles.prediction_mode;
        self
    }

    pub fn toggle_signals(mut self) -> Self {
        self.toggles.signals_enabled = !self.toggles.signals_enabled;
        self
    }

    /// Installs `alert` as the active alert, discarding whatever was there.
    pub fn trigger_emergency(self, alert: &EmergencyAlert) -> Self {
        Self {
            alert: EmergencyAlert {
                active: true,
                ..alert.clone()
            },
            ..self
        }
    }

    /// Applies a controller action. Panel actions leave the controller untouched.
    pub fn apply(self, action: &Action, trigger: &EmergencyAlert) -> Self {
        match action {
            Action::EnterDashboard => self.enter_dashboard(),
            Action::ShowFrontPage => self.show_front_page(),
            Action::TogglePause => self.toggle_pause(),
            Action::ToggleHighlight => self.toggle_highlight(),
            Action::ToggleMapMode => self.toggle_map_mode(),
            Action::TogglePrediction => self.toggle_prediction(),
            Action::ToggleSignals => self.toggle_signals(),
            Action::TriggerEmergency => self.trigger_emergency(trigger),
            Action::SelectChartKind { .. } | Action::RecenterMap | Action::PanMap { .. } => self,
        }
    }
}

/// Static content and limits the views are rendered from.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub labels: Vec<String>,
    pub initial_values: Vec<f64>,
    pub bounds: SeriesBounds,
    pub initial_view: MapView,
    pub congestion: Vec<CongestionPoint>,
    pub landmark: LatLng,
    pub metrics: Vec<Metric>,
    pub trigger_alert: EmergencyAlert,
}

/// Panel state that only exists while the dashboard screen is mounted.
#[derive(Debug, Clone, PartialEq)]
pub struct MountedPanels {
    pub chart: TrafficChart,
    pub map_view: MapView,
}

impl MountedPanels {
    pub fn mount(catalog: &Catalog) -> Self {
        Self {
            chart: TrafficChart::new(TrafficSeries::new(
                catalog.labels.clone(),
                catalog.initial_values.clone(),
            )),
            map_view: catalog.initial_view,
        }
    }

    pub fn apply(&mut self, action: &Action, catalog: &Catalog) {
        match action {
            Action::SelectChartKind { kind } => self.chart.select_kind(*kind),
            Action::RecenterMap => self.map_view.recenter(&catalog.initial_view),
            Action::PanMap { center, zoom } => self.map_view.pan(*center, *zoom),
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub brand: String,
    pub subtitle: String,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            brand: BRAND.to_string(),
            subtitle: SUBTITLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub header: Header,
    pub banner: Option<Banner>,
    pub controls: Toggles,
    pub chart: ChartData,
    pub map: MapData,
    pub metrics: Vec<Metric>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "lowercase")]
pub enum ScreenView {
    Landing(LandingView),
    Dashboard(DashboardView),
}

/// Immutable picture of the dashboard handed to the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub revision: u64,
    pub generated_at: DateTime<Utc>,
    pub state: DashboardState,
    pub view: ScreenView,
}

#[cfg(test)]
impl DashboardSnapshot {
    pub fn chart(&self) -> Option<&ChartData> {
        match &self.view {
            ScreenView::Dashboard(view) => Some(&view.chart),
            ScreenView::Landing(_) => None,
        }
    }
}

/// One render pass. While the landing screen is up nothing else is consulted.
pub fn render_view<R: Rng + ?Sized>(
    state: &DashboardState,
    panels: Option<&MountedPanels>,
    catalog: &Catalog,
    rng: &mut R,
) -> ScreenView {
    match panels {
        Some(panels) if state.screen == Screen::Dashboard => {
            let toggles = state.toggles;
            ScreenView::Dashboard(DashboardView {
                header: Header::default(),
                banner: state.alert.banner(),
                controls: toggles,
                chart: panels
                    .chart
                    .render(toggles.prediction_mode, rng, &catalog.bounds),
                map: render_map(
                    panels.map_view,
                    &catalog.congestion,
                    toggles.highlighted,
                    toggles.map_mode,
                    catalog.landmark,
                ),
                metrics: catalog.metrics.clone(),
            })
        }
        _ => ScreenView::Landing(LandingView::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::city_map::MapOverlay;
    use crate::domain::metrics::default_metrics;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog() -> Catalog {
        Catalog {
            labels: ["08:00", "09:00", "10:00", "11:00", "12:00", "13:00"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            initial_values: vec![60.0, 90.0, 70.0, 100.0, 85.0, 65.0],
            bounds: SeriesBounds::default(),
            initial_view: MapView::new(LatLng::new(22.5726, 88.3639), 13),
            congestion: vec![
                CongestionPoint::new(22.565, 88.370, "High Congestion – Esplanade"),
                CongestionPoint::new(22.574, 88.360, "Moderate Congestion – Park Street"),
            ],
            landmark: LatLng::new(22.57, 88.365),
            metrics: default_metrics(),
            trigger_alert: EmergencyAlert::fire_truck(),
        }
    }

    #[test]
    fn test_initial_state() {
        let state = DashboardState::new(EmergencyAlert::ambulance());
        assert!(state.landing_visible());
        assert_eq!(state.toggles, Toggles::default());
        assert!(state.toggles.signals_enabled);
        assert!(state.alert.active);
    }

    #[test]
    fn test_round_trip_preserves_toggles() {
        let trigger = EmergencyAlert::fire_truck();
        let state = DashboardState::new(EmergencyAlert::ambulance())
            .apply(&Action::EnterDashboard, &trigger)
            .apply(&Action::TogglePause, &trigger)
            .apply(&Action::ToggleMapMode, &trigger)
            .apply(&Action::ToggleSignals, &trigger);
        let before = state.toggles;

        let state = state.apply(&Action::ShowFrontPage, &trigger);
        assert!(state.landing_visible());
        let state = state.apply(&Action::EnterDashboard, &trigger);
        assert_eq!(state.screen, Screen::Dashboard);
        assert_eq!(state.toggles, before);
    }

    #[test]
    fn test_double_toggles_are_identity() {
        let trigger = EmergencyAlert::fire_truck();
        let start = DashboardState::new(EmergencyAlert::ambulance());
        for action in [
            Action::TogglePause,
            Action::ToggleHighlight,
            Action::ToggleMapMode,
            Action::TogglePrediction,
            Action::ToggleSignals,
        ] {
            let once = start.clone().apply(&action, &trigger);
            assert_ne!(once, start, "{}", action.name());
            let twice = once.apply(&action, &trigger);
            assert_eq!(twice, start, "{}", action.name());
        }
    }

    #[test]
    fn test_trigger_emergency_overwrites_alert() {
        let trigger = EmergencyAlert::fire_truck();
        let quiet = EmergencyAlert {
            active: false,
            kind: "Old".into(),
            message: "stale".into(),
        };
        let state = DashboardState::new(quiet).trigger_emergency(&trigger);
        assert!(state.alert.active);
        assert_eq!(state.alert, trigger);

        let again = state.clone().trigger_emergency(&trigger);
        assert_eq!(again, state);
    }

    #[test]
    fn test_trigger_forces_active_even_if_template_is_inactive() {
        let template = EmergencyAlert {
            active: false,
            ..EmergencyAlert::fire_truck()
        };
        let state = DashboardState::new(EmergencyAlert::ambulance()).trigger_emergency(&template);
        assert!(state.alert.active);
        assert_eq!(state.alert.kind, "Fire Truck Detected");
    }

    #[test]
    fn test_panel_actions_do_not_touch_controller() {
        let trigger = EmergencyAlert::fire_truck();
        let state = DashboardState::new(EmergencyAlert::ambulance());
        let action = Action::SelectChartKind {
            kind: ChartKind::Pie,
        };
        assert!(action.targets_panels());
        assert_eq!(state.clone().apply(&action, &trigger), state);
    }

    #[test]
    fn test_action_wire_format() {
        let action: Action = serde_json::from_str(r#"{"action":"toggle-map-mode"}"#).unwrap();
        assert_eq!(action, Action::ToggleMapMode);

        let action: Action =
            serde_json::from_str(r#"{"action":"select-chart-kind","kind":"bar"}"#).unwrap();
        assert_eq!(
            action,
            Action::SelectChartKind {
                kind: ChartKind::Bar
            }
        );

        let action: Action = serde_json::from_str(
            r#"{"action":"pan-map","center":{"lat":1.5,"lng":2.5},"zoom":9}"#,
        )
        .unwrap();
        assert_eq!(action.name(), "pan-map");
    }

    #[test]
    fn test_mounted_panels_handle_map_actions() {
        let catalog = catalog();
        let mut panels = MountedPanels::mount(&catalog);
        panels.apply(
            &Action::PanMap {
                center: LatLng::new(1.0, 2.0),
                zoom: 4,
            },
            &catalog,
        );
        assert_eq!(panels.map_view.zoom, 4);

        panels.apply(&Action::RecenterMap, &catalog);
        assert_eq!(panels.map_view, catalog.initial_view);
    }

    #[test]
    fn test_landing_view_ignores_panels() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(5);
        let state = DashboardState::new(EmergencyAlert::ambulance());
        let panels = MountedPanels::mount(&catalog);

        let view = render_view(&state, Some(&panels), &catalog, &mut rng);
        assert!(matches!(view, ScreenView::Landing(_)));
    }

    #[test]
    fn test_dashboard_view_reflects_toggles() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(5);
        let state = DashboardState::new(EmergencyAlert::ambulance())
            .enter_dashboard()
            .toggle_map_mode()
            .toggle_prediction();
        let panels = MountedPanels::mount(&catalog);

        let view = match render_view(&state, Some(&panels), &catalog, &mut rng) {
            ScreenView::Dashboard(view) => view,
            other => panic!("expected dashboard, got {other:?}"),
        };
        assert_eq!(view.banner.unwrap().kind, "Ambulance Detected");
        assert_eq!(view.chart.series.len(), 2);
        assert!(view
            .map
            .overlays
            .iter()
            .all(|o| matches!(o, MapOverlay::Marker { .. })));
        assert_eq!(view.metrics.len(), 3);
    }

    #[test]
    fn test_snapshot_serializes_screen_tag() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(5);
        let state = DashboardState::new(EmergencyAlert::ambulance());
        let snapshot = DashboardSnapshot {
            revision: 1,
            generated_at: Utc::now(),
            view: render_view(&state, None, &catalog, &mut rng),
            state,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["view"]["screen"], "landing");
        assert_eq!(json["state"]["screen"], "landing");
        assert_eq!(json["state"]["toggles"]["map_mode"], "heatmap");
        assert!(snapshot.chart().is_none());
    }
}
