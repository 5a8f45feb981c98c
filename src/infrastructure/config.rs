use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use crate::domain::alert::EmergencyAlert;
use crate::domain::city_map::{CongestionPoint, LatLng, MapView};
use crate::domain::dashboard::Catalog;
use crate::domain::metrics::{default_metrics, Metric};
use crate::domain::traffic::SeriesBounds;
use crate::infrastructure::error::ConfigError;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub chart: ChartSettings,
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default = "default_metrics")]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub alerts: AlertSettings,
    /// Fixed RNG seed; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            chart: ChartSettings::default(),
            map: MapSettings::default(),
            metrics: default_metrics(),
            alerts: AlertSettings::default(),
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSettings {
    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: u64,
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,
    #[serde(default = "default_initial_values")]
    pub initial_values: Vec<f64>,
    #[serde(default = "default_jitter")]
    pub jitter: f64,
    #[serde(default = "default_min")]
    pub min: f64,
    #[serde(default = "default_max")]
    pub max: f64,
    #[serde(default = "default_forecast_low")]
    pub forecast_low: f64,
    #[serde(default = "default_forecast_high")]
    pub forecast_high: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            tick_interval_secs: default_tick_interval_secs(),
            labels: default_labels(),
            initial_values: default_initial_values(),
            jitter: default_jitter(),
            min: default_min(),
            max: default_max(),
            forecast_low: default_forecast_low(),
            forecast_high: default_forecast_high(),
        }
    }
}

impl ChartSettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }

    pub fn bounds(&self) -> SeriesBounds {
        SeriesBounds {
            jitter: self.jitter,
            min: self.min,
            max: self.max,
            forecast_low: self.forecast_low,
            forecast_high: self.forecast_high,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapSettings {
    #[serde(default = "default_center")]
    pub center: LatLng,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default = "default_congestion")]
    pub congestion: Vec<CongestionPoint>,
    #[serde(default = "default_landmark")]
    pub landmark: LatLng,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: default_center(),
            zoom: default_zoom(),
            congestion: default_congestion(),
            landmark: default_landmark(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertSettings {
    #[serde(default = "EmergencyAlert::ambulance")]
    pub initial: EmergencyAlert,
    #[serde(default = "EmergencyAlert::fire_truck")]
    pub trigger: EmergencyAlert,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            initial: EmergencyAlert::ambulance(),
            trigger: EmergencyAlert::fire_truck(),
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_tick_interval_secs() -> u64 {
    5
}

fn default_labels() -> Vec<String> {
    ["08:00", "09:00", "10:00", "11:00", "12:00", "13:00"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_initial_values() -> Vec<f64> {
    vec![60.0, 90.0, 70.0, 100.0, 85.0, 65.0]
}

fn default_jitter() -> f64 {
    10.0
}

fn default_min() -> f64 {
    40.0
}

fn default_max() -> f64 {
    120.0
}

fn default_forecast_low() -> f64 {
    -5.0
}

fn default_forecast_high() -> f64 {
    10.0
}

fn default_center() -> LatLng {
    LatLng::new(22.5726, 88.3639)
}

fn default_zoom() -> u8 {
    13
}

fn default_congestion() -> Vec<CongestionPoint> {
    vec![
        CongestionPoint::new(22.565, 88.370, "High Congestion – Esplanade"),
        CongestionPoint::new(22.574, 88.360, "Moderate Congestion – Park Street"),
    ]
}

fn default_landmark() -> LatLng {
    LatLng::new(22.57, 88.365)
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let chart = &self.chart;
        if chart.tick_interval_secs == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if chart.labels.is_empty() {
            return Err(ConfigError::EmptySeries);
        }
        if chart.labels.len() != chart.initial_values.len() {
            return Err(ConfigError::SeriesLengthMismatch {
                labels: chart.labels.len(),
                values: chart.initial_values.len(),
            });
        }
        let numbers = [
            chart.jitter,
            chart.min,
            chart.max,
            chart.forecast_low,
            chart.forecast_high,
        ];
        if numbers
            .iter()
            .chain(&chart.initial_values)
            .any(|n| !n.is_finite())
        {
            return Err(ConfigError::NonFinite);
        }
        if chart.min > chart.max {
            return Err(ConfigError::InvertedClamp {
                min: chart.min,
                max: chart.max,
            });
        }
        if chart.jitter < 0.0 {
            return Err(ConfigError::NegativeJitter(chart.jitter));
        }
        if chart.forecast_low >= chart.forecast_high {
            return Err(ConfigError::EmptyForecastRange {
                low: chart.forecast_low,
                high: chart.forecast_high,
            });
        }
        // Uniform sampling needs the width of each range to be finite.
        if !(2.0 * chart.jitter).is_finite() {
            return Err(ConfigError::RangeOverflow { field: "chart.jitter" });
        }
        if !(chart.forecast_high - chart.forecast_low).is_finite() {
            return Err(ConfigError::RangeOverflow { field: "chart.forecast" });
        }
        Ok(())
    }

    pub fn catalog(&self) -> Catalog {
        Catalog {
            labels: self.chart.labels.clone(),
            initial_values: self.chart.initial_values.clone(),
            bounds: self.chart.bounds(),
            initial_view: MapView::new(self.map.center, self.map.zoom),
            congestion: self.map.congestion.clone(),
            landmark: self.map.landmark,
            metrics: self.metrics.clone(),
            trigger_alert: self.alerts.trigger.clone(),
        }
    }
}

/// Reads `config/dashboard.*` when present, then `DASHBOARD__*` environment overrides.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    let dashboard: DashboardConfig = settings.try_deserialize()?;
    dashboard.validate()?;
    Ok(dashboard)
}
