// Traffic chart domain models
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const CHART_TITLE: &str = "Traffic Congestion (Live)";

const PIE_PALETTE: [&str; 6] = [
    "#4f46e5", "#14b8a6", "#f59e0b", "#ef4444", "#22c55e", "#3b82f6",
];

/// Limits for the random walk and the forecast offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesBounds {
    pub jitter: f64,
    pub min: f64,
    pub max: f64,
    pub forecast_low: f64,
    pub forecast_high: f64,
}

impl Default for SeriesBounds {
    fn default() -> Self {
        Self {
            jitter: 10.0,
            min: 40.0,
            max: 120.0,
            forecast_low: -5.0,
            forecast_high: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplePoint {
    pub label: String,
    pub value: f64,
}

impl SamplePoint {
    pub fn new(label: String, value: f64) -> Self {
        Self { label, value }
    }
}

/// Fixed time labels paired with the current vehicle counts. Values are
/// overwritten on every tick, never appended.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficSeries {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl TrafficSeries {
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(labels.len(), values.len());
        Self { labels, values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Moves every sample by a uniform offset in `[-jitter, jitter)` and
    /// clamps the result to `[min, max]`.
    pub fn jitter<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: &SeriesBounds) {
        for value in &mut self.values {
            let offset = if bounds.jitter > 0.0 {
                rng.gen_range(-bounds.jitter..bounds.jitter)
            } else {
                0.0
            };
            *value = (*value + offset).clamp(bounds.min, bounds.max);
        }
    }

    /// Current values shifted by `[forecast_low, forecast_high)`. Not clamped.
    pub fn forecast<R: Rng + ?Sized>(&self, rng: &mut R, bounds: &SeriesBounds) -> Vec<f64> {
        self.values
            .iter()
            .map(|v| v + rng.gen_range(bounds.forecast_low..bounds.forecast_high))
            .collect()
    }

    fn points(&self, values: &[f64]) -> Vec<SamplePoint> {
        self.labels
            .iter()
            .zip(values)
            .map(|(label, value)| SamplePoint::new(label.clone(), *value))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Pie,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SeriesStyle {
    Line {
        width: u32,
        dashed: bool,
        marker_size: u32,
    },
    Bar,
    Pie {
        palette: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub style: SeriesStyle,
    pub points: Vec<SamplePoint>,
}

impl SeriesData {
    pub fn new(
        id: &str,
        name: &str,
        color: Option<&str>,
        style: SeriesStyle,
        points: Vec<SamplePoint>,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.map(str::to_string),
            style,
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub title: String,
    pub kind: ChartKind,
    pub series: Vec<SeriesData>,
}

/// Chart panel state: the live series plus the selected display kind.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficChart {
    series: TrafficSeries,
    kind: ChartKind,
}

impl TrafficChart {
    pub fn new(series: TrafficSeries) -> Self {
        Self {
            series,
            kind: ChartKind::default(),
        }
    }

    pub fn series(&self) -> &TrafficSeries {
        &self.series
    }

    pub fn select_kind(&mut self, kind: ChartKind) {
        self.kind = kind;
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: &SeriesBounds) {
        self.series.jitter(rng, bounds);
    }

    /// Builds the chart description for one render pass. The forecast is
    /// drawn fresh each time and only survives into line charts.
    pub fn render<R: Rng + ?Sized>(
        &self,
        prediction_mode: bool,
        rng: &mut R,
        bounds: &SeriesBounds,
    ) -> ChartData {
        let predicted = self.series.forecast(rng, bounds);
        let current = self.series.points(self.series.values());

        let series = match self.kind {
            ChartKind::Line => {
                let mut series = vec![SeriesData::new(
                    "current",
                    "Current Vehicles",
                    Some("#4f46e5"),
                    SeriesStyle::Line {
                        width: 4,
                        dashed: false,
                        marker_size: 12,
                    },
                    current,
                )];
                if prediction_mode {
                    series.push(SeriesData::new(
                        "forecast",
                        "Forecast (15min)",
                        Some("#f59e0b"),
                        SeriesStyle::Line {
                            width: 3,
                            dashed: true,
                            marker_size: 10,
                        },
                        self.series.points(&predicted),
                    ));
                }
                series
            }
            ChartKind::Bar => vec![SeriesData::new(
                "vehicles",
                "Vehicles",
                Some("#14b8a6"),
                SeriesStyle::Bar,
                current,
            )],
            ChartKind::Pie => vec![SeriesData::new(
                "share",
                "Vehicles",
                None,
                SeriesStyle::Pie {
                    palette: PIE_PALETTE.iter().map(|c| c.to_string()).collect(),
                },
                current,
            )],
        };

        ChartData {
            title: CHART_TITLE.to_string(),
            kind: self.kind,
            series,
        }
    }
}
