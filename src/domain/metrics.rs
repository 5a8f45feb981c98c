// Static metric cards
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

pub fn default_metrics() -> Vec<Metric> {
    vec![
        Metric::new("Avg Wait Time", "4.1 min"),
        Metric::new("Idling Reduction", "15%"),
        Metric::new("Adaptive Signals", "Enabled"),
    ]
}
