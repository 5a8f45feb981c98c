// Emergency alert domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyAlert {
    pub active: bool,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

impl EmergencyAlert {
    pub fn new(kind: &str, message: &str) -> Self {
        Self {
            active: true,
            kind: kind.to_string(),
            message: message.to_string(),
        }
    }

    pub fn ambulance() -> Self {
        Self::new(
            "Ambulance Detected",
            "Signals reconfigured: Route cleared for rapid emergency response!",
        )
    }

    pub fn fire_truck() -> Self {
        Self::new(
            "Fire Truck Detected",
            "Signals optimized: Emergency route cleared!",
        )
    }

    /// Banner for the notification strip; nothing when the alert is inactive.
    pub fn banner(&self) -> Option<Banner> {
        self.active.then(|| Banner {
            kind: self.kind.clone(),
            message: self.message.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}
