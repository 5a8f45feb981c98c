// Landing screen content
use serde::{Deserialize, Serialize};

pub const TITLE: &str = "Welcome to AIVISTA";
pub const TAGLINE: &str = "Next-Gen AI Automated Smart Traffic Management Solution";

const FEATURES: [&str; 5] = [
    "AI-powered smart traffic light control",
    "Real-time congestion analysis",
    "Route optimization & eco-friendly driving",
    "IoT sensor & camera integration",
    "Secure & scalable cloud dashboard",
];

/// Informational landing actions. They only produce a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InfoTopic {
    LiveTraffic,
    RoutePlanner,
    About,
}

impl InfoTopic {
    pub const ALL: [InfoTopic; 3] = [InfoTopic::LiveTraffic, InfoTopic::RoutePlanner, InfoTopic::About];

    pub fn slug(self) -> &'static str {
        match self {
            InfoTopic::LiveTraffic => "live-traffic",
            InfoTopic::RoutePlanner => "route-planner",
            InfoTopic::About => "about",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|topic| topic.slug() == slug)
    }

    pub fn message(self) -> &'static str {
        match self {
            InfoTopic::LiveTraffic => "Real-time traffic monitoring coming soon!",
            InfoTopic::RoutePlanner => "Smart Route Planner under development!",
            InfoTopic::About => "About AIVISTA: AI-powered traffic optimization system.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoMessage {
    pub topic: InfoTopic,
    pub message: String,
}

impl From<InfoTopic> for InfoMessage {
    fn from(topic: InfoTopic) -> Self {
        Self {
            topic,
            message: topic.message().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LandingView {
    pub title: String,
    pub tagline: String,
    pub features: Vec<String>,
    pub topics: Vec<InfoTopic>,
}

impl Default for LandingView {
    fn default() -> Self {
        Self {
            title: TITLE.to_string(),
            tagline: TAGLINE.to_string(),
            features: FEATURES.iter().map(|f| f.to_string()).collect(),
            topics: InfoTopic::ALL.to_vec(),
        }
    }
}
