// Application layer - State ownership and scheduling
pub mod chart_ticker;
pub mod dashboard_service;
