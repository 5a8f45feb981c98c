// Domain layer - Dashboard state and render descriptions
pub mod alert;
pub mod city_map;
pub mod dashboard;
pub mod landing;
pub mod metrics;
pub mod traffic;
