// Infrastructure layer - Configuration, errors and snapshot streaming
pub mod config;
pub mod error;
pub mod snapshot_stream;
