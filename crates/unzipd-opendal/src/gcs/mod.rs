mod config;

pub use config::GcsConfig;
