mod config;
mod error;
mod types;

pub use config::{Config, DbConfig, LogConfig, ParkingConfig, ServerConfig};
pub use error::Error;
pub use types::*;
