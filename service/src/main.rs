use std::path::Path;

use abi::Config;
use anyhow::{bail, Result};
use reservation_service::{init_tracing, start_server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let filename = match std::env::var("PARKING_CONFIG") {
        Ok(filename) => filename,
        Err(_) => find_config()?,
    };
    let config = Config::load(&filename)?;

    init_tracing(&config.log);
    info!(config = %filename, "starting parking service");

    start_server(&config).await
}

fn find_config() -> Result<String> {
    let home = shellexpand::tilde("~/.config/parking.yml");
    for candidate in ["./parking.yml", home.as_ref(), "/etc/parking.yml"] {
        if Path::new(candidate).exists() {
            return Ok(candidate.to_string());
        }
    }
    bail!("no config file found, set PARKING_CONFIG or create ./parking.yml")
}
