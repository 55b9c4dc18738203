use std::ops::Deref;
use std::path::Path;

use abi::Config;
use tempfile::TempDir;

/// The fixture config pointed at a throwaway database and an ephemeral port.
pub struct TestConfig {
    config: Config,
    _dir: TempDir,
}

impl TestConfig {
    pub fn new(capacity: u32) -> Self {
        let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/config.yml");
        let mut config = Config::load(fixture).expect("load fixture config");
        let dir = tempfile::tempdir().expect("create tempdir");

        config.db.url = format!("sqlite://{}", dir.path().join("parking.db").display());
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config.parking.capacity = capacity;
        Self { config, _dir: dir }
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Deref for TestConfig {
    type Target = Config;

    fn deref(&self) -> &Self::Target {
        &self.config
    }
}
