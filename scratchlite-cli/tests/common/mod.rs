use assert_cmd::Command;
use scratchlite_test_utils::FakeControlPlane;
use std::time::Duration;
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "SCRATCHLITE_CONFIG",
    "SCRATCHLITE_BINARY",
    "SCRATCHLITE_LOG",
    "SCRATCHLITE_LOG_FORMAT",
    "SCRATCHLITE_OWNER",
    "SCRATCHLITE_ROOT",
    "SCRATCHLITE_TIMEOUT",
    "SCRATCHLITE_RUNTIME_DIR",
];

pub struct TestContext {
    pub cmd: Command,
    pub fake: FakeControlPlane,
    // Keeps config lookups away from the real user config dir
    pub _config_home: TempDir,
}

impl TestContext {
    /// Fresh command sharing this context's fake and config dir
    pub fn new_cmd(&self) -> Command {
        build_cmd(&self.fake, &self._config_home)
    }
}

fn build_cmd(fake: &FakeControlPlane, config_home: &TempDir) -> Command {
    let bin_path = env!("CARGO_BIN_EXE_scratchlite");
    let mut cmd = Command::new(bin_path);
    cmd.timeout(Duration::from_secs(30));
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd.env("HOME", config_home.path());
    cmd.arg("--binary").arg(fake.binary());
    cmd
}

/// Context whose control plane behaves like `fake`.
pub fn scratchlite(fake: FakeControlPlane) -> TestContext {
    let config_home = TempDir::new().expect("Failed to create config dir");
    TestContext {
        cmd: build_cmd(&fake, &config_home),
        fake,
        _config_home: config_home,
    }
}
