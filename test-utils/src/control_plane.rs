use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Shell script standing in for the control-plane binary.
///
/// Every argument is appended (one per line) to an args file and the shell
/// pid is written to a pid file, then the script body runs. The directory is
/// removed on drop.
pub struct FakeControlPlane {
    _dir: TempDir,
    binary: PathBuf,
    args_file: PathBuf,
    pid_file: PathBuf,
}

impl FakeControlPlane {
    /// Create a fake whose remaining behaviour is the shell snippet `body`.
    pub fn new(body: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let binary = dir.path().join("runhcs");
        let args_file = dir.path().join("args.txt");
        let pid_file = dir.path().join("pid");

        // The pid is written to a temp name and renamed so readers never see
        // a partial file
        let script = format!(
            "#!/bin/sh\nfor arg in \"$@\"; do printf '%s\\n' \"$arg\" >> '{args}'; done\n\
             echo $$ > '{pid}.tmp' && mv '{pid}.tmp' '{pid}'\n{body}\n",
            args = args_file.display(),
            pid = pid_file.display(),
            body = body
        );
        std::fs::write(&binary, script).expect("Failed to write fake control plane");
        std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod fake control plane");

        Self {
            _dir: dir,
            binary,
            args_file,
            pid_file,
        }
    }

    /// Fake that exits 0.
    pub fn succeeding() -> Self {
        Self::new("exit 0")
    }

    /// Fake that prints `message` to stderr and exits with `code`.
    pub fn failing(code: i32, message: &str) -> Self {
        Self::new(&format!("echo '{}' >&2\nexit {}", message, code))
    }

    /// Fake that never exits on its own.
    ///
    /// `exec` keeps the recorded pid pointing at the sleeping process.
    pub fn hanging() -> Self {
        Self::new("exec sleep 60")
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Arguments of the last run(s), or empty if it never ran.
    pub fn recorded_args(&self) -> Vec<String> {
        std::fs::read_to_string(&self.args_file)
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn was_invoked(&self) -> bool {
        self.args_file.exists()
    }

    /// File the running script writes its pid to.
    pub fn pid_file(&self) -> &Path {
        &self.pid_file
    }

    /// Pid of the last run, if it got far enough to record one.
    pub fn pid(&self) -> Option<i32> {
        read_pid(&self.pid_file)
    }
}

/// Parse a pid file written by [`FakeControlPlane`].
pub fn read_pid(path: &Path) -> Option<i32> {
    std::fs::read_to_string(path).ok()?.trim().parse().ok()
}
