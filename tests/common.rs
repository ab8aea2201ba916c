use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

// Not every test file uses every helper.
#[allow(dead_code)]
pub struct TestContext {
    pub temp_dir: TempDir,
    pub bin_dir: PathBuf,
    pub bin_path: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let bin_dir = temp_dir.path().join("bin");
        let bin_path = PathBuf::from(env!("CARGO_BIN_EXE_monospace-installer"));

        Self {
            temp_dir,
            bin_dir,
            bin_path,
        }
    }

    /// Installer command isolated from the caller's environment, run from the temp dir.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(&self.bin_path);
        cmd.current_dir(self.temp_dir.path());
        for var in [
            "RUST_LOG",
            "npm_config_user_agent",
            "npm_config_arm_version",
            "MONOSPACE_INSTALL_DIR",
            "MONOSPACE_RELEASE_BASE_URL",
            "MONOSPACE_PACKAGE_JSON",
            "MONOSPACE_RELEASE_VERSION",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Like [`cmd`](Self::cmd), but as if launched by npm.
    pub fn npm_cmd(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.env(
            "npm_config_user_agent",
            "npm/10.2.4 node/v20.10.0 linux x64 workspaces/false",
        );
        cmd
    }
}

#[allow(dead_code)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            status: output.status,
        }
    }
}

#[allow(dead_code)]
impl CommandOutput {
    pub fn assert_success(&self) -> &Self {
        if !self.status.success() {
            panic!(
                "Command failed with status {:?}\nstdout: {}\nstderr: {}",
                self.status.code(),
                self.stdout,
                self.stderr
            );
        }
        self
    }

    pub fn assert_exit_code(&self, code: i32) -> &Self {
        assert_eq!(
            self.status.code(),
            Some(code),
            "unexpected exit status\nstdout: {}\nstderr: {}",
            self.stdout,
            self.stderr
        );
        self
    }

    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Stdout did not contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Stderr did not contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }
}
