//! Isolated test environment with temp directory.

#![allow(dead_code)]

use super::{CardportCommand, TestDataset};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary working directory.
///
/// Creates a temp directory that is automatically cleaned up on drop.
/// The config lookup of every command is pointed at a private directory so
/// the user's own config file never leaks into tests.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Root of the environment
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the root of the environment.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the directory used for exported artifacts.
    pub fn out_dir(&self) -> PathBuf {
        self.root.join("out")
    }

    /// Returns the directory used as `XDG_CONFIG_HOME`.
    pub fn config_home(&self) -> PathBuf {
        self.root.join("config")
    }

    /// Writes a dataset as `All-Data.json` and returns its path.
    pub fn write_dataset(&self, dataset: &TestDataset) -> PathBuf {
        self.write_file("All-Data.json", &dataset.to_json())
    }

    /// Writes the config file read by the binary.
    pub fn write_config(&self, toml: &str) -> PathBuf {
        let dir = self.config_home().join("cardport");
        std::fs::create_dir_all(&dir).expect("Failed to create config directory");
        let path = dir.join("config.toml");
        std::fs::write(&path, toml).expect("Failed to write config");
        path
    }

    /// Writes a file to the test environment and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Reads an exported file relative to the output directory.
    pub fn read_output(&self, relative: &str) -> String {
        let path = self.out_dir().join(relative);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    /// Creates a command configured for this test environment.
    pub fn cmd(&self) -> CardportCommand {
        CardportCommand::new().config_home(&self.config_home())
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_writes_dataset() {
        let env = TestEnv::new();
        let path = env.write_dataset(&TestDataset::new().card("c1", "Note", "body"));
        assert!(path.ends_with("All-Data.json"));
        assert!(std::fs::read_to_string(path).unwrap().contains("cardList"));
    }
}
