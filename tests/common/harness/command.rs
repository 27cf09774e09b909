//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility with methods for future tests
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Fluent wrapper around `assert_cmd::Command` for the `cardport` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct CardportCommand {
    args: Vec<String>,
    config_home: Option<PathBuf>,
}

impl CardportCommand {
    /// Creates a new command for the `cardport` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            config_home: None,
        }
    }

    /// Points the config lookup at an isolated directory.
    pub fn config_home(mut self, path: &Path) -> Self {
        self.config_home = Some(path.to_path_buf());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Adds a path argument.
    pub fn path(self, path: &Path) -> Self {
        let arg = path.to_string_lossy().to_string();
        self.args([arg])
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("cardport").expect("Failed to find cardport binary");
        if let Some(home) = &self.config_home {
            cmd.env("XDG_CONFIG_HOME", home);
            cmd.env("HOME", home);
        }
        cmd.env_remove("RUST_LOG");
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `cards` command with an input file.
    pub fn cards(self, input: &Path) -> Self {
        self.args(["cards"]).path(input)
    }

    /// Configures for the `canvas` command with an input file.
    pub fn canvas(self, input: &Path) -> Self {
        self.args(["canvas"]).path(input)
    }

    /// Configures for the `export` command with an input file.
    pub fn export(self, input: &Path) -> Self {
        self.args(["export"]).path(input)
    }

    /// Configures for the `inspect` command with an input file.
    pub fn inspect(self, input: &Path) -> Self {
        self.args(["inspect"]).path(input)
    }

    /// Adds `--output <dir>`.
    pub fn output(self, dir: &Path) -> Self {
        self.args(["--output"]).path(dir)
    }

    /// Adds `--cards-path <prefix>`.
    pub fn cards_path(self, prefix: &str) -> Self {
        self.args(["--cards-path", prefix])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }

    /// Adds `--format paths` to the command.
    pub fn format_paths(self) -> Self {
        self.args(["--format", "paths"])
    }
}

impl Default for CardportCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_runs_binary() {
        CardportCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = CardportCommand::new()
            .cards(Path::new("data.json"))
            .format_json();
        let args = cmd.get_args();
        assert_eq!(args[0], "cards");
        assert_eq!(args[1], "data.json");
        assert!(args.contains(&"--format".to_string()));
        assert!(args.contains(&"json".to_string()));
    }
}
