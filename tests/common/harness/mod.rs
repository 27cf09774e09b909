//! Test harness for CLI integration tests.
//!
//! Provides isolated test environments, programmatic dataset creation,
//! and CLI assertion helpers using `assert_cmd`.

mod command;
mod dataset;
mod env;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::CardportCommand;
#[allow(unused_imports)]
pub use dataset::TestDataset;
#[allow(unused_imports)]
pub use env::TestEnv;
