//! Shared test infrastructure for integration tests.
//!
//! Provides `TestContext`, which handles:
//! - a temp dir holding the planning documents under test
//! - mock tracker state (`EPICS_MOCK_STATE`), readable after the run
//! - a JSON trace file (`EPICS_TRACE_FILE`) for verifying mock calls
//! - an empty `XDG_CONFIG_HOME`, so a developer's own config can't leak in
//!
//! # Example
//!
//! ```ignore
//! let ctx = TestContext::new();
//! let plan = ctx.write("plan.md", "## Epic 1\n### Fix login bug\n");
//!
//! let (status, stdout, _stderr) = ctx.run_create(&plan, &[]);
//! assert!(status.success());
//! ```

use std::{
	path::{Path, PathBuf},
	process::{Command, ExitStatus},
};

use rstest::fixture;
use tempfile::TempDir;

use crate::tracing_utils::TraceLog;

pub struct TestContext {
	pub dir: TempDir,
	/// Path to mock tracker state file
	pub mock_state_path: PathBuf,
	/// Path the binary writes JSON trace events to
	pub trace_file: PathBuf,
}

#[fixture]
pub fn ctx() -> TestContext {
	TestContext::new()
}

impl TestContext {
	pub fn new() -> Self {
		let dir = tempfile::tempdir().unwrap();
		let mock_state_path = dir.path().join("mock_state.json");
		let trace_file = dir.path().join("trace.jsonl");
		std::fs::create_dir_all(dir.path().join("config")).unwrap();
		Self { dir, mock_state_path, trace_file }
	}

	/// Write a file into the temp dir, returning its path.
	pub fn write(&self, relative_path: &str, content: &str) -> PathBuf {
		let path = self.dir.path().join(relative_path);
		std::fs::write(&path, content).unwrap();
		path
	}

	/// Run the binary with the mock tracker wired up.
	///
	/// Returns (exit_status, stdout, stderr) for easy assertions.
	pub fn run(&self, args: &[&str]) -> (ExitStatus, String, String) {
		let mut cmd = Command::new(env!("CARGO_BIN_EXE_epics"));
		cmd.arg("--mock").args(args);
		cmd.env("EPICS_MOCK_STATE", &self.mock_state_path);
		cmd.env("EPICS_TRACE_FILE", &self.trace_file);
		cmd.env("XDG_CONFIG_HOME", self.dir.path().join("config"));
		cmd.env("RUST_LOG", "info");
		cmd.env_remove("EPICS_REPO");
		cmd.env_remove("EPICS_DUPLICATE_POLICY");

		let output = cmd.output().unwrap();
		(
			output.status,
			String::from_utf8_lossy(&output.stdout).into_owned(),
			String::from_utf8_lossy(&output.stderr).into_owned(),
		)
	}

	/// `epics create <plan> <extra...>`
	pub fn run_create(&self, plan: &Path, extra: &[&str]) -> (ExitStatus, String, String) {
		let plan = plan.to_str().unwrap();
		let mut args = vec!["create", plan];
		args.extend_from_slice(extra);
		self.run(&args)
	}

	/// Set up the mock tracker's initial state.
	pub fn setup_mock_state(&self, state: &serde_json::Value) {
		std::fs::write(&self.mock_state_path, serde_json::to_string_pretty(state).unwrap()).unwrap();
	}

	/// Mock state as left by the last run.
	pub fn read_mock_state(&self) -> serde_json::Value {
		let content = std::fs::read_to_string(&self.mock_state_path).unwrap_or_else(|_| "{}".to_string());
		serde_json::from_str(&content).unwrap()
	}

	/// Titles of all issues the mock tracker holds, in creation order.
	pub fn mock_titles(&self) -> Vec<String> {
		self.read_mock_state()["issues"]
			.as_array()
			.map(|issues| issues.iter().filter_map(|issue| issue["title"].as_str().map(String::from)).collect())
			.unwrap_or_default()
	}

	pub fn trace(&self) -> TraceLog {
		TraceLog::from_file(&self.trace_file)
	}
}
