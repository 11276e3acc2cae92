//! Utilities for capturing and verifying tracing output in integration tests.
//!
//! When tests spawn the binary with `EPICS_TRACE_FILE` set, trace events are written in JSON
//! format to that file. The mock tracker emits `tracing::info!` events with target
//! "mock_tracker" naming the method and its arguments; `has_mock_call` looks for those.

use std::{fs, path::Path};

use serde::Deserialize;

/// A single trace event from the JSON log
#[derive(Debug, Deserialize)]
pub struct TraceEvent {
	/// The log level (DEBUG, INFO, WARN, ERROR)
	pub level: String,
	/// The target module (e.g., "mock_tracker")
	pub target: String,
	/// The fields logged with the event (includes message and any other fields)
	pub fields: TraceFields,
}

#[derive(Debug, Deserialize)]
pub struct TraceFields {
	pub message: Option<String>,
	pub repo: Option<String>,
	/// Title field (for create_issue)
	pub title: Option<String>,
}

/// Parsed trace log that provides verification methods
pub struct TraceLog {
	events: Vec<TraceEvent>,
}

impl TraceLog {
	/// Read and parse a trace log file
	pub fn from_file(path: &Path) -> Self {
		let content = fs::read_to_string(path).unwrap_or_default();
		let events: Vec<TraceEvent> = content.lines().filter(|line| !line.is_empty()).filter_map(|line| serde_json::from_str(line).ok()).collect();

		Self { events }
	}

	/// Check if a mock method was called
	pub fn has_mock_call(&self, method_name: &str) -> bool {
		self.mock_calls().iter().any(|e| e.fields.message.as_deref() == Some(method_name))
	}

	/// Check if a mock method was called against a specific repo
	pub fn has_mock_call_with(&self, method_name: &str, repo: &str) -> bool {
		self.mock_calls()
			.iter()
			.any(|e| e.fields.message.as_deref() == Some(method_name) && e.fields.repo.as_deref() == Some(repo))
	}

	/// Titles passed to `create_issue`, in call order
	pub fn created_titles(&self) -> Vec<&str> {
		self.mock_calls()
			.into_iter()
			.filter(|e| e.fields.message.as_deref() == Some("create_issue"))
			.filter_map(|e| e.fields.title.as_deref())
			.collect()
	}

	/// Whether any event at `level` (e.g. "WARN") has a message containing `needle`
	pub fn has_event(&self, level: &str, needle: &str) -> bool {
		self.events
			.iter()
			.any(|e| e.level == level && e.fields.message.as_deref().is_some_and(|m| m.contains(needle)))
	}

	/// Get all mock call events for debugging
	pub fn mock_calls(&self) -> Vec<&TraceEvent> {
		self.events.iter().filter(|e| e.target == "mock_tracker").collect()
	}
}

/// Assert that a mock method was called
#[macro_export]
macro_rules! assert_traced {
	($log:expr, $method:expr) => {
		assert!(
			$log.has_mock_call($method),
			"Expected mock call '{}' to be traced, but it wasn't. Mock calls:\n{:#?}",
			$method,
			$log.mock_calls()
		);
	};
	($log:expr, $method:expr, $repo:expr) => {
		assert!(
			$log.has_mock_call_with($method, $repo),
			"Expected mock call '{}' with repo='{}' to be traced, but it wasn't. Mock calls:\n{:#?}",
			$method,
			$repo,
			$log.mock_calls()
		);
	};
}
