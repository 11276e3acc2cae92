//! Mock tracker for testing purposes.
//!
//! Stores issues in memory and can be used for integration testing without touching GitHub.
//! When `EPICS_MOCK_STATE` names a JSON file, the initial state is loaded from it and every
//! created issue is written back, so a test can inspect what a run produced.

use std::{
	path::PathBuf,
	sync::{
		Mutex,
		atomic::{AtomicU64, Ordering},
	},
};

use color_eyre::eyre::{Result, bail};
use epics::{ExistingTitles, IssueRecord};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{CreatedIssue, IssueSink, TitleSource};

const DEFAULT_REPO: &str = "mock/repo";

/// Internal representation of an issue in the mock
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MockIssueData {
	pub number: u64,
	pub title: String,
	#[serde(default)]
	pub labels: Vec<String>,
	#[serde(default)]
	pub body: String,
}

/// On-disk shape of `EPICS_MOCK_STATE`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MockState {
	pub issues: Vec<MockIssueData>,
	/// Make `fetch_titles` fail, as if gh couldn't reach GitHub.
	pub unavailable: bool,
	/// Titles `create_issue` refuses.
	pub reject_titles: Vec<String>,
}

pub struct MockTracker {
	repo: String,
	/// Counter for generating issue numbers
	next_issue_number: AtomicU64,
	state: Mutex<MockState>,
	/// Where to persist state after each change
	state_path: Option<PathBuf>,
	/// Call log for debugging
	call_log: Mutex<Vec<String>>,
}

impl MockTracker {
	pub fn new(repo: Option<&str>, state: MockState) -> Self {
		let next = state.issues.iter().map(|issue| issue.number).max().unwrap_or(0) + 1;
		Self {
			repo: repo.unwrap_or(DEFAULT_REPO).to_string(),
			next_issue_number: AtomicU64::new(next),
			state: Mutex::new(state),
			state_path: None,
			call_log: Mutex::new(Vec::new()),
		}
	}

	/// Load initial state from `EPICS_MOCK_STATE` if it is set.
	/// A missing or unreadable file starts the mock empty.
	pub fn from_env(repo: Option<&str>) -> Self {
		let Ok(state_file) = std::env::var("EPICS_MOCK_STATE") else {
			return Self::new(repo, MockState::default());
		};

		let state = match std::fs::read_to_string(&state_file).map(|content| serde_json::from_str::<MockState>(&content)) {
			Ok(Ok(state)) => {
				tracing::debug!(target: "mock_tracker", path = %state_file, "loaded state");
				state
			}
			Ok(Err(e)) => {
				tracing::warn!(target: "mock_tracker", path = %state_file, "failed to parse state: {e}");
				MockState::default()
			}
			Err(_) => MockState::default(),
		};

		let mut tracker = Self::new(repo, state);
		tracker.state_path = Some(PathBuf::from(state_file));
		tracker
	}

	#[cfg(test)]
	pub fn issues(&self) -> Vec<MockIssueData> {
		self.state.lock().unwrap().issues.clone()
	}

	/// Get the call log for debugging
	#[cfg(test)]
	pub fn get_call_log(&self) -> Vec<String> {
		self.call_log.lock().unwrap().clone()
	}

	fn log_call(&self, call: &str) {
		self.call_log.lock().unwrap().push(call.to_string());
	}

	fn persist(&self, state: &MockState) -> Result<()> {
		if let Some(path) = &self.state_path {
			std::fs::write(path, serde_json::to_string_pretty(state)?)?;
		}
		Ok(())
	}
}

impl TitleSource for MockTracker {
	#[instrument(skip(self), name = "MockTracker::fetch_titles")]
	fn fetch_titles(&self) -> Result<ExistingTitles> {
		tracing::info!(target: "mock_tracker", repo = %self.repo, "fetch_titles");
		self.log_call("fetch_titles()");

		let state = self.state.lock().unwrap();
		if state.unavailable {
			bail!("mock tracker is unavailable");
		}
		Ok(state.issues.iter().map(|issue| issue.title.clone()).collect())
	}
}

impl IssueSink for MockTracker {
	#[instrument(skip(self, record), name = "MockTracker::create_issue")]
	fn create_issue(&self, record: &IssueRecord) -> Result<CreatedIssue> {
		tracing::info!(target: "mock_tracker", repo = %self.repo, title = %record.title, labels = ?record.labels, "create_issue");
		self.log_call(&format!("create_issue({}, <body>)", record.title));

		let mut state = self.state.lock().unwrap();
		if state.reject_titles.contains(&record.title) {
			bail!("mock tracker rejected '{}'", record.title);
		}

		let number = self.next_issue_number.fetch_add(1, Ordering::SeqCst);
		state.issues.push(MockIssueData {
			number,
			title: record.title.clone(),
			labels: record.labels.clone(),
			body: record.body.clone(),
		});
		self.persist(&state)?;

		Ok(CreatedIssue::from_url(format!("https://github.com/{}/issues/{number}", self.repo)))
	}
}
