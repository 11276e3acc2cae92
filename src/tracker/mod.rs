//! Issue tracker collaborators.
//!
//! The parser only needs two things from a tracker: the titles it already has, and a way to
//! create one issue. Both are traits so the real `gh` backend and the in-memory mock are
//! interchangeable.

use color_eyre::eyre::Result;
use epics::{ExistingTitles, IssueRecord};

use crate::config::AppConfig;

mod gh;
pub use gh::GhCli;

mod mock;
pub use mock::MockTracker;
#[cfg(test)]
pub use mock::MockState;

/// What the tracker reports back for a freshly created issue.
#[derive(Clone, Debug, Eq, PartialEq, derive_more::Display)]
#[display("{url}")]
pub struct CreatedIssue {
	pub number: Option<u64>,
	pub url: String,
}

impl CreatedIssue {
	/// Issue URLs end in `/<number>`; anything else leaves the number unknown.
	pub fn from_url(url: impl Into<String>) -> Self {
		let url = url.into();
		let number = url.rsplit('/').next().and_then(|n| n.parse().ok());
		Self { number, url }
	}
}

/// Lists the titles of issues that already exist.
pub trait TitleSource {
	fn fetch_titles(&self) -> Result<ExistingTitles>;
}

/// Creates one issue per call. No retries; the caller decides whether to go on after a failure.
pub trait IssueSink {
	fn create_issue(&self, record: &IssueRecord) -> Result<CreatedIssue>;
}

pub trait Tracker: TitleSource + IssueSink {}
impl<T: TitleSource + IssueSink> Tracker for T {}

pub type BoxedTracker = Box<dyn Tracker>;

/// `gh` unless `mock` is set.
pub fn create_tracker(config: &AppConfig, mock: bool) -> BoxedTracker {
	if mock {
		Box::new(MockTracker::from_env(config.repo.as_deref()))
	} else {
		Box::new(GhCli::new(config))
	}
}
