//! Deciding whether an issue already exists in the tracker.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// How a parsed title is compared against titles already in the tracker.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
	/// The title is a substring of an existing title.
	/// Loose: `Fix login` is considered present when `Fix login bug` is.
	#[default]
	Containment,
	/// The title equals an existing title.
	Exact,
}

impl DuplicatePolicy {
	pub fn is_duplicate(self, title: &str, existing: &str) -> bool {
		match self {
			DuplicatePolicy::Containment => existing.contains(title),
			DuplicatePolicy::Exact => existing == title,
		}
	}
}

/// Titles of issues that already exist in the tracker, fetched once per run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExistingTitles(BTreeSet<String>);

impl ExistingTitles {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	/// Whether `title` is already covered by some existing title under `policy`.
	pub fn tracks(&self, title: &str, policy: DuplicatePolicy) -> bool {
		self.iter().any(|existing| policy.is_duplicate(title, existing))
	}
}

impl<S: Into<String>> FromIterator<S> for ExistingTitles {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self(iter.into_iter().map(Into::into).collect())
	}
}
