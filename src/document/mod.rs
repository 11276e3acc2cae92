//! Epic planning documents.
//!
//! A document lists epics as `## Epic ...` sections, each holding issues as `### Title`
//! sections. This module turns such a document into [`IssueRecord`]s, dropping the ones whose
//! titles the tracker already has. Everything here is pure: no I/O, no global state.
//!
//! ```text
//! document := preamble? epic*
//! epic     := "## Epic" epic-preamble issue*
//! issue    := "### " title-line body-lines*
//! labels-line := "**Labels:** `" label ("," label)* "`"
//! ```

use std::collections::BTreeSet;

mod block;
pub use block::{Blocks, IssueBlock};

mod dedup;
pub use dedup::{DuplicatePolicy, ExistingTitles};

mod error;
pub use error::{MalformedRecord, ParseContext};

mod labels;
pub use labels::{LabelsLine, split_labels};

mod record;
pub use record::IssueRecord;

/// A planning document loaded into memory.
#[derive(Clone, Debug)]
pub struct Document {
	ctx: ParseContext,
}

impl Document {
	pub fn new(content: impl Into<String>, filename: impl Into<String>) -> Self {
		Self {
			ctx: ParseContext::new(content.into(), filename),
		}
	}

	pub fn content(&self) -> &str {
		&self.ctx.content
	}

	pub fn filename(&self) -> &str {
		&self.ctx.filename
	}

	/// Issue blocks in source order, before extraction and dedup.
	pub fn blocks(&self) -> Blocks<'_> {
		Blocks::new(&self.ctx.content)
	}

	/// Issues not yet present in `existing`, in source order.
	///
	/// Lazy: each record is parsed when pulled, so a caller can stop at any point.
	pub fn records<'a>(&'a self, existing: &'a ExistingTitles) -> Records<'a> {
		Records {
			blocks: self.blocks(),
			ctx: &self.ctx,
			existing,
			policy: DuplicatePolicy::default(),
			epic_filter: None,
			emitted: BTreeSet::new(),
			skipped: 0,
		}
	}
}

/// Iterator over the new issues of a [`Document`].
///
/// Yields `Err` for an issue heading without a title; iteration continues after it.
pub struct Records<'a> {
	blocks: Blocks<'a>,
	ctx: &'a ParseContext,
	existing: &'a ExistingTitles,
	policy: DuplicatePolicy,
	epic_filter: Option<String>,
	/// Titles already yielded, so a title repeated verbatim in the document is only produced once.
	emitted: BTreeSet<String>,
	skipped: usize,
}

impl Records<'_> {
	pub fn policy(mut self, policy: DuplicatePolicy) -> Self {
		self.policy = policy;
		self
	}

	/// Only consider epics whose heading contains `pattern`.
	pub fn only_epic(mut self, pattern: impl Into<String>) -> Self {
		self.epic_filter = Some(pattern.into());
		self
	}

	/// Number of issues dropped so far because they already exist.
	pub fn skipped(&self) -> usize {
		self.skipped
	}

	fn is_known(&self, title: &str) -> bool {
		self.existing.tracks(title, self.policy) || self.emitted.contains(title)
	}
}

impl Iterator for Records<'_> {
	type Item = Result<IssueRecord, MalformedRecord>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			let block = self.blocks.next()?;
			if let Some(pattern) = &self.epic_filter
				&& !block.epic.contains(pattern.as_str())
			{
				continue;
			}

			let record = match IssueRecord::from_block(block, self.ctx) {
				Ok(record) => record,
				Err(e) => return Some(Err(e)),
			};

			if self.is_known(&record.title) {
				tracing::debug!(title = %record.title, epic = %record.epic, "issue already exists, skipping");
				self.skipped += 1;
				continue;
			}

			self.emitted.insert(record.title.clone());
			return Some(Ok(record));
		}
	}
}
