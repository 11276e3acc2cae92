//! `**Labels:** `a, b`` annotations.

use std::sync::LazyLock;

use regex::Regex;

// Everything between the first and the last backtick on the annotation line, holding at least one label character.
static LABELS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*Labels:\*\*[ \t]*(`[^\n]*?[^`,\s][^\n]*`)").unwrap());

/// A labels annotation found inside an issue block.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LabelsLine {
	/// Byte offset of the `**Labels:**` marker in the searched text.
	pub start: usize,
	pub labels: Vec<String>,
}

impl LabelsLine {
	/// Find the first annotation in `text`.
	/// An annotation without a backticked list doesn't count, so the block is treated as unlabeled.
	pub fn find(text: &str) -> Option<Self> {
		let caps = LABELS_RE.captures(text)?;
		let whole = caps.get(0)?;
		let list = caps.get(1)?;
		Some(Self {
			start: whole.start(),
			labels: split_labels(list.as_str()),
		})
	}
}

/// Split a comma-separated label list, dropping whitespace, backticks and empty entries.
///
/// Accepts both `` `a, b` `` and `` `a`, `b` `` spellings.
pub fn split_labels(list: &str) -> Vec<String> {
	list.split(',')
		.map(|label| label.trim().trim_matches('`').trim())
		.filter(|label| !label.is_empty())
		.map(str::to_owned)
		.collect()
}
