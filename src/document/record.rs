use serde::Serialize;

use super::{IssueBlock, LabelsLine, MalformedRecord, ParseContext};

/// One issue to be created in the tracker.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, derive_new::new)]
pub struct IssueRecord {
	pub title: String,
	pub labels: Vec<String>,
	/// Starts at the labels annotation when there is one, otherwise everything after the heading.
	pub body: String,
	/// Heading of the epic this issue was listed under.
	pub epic: String,
}

impl IssueRecord {
	pub fn from_block(block: IssueBlock<'_>, ctx: &ParseContext) -> Result<Self, MalformedRecord> {
		if block.title.is_empty() {
			return Err(ctx.malformed(block.line));
		}

		let text = block.lines.join("\n");
		let (labels, body) = match LabelsLine::find(&text) {
			Some(found) => (found.labels, text[found.start..].to_string()),
			None => (Vec::new(), text),
		};

		Ok(Self {
			title: block.title,
			labels,
			body,
			epic: block.epic,
		})
	}
}
