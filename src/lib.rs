pub mod document;

// Re-export the document types at crate root for convenience
pub use document::{Blocks, Document, DuplicatePolicy, ExistingTitles, IssueBlock, IssueRecord, LabelsLine, MalformedRecord, ParseContext, Records, split_labels};

/// Deepest heading level markdown recognizes.
const MAX_HEADER_LEVEL: usize = 6;

/// A markdown ATX header: `# Content`, `## Content`, etc.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Header {
	pub level: usize,
	pub content: String,
}

impl Header {
	/// Create a new header with the given level and content.
	/// Level must be >= 1.
	pub fn new(level: usize, content: impl Into<String>) -> Self {
		debug_assert!(level >= 1, "Header level must be >= 1");
		Self {
			level: level.max(1),
			content: content.into(),
		}
	}

	/// Decode a header from a line.
	/// Returns None if the line is not a header.
	///
	/// A bare run of `#` (`###`) is still a header, just with empty content: an issue heading
	/// that lost its title has to be reported, not folded into the previous issue's body.
	pub fn decode(s: &str) -> Option<Self> {
		let trimmed = s.trim();
		let level = trimmed.chars().take_while(|&ch| ch == '#').count();
		if level == 0 || level > MAX_HEADER_LEVEL {
			return None;
		}

		let rest = &trimmed[level..];
		if rest.is_empty() {
			return Some(Self { level, content: String::new() });
		}
		// Valid header must have whitespace after the # characters
		let stripped = rest.strip_prefix([' ', '\t'])?;
		Some(Self {
			level,
			content: stripped.trim().to_string(),
		})
	}

	/// Encode the header back to its markdown line.
	pub fn encode(&self) -> String {
		if self.content.is_empty() {
			return "#".repeat(self.level);
		}
		format!("{} {}", "#".repeat(self.level), self.content)
	}

	/// `## Epic ...` opens an epic section.
	pub fn is_epic(&self) -> bool {
		self.level == 2 && self.content.starts_with("Epic")
	}

	/// `### ...` opens an issue inside an epic.
	pub fn is_issue(&self) -> bool {
		self.level == 3
	}
}
