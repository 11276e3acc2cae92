//! Error types for parsing epic documents.
//!
//! Uses miette for rich diagnostics with source code spans.

#![allow(unused_assignments)] // Fields are read by miette's derive macro via attributes

use miette::{Diagnostic, NamedSource, SourceSpan};

/// An issue heading with nothing after the `###`.
/// Only the offending block is dropped; the rest of the document still parses.
#[derive(Debug, Diagnostic, thiserror::Error)]
#[error("issue heading on line {line} has no title")]
#[diagnostic(code(epics::parse::missing_title), help("put the issue title on the heading line: '### Fix login bug'"))]
pub struct MalformedRecord {
	#[source_code]
	pub src: NamedSource<String>,
	#[label("expected a title after '###'")]
	pub span: SourceSpan,
	/// 1-indexed line of the heading.
	pub line: usize,
}

/// Holds source content and filename for error reporting.
#[derive(Clone, Debug)]
pub struct ParseContext {
	pub content: String,
	pub filename: String,
}

impl ParseContext {
	pub fn new(content: String, filename: impl Into<String>) -> Self {
		Self { content, filename: filename.into() }
	}

	/// Create a NamedSource for miette diagnostics.
	pub fn named_source(&self) -> NamedSource<String> {
		NamedSource::new(&self.filename, self.content.clone())
	}

	/// Get byte offset for a given line number (1-indexed).
	pub fn line_offset(&self, line_num: usize) -> usize {
		self.content.split_inclusive('\n').take(line_num.saturating_sub(1)).map(str::len).sum()
	}

	/// Get span for an entire line (1-indexed line number).
	pub fn line_span(&self, line_num: usize) -> SourceSpan {
		let offset = self.line_offset(line_num);
		let len = self.content.lines().nth(line_num.saturating_sub(1)).map(|l| l.len()).unwrap_or(0);
		(offset, len).into()
	}

	pub fn malformed(&self, line_num: usize) -> MalformedRecord {
		MalformedRecord {
			src: self.named_source(),
			span: self.line_span(line_num),
			line: line_num,
		}
	}
}
