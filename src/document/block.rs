//! Structural split of a document into epics and issue blocks.
//!
//! Purely positional: `## Epic` lines open an epic, `###` lines open an issue, and an issue
//! runs until the next marker of either kind. Text before the first epic, and text inside an
//! epic before its first issue, is preamble and never reaches a block.

use std::{
	iter::{Enumerate, Peekable},
	str::Lines,
};

use crate::Header;

/// One issue section of an epic, before labels and body are extracted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IssueBlock<'a> {
	/// Heading text of the enclosing epic.
	pub epic: String,
	/// Heading text of the issue. Empty when the heading carries no title.
	pub title: String,
	/// 1-indexed line of the issue heading.
	pub line: usize,
	/// Lines after the heading, up to the next issue or epic marker.
	pub lines: Vec<&'a str>,
}

enum Marker {
	Epic(String),
	Issue(String),
}

fn classify(line: &str) -> Option<Marker> {
	let header = Header::decode(line)?;
	if header.is_epic() {
		Some(Marker::Epic(header.content))
	} else if header.is_issue() {
		Some(Marker::Issue(header.content))
	} else {
		None
	}
}

/// Lazily yields the issue blocks of a document in source order.
pub struct Blocks<'a> {
	lines: Peekable<Enumerate<Lines<'a>>>,
	epic: Option<String>,
}

impl<'a> Blocks<'a> {
	pub fn new(content: &'a str) -> Self {
		Self {
			lines: content.lines().enumerate().peekable(),
			epic: None,
		}
	}
}

impl<'a> Iterator for Blocks<'a> {
	type Item = IssueBlock<'a>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			let (idx, line) = self.lines.next()?;
			match classify(line) {
				Some(Marker::Epic(heading)) => self.epic = Some(heading),
				Some(Marker::Issue(title)) => {
					// Issue headings in the document preamble belong to no epic
					let Some(epic) = &self.epic else {
						continue;
					};
					let mut lines = Vec::new();
					while let Some((_, body_line)) = self.lines.next_if(|(_, l)| classify(l).is_none()) {
						lines.push(body_line);
					}
					return Some(IssueBlock {
						epic: epic.clone(),
						title,
						line: idx + 1,
						lines,
					});
				}
				None => {}
			}
		}
	}
}
