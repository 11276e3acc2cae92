//! `epics list`: show what a document parses to, without asking the tracker anything.

use std::{io::Write, path::PathBuf};

use clap::Args;
use color_eyre::eyre::{Result, WrapErr};
use epics::{Document, ExistingTitles, Header, IssueRecord};

#[derive(Args)]
pub struct ListArgs {
	/// Markdown document with `## Epic` sections and `### ` issues
	pub file: PathBuf,

	/// Print the records as a JSON array
	#[arg(long)]
	pub json: bool,
}

/// Returns the number of malformed issues encountered.
pub fn list_command(args: ListArgs) -> Result<usize> {
	let content = std::fs::read_to_string(&args.file).wrap_err_with(|| format!("Failed to read {}", args.file.display()))?;
	let document = Document::new(content, args.file.display().to_string());
	list_records(&document, args.json, &mut std::io::stdout().lock())
}

pub fn list_records<W: Write>(document: &Document, json: bool, out: &mut W) -> Result<usize> {
	let existing = ExistingTitles::new();
	let mut records = Vec::new();
	let mut malformed = 0;
	for result in document.records(&existing) {
		match result {
			Ok(record) => records.push(record),
			Err(e) => {
				eprintln!("{:?}", miette::Report::new(e));
				malformed += 1;
			}
		}
	}

	if json {
		writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
	} else {
		write_outline(&records, out)?;
	}
	Ok(malformed)
}

/// Records regrouped under their epic headings, labels in brackets.
fn write_outline<W: Write>(records: &[IssueRecord], out: &mut W) -> Result<()> {
	let mut current_epic: Option<&str> = None;
	for record in records {
		if current_epic != Some(record.epic.as_str()) {
			if current_epic.is_some() {
				writeln!(out)?;
			}
			writeln!(out, "{}", Header::new(2, record.epic.as_str()).encode())?;
			current_epic = Some(record.epic.as_str());
		}

		let heading = Header::new(3, record.title.as_str()).encode();
		if record.labels.is_empty() {
			writeln!(out, "{heading}")?;
		} else {
			writeln!(out, "{heading} [{}]", record.labels.join(", "))?;
		}
	}
	Ok(())
}
