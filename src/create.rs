//! `epics create`: turn a planning document into tracker issues.

use std::{fmt, io::Write, path::PathBuf};

use clap::Args;
use color_eyre::eyre::{Result, WrapErr};
use epics::{Document, DuplicatePolicy, ExistingTitles};

use crate::{
	config::AppConfig,
	tracker::{IssueSink, TitleSource},
};

#[derive(Args)]
pub struct CreateArgs {
	/// Markdown document with `## Epic` sections and `### ` issues
	pub file: PathBuf,

	/// Print what would be created without creating anything
	#[arg(short = 'n', long)]
	pub dry_run: bool,

	/// Treat an issue as existing only on an exact title match, instead of when its title is contained in an existing one
	#[arg(short, long)]
	pub exact_match: bool,

	/// Only create issues from epics whose heading contains this text
	#[arg(long)]
	pub epic: Option<String>,
}

#[derive(Clone, Debug)]
pub struct CreateOptions {
	pub dry_run: bool,
	pub policy: DuplicatePolicy,
	pub epic: Option<String>,
}

impl CreateOptions {
	fn new(args: &CreateArgs, config: &AppConfig) -> Self {
		Self {
			dry_run: args.dry_run,
			policy: if args.exact_match { DuplicatePolicy::Exact } else { config.duplicate_policy },
			epic: args.epic.clone(),
		}
	}
}

/// Outcome counts of one run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunSummary {
	pub created: usize,
	pub skipped: usize,
	pub malformed: usize,
	pub failed: usize,
	/// `created` counts records that would have been created.
	pub dry_run: bool,
}

impl RunSummary {
	/// Nothing failed and nothing was malformed.
	pub fn is_clean(&self) -> bool {
		self.failed == 0 && self.malformed == 0
	}
}

impl fmt::Display for RunSummary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let verb = if self.dry_run { "Would create" } else { "Created" };
		write!(f, "{verb} {}, skipped {}, failed {}", self.created, self.skipped, self.failed + self.malformed)
	}
}

pub fn create_command<S, K>(config: &AppConfig, source: &S, sink: &K, args: CreateArgs) -> Result<RunSummary>
where
	S: TitleSource + ?Sized,
	K: IssueSink + ?Sized, {
	let content = std::fs::read_to_string(&args.file).wrap_err_with(|| format!("Failed to read {}", args.file.display()))?;
	let document = Document::new(content, args.file.display().to_string());
	let options = CreateOptions::new(&args, config);

	let existing = fetch_existing(source);
	create_issues(&document, &existing, sink, &options, &mut std::io::stdout().lock())
}

/// Titles already in the tracker. An unreachable tracker degrades to an empty set: every issue
/// gets created rather than none.
pub fn fetch_existing<S: TitleSource + ?Sized>(source: &S) -> ExistingTitles {
	match source.fetch_titles() {
		Ok(titles) => {
			tracing::info!(count = titles.len(), "fetched existing issue titles");
			titles
		}
		Err(e) => {
			tracing::warn!("could not fetch existing issue titles, treating every issue as new: {e:#}");
			ExistingTitles::new()
		}
	}
}

/// Create every new record of `document`, one at a time, in document order.
///
/// A failed creation or malformed record is reported and the run moves on; the summary tells the
/// caller whether anything went wrong. Only writing progress to `out` can abort the run.
pub fn create_issues<K, W>(document: &Document, existing: &ExistingTitles, sink: &K, options: &CreateOptions, out: &mut W) -> Result<RunSummary>
where
	K: IssueSink + ?Sized,
	W: Write, {
	let mut summary = RunSummary {
		dry_run: options.dry_run,
		..Default::default()
	};
	let mut records = document.records(existing).policy(options.policy);
	if let Some(epic) = &options.epic {
		records = records.only_epic(epic.as_str());
	}

	for result in records.by_ref() {
		let record = match result {
			Ok(record) => record,
			Err(e) => {
				tracing::error!(line = e.line, "skipping malformed issue");
				eprintln!("{:?}", miette::Report::new(e));
				summary.malformed += 1;
				continue;
			}
		};

		if options.dry_run {
			writeln!(out, "Would create: {}{}", record.title, format_labels(&record.labels))?;
			summary.created += 1;
			continue;
		}

		match sink.create_issue(&record) {
			Ok(created) => {
				tracing::debug!(title = %record.title, number = ?created.number, "created issue");
				writeln!(out, "Created: {} ({created})", record.title)?;
				summary.created += 1;
			}
			Err(e) => {
				tracing::error!(title = %record.title, "failed to create issue: {e:#}");
				writeln!(out, "FAILED: {}: {e}", record.title)?;
				summary.failed += 1;
			}
		}
	}
	summary.skipped = records.skipped();

	writeln!(out, "{summary}")?;
	Ok(summary)
}

fn format_labels(labels: &[String]) -> String {
	if labels.is_empty() { String::new() } else { format!(" [{}]", labels.join(", ")) }
}
