//! GitHub backend that shells out to the `gh` CLI.
//!
//! Authentication and transport are entirely gh's business; we only build argument lists and
//! read its stdout.

use std::process::Command;

use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use epics::{ExistingTitles, IssueRecord};
use serde::Deserialize;

use super::{CreatedIssue, IssueSink, TitleSource};
use crate::config::AppConfig;

/// Element of `gh issue list --json title`.
#[derive(Debug, Deserialize)]
struct ListedIssue {
	title: String,
}

#[derive(Clone, Debug)]
pub struct GhCli {
	program: String,
	repo: Option<String>,
	list_limit: usize,
}

impl GhCli {
	pub fn new(config: &AppConfig) -> Self {
		Self {
			program: config.gh_path.clone(),
			repo: config.repo.clone(),
			list_limit: config.list_limit,
		}
	}

	fn list_args(&self) -> Vec<String> {
		let mut args: Vec<String> = ["issue", "list", "--state", "all", "--json", "title", "--limit"].map(String::from).into();
		args.push(self.list_limit.to_string());
		self.push_repo(&mut args);
		args
	}

	fn create_args(&self, record: &IssueRecord) -> Vec<String> {
		let mut args: Vec<String> = vec!["issue".into(), "create".into(), "--title".into(), record.title.clone(), "--body".into(), record.body.clone()];
		for label in &record.labels {
			args.push("--label".into());
			args.push(label.clone());
		}
		self.push_repo(&mut args);
		args
	}

	fn push_repo(&self, args: &mut Vec<String>) {
		if let Some(repo) = &self.repo {
			args.push("--repo".into());
			args.push(repo.clone());
		}
	}

	/// Run gh, returning its stdout. A non-zero exit becomes an error carrying gh's stderr.
	fn run(&self, args: &[String]) -> Result<String> {
		tracing::debug!(program = %self.program, ?args, "running gh");
		let output = Command::new(&self.program).args(args).output();

		match output {
			Ok(out) if out.status.success() => Ok(String::from_utf8(out.stdout)?),
			Ok(out) => bail!("{} failed ({}): {}", self.program, out.status, String::from_utf8_lossy(&out.stderr).trim()),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				bail!("{} is not installed. Install it: https://cli.github.com", self.program)
			}
			Err(e) => bail!("Failed to run {}: {}", self.program, e),
		}
	}
}

fn parse_titles(json: &str) -> Result<ExistingTitles> {
	let listed: Vec<ListedIssue> = serde_json::from_str(json).wrap_err("gh returned unexpected issue list JSON")?;
	Ok(listed.into_iter().map(|issue| issue.title).collect())
}

/// gh prints progress to stderr and the new issue's URL as the last line of stdout.
fn parse_created(stdout: &str) -> Result<CreatedIssue> {
	let url = stdout.lines().map(str::trim).rfind(|line| !line.is_empty()).ok_or_else(|| eyre!("gh printed no issue URL"))?;
	Ok(CreatedIssue::from_url(url))
}

impl TitleSource for GhCli {
	fn fetch_titles(&self) -> Result<ExistingTitles> {
		let stdout = self.run(&self.list_args())?;
		parse_titles(&stdout)
	}
}

impl IssueSink for GhCli {
	fn create_issue(&self, record: &IssueRecord) -> Result<CreatedIssue> {
		let stdout = self.run(&self.create_args(record))?;
		parse_created(&stdout)
	}
}
