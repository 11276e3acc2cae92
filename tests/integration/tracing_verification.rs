//! Integration tests that verify mock calls via tracing output.
//!
//! These tests spawn the binary with EPICS_TRACE_FILE set, run a command, then check the
//! expected mock methods were called by examining the trace log.

use rstest::rstest;

use crate::{
	assert_traced,
	common::{TestContext, ctx},
};

#[rstest]
fn test_titles_fetched_once_then_issues_created_in_order(ctx: TestContext) {
	let path = ctx.write("plan.md", "## Epic 1\n### First\n### Second\n## Epic 2\n### Third\n");

	let (status, _, _) = ctx.run_create(&path, &["--repo", "acme/widgets"]);
	assert!(status.success());

	let trace = ctx.trace();
	assert_traced!(trace, "fetch_titles", "acme/widgets");
	assert_traced!(trace, "create_issue", "acme/widgets");

	let fetches = trace.mock_calls().iter().filter(|e| e.fields.message.as_deref() == Some("fetch_titles")).count();
	assert_eq!(fetches, 1);
	assert_eq!(trace.created_titles(), vec!["First", "Second", "Third"]);
}

#[rstest]
fn test_dry_run_never_creates(ctx: TestContext) {
	let path = ctx.write("plan.md", "## Epic 1\n### First\n");

	let (status, _, _) = ctx.run_create(&path, &["--dry-run"]);
	assert!(status.success());

	let trace = ctx.trace();
	assert_traced!(trace, "fetch_titles");
	assert!(!trace.has_mock_call("create_issue"), "{:#?}", trace.mock_calls());
}
