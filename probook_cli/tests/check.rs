mod common;

use probook_core::AnyEmptyResult;

#[test]
fn check_passes_when_every_placeholder_has_a_snippet() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::two_sum_project(tmp.path())?;

	common::probook_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("all 1 placeholder(s) have a snippet"));

	assert!(!tmp.path().join("result.md").exists());

	Ok(())
}

#[test]
fn check_fails_on_missing_snippet() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::two_sum_project(tmp.path())?;
	common::write_file(
		tmp.path(),
		"index.md",
		"<!-- problem.two-sum.begin -->\n<!-- problem.two-sum.end -->\n<!-- \
		 problem.missing.begin -->\n<!-- problem.missing.end -->\n",
	)?;

	common::probook_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("placeholder `missing` has no snippet"))
		.stdout(predicates::str::contains("1 of 2 placeholder(s) have no snippet."));

	Ok(())
}

#[test]
fn check_surfaces_header_errors() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::two_sum_project(tmp.path())?;
	common::write_file(
		tmp.path(),
		"data/broken.cpp",
		"/**\n * @tags: greedy\n */\nint b;\n",
	)?;

	common::probook_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("missing_problem_key"));

	Ok(())
}
