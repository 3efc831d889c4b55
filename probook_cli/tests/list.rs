mod common;

use probook_core::AnyEmptyResult;
use serde_json::Value;

#[test]
fn list_prints_every_identifier() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::two_sum_project(tmp.path())?;

	common::probook_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("leetcode-1 data/leetcode/two-sum.cpp"))
		.stdout(predicates::str::contains("two-sum data/leetcode/two-sum.cpp"))
		.stdout(predicates::str::contains("2 identifier(s)"));

	Ok(())
}

#[test]
fn list_includes_tags_and_date() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(
		tmp.path(),
		"data/a.cpp",
		"/**\n * @problem: a\n * @tags: greedy, sorting\n * @date: 2021-03-14\n */\nint a;\n",
	)?;

	common::probook_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("[greedy, sorting] (2021-03-14)"));

	Ok(())
}

#[test]
fn list_json_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::two_sum_project(tmp.path())?;
	common::write_file(
		tmp.path(),
		"data/pending.cpp",
		&common::snippet_source("pending", "int p;"),
	)?;

	let output = common::probook_cmd()
		.arg("list")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;
	assert!(output.status.success());

	let listed: Value = serde_json::from_slice(&output.stdout)?;
	let listed = listed.as_array().ok_or("expected a json array")?;
	let identifiers: Vec<&str> = listed
		.iter()
		.filter_map(|item| item["identifier"].as_str())
		.collect();
	assert_eq!(identifiers, vec!["leetcode-1", "pending", "two-sum"]);

	assert_eq!(listed[0]["has_explanation"], Value::Bool(true));
	assert_eq!(listed[1]["has_explanation"], Value::Bool(false));
	assert_eq!(
		listed[2]["identifiers"],
		serde_json::json!(["two-sum", "leetcode-1"])
	);

	Ok(())
}

#[test]
fn list_json_counts_companion_file_with_pending_text_as_explanation() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(
		tmp.path(),
		"data/todo.cpp",
		&common::snippet_source("todo", "int t;"),
	)?;
	common::write_file(tmp.path(), "data/todo.md", "待补充。\n")?;

	let output = common::probook_cmd()
		.arg("list")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;
	assert!(output.status.success());

	let listed: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(listed[0]["identifier"], Value::from("todo"));
	assert_eq!(listed[0]["has_explanation"], Value::Bool(true));

	Ok(())
}

#[test]
fn list_reports_empty_tree() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join("data"))?;

	common::probook_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("No snippets found."));

	Ok(())
}
