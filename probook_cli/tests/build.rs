mod common;

use predicates::prelude::PredicateBooleanExt;
use probook_core::AnyEmptyResult;

const MERGED_TWO_SUM: &str = "# Solutions\n\n<!-- problem.leetcode-1.begin -->\n\n### 解答\n\nUse a \
                              hash map.\n\n### 代码\n\n```cpp\nint main() {}\n```\n\n<!-- \
                              problem.leetcode-1.end -->";

#[test]
fn build_writes_merged_result() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::two_sum_project(tmp.path())?;

	common::probook_cmd()
		.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Merged 1 region(s) into result.md."));

	let result = std::fs::read_to_string(tmp.path().join("result.md"))?;
	similar_asserts::assert_eq!(result, MERGED_TWO_SUM);

	Ok(())
}

#[test]
fn build_is_the_default_command() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::two_sum_project(tmp.path())?;

	common::probook_cmd()
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	assert!(tmp.path().join("result.md").is_file());

	Ok(())
}

#[test]
fn build_reads_locations_from_environment() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(
		tmp.path(),
		"snippets/a.cpp",
		&common::snippet_source("a", "return 0;"),
	)?;
	common::write_file(
		tmp.path(),
		"post.md",
		"<!-- problem.a.begin -->\n<!-- problem.a.end -->",
	)?;

	common::probook_cmd()
		.env("BLOG_BUILD_WORK_DIR", "snippets")
		.env("BLOG_BUILD_FILE", "post.md")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	let result = std::fs::read_to_string(tmp.path().join("result.md"))?;
	assert!(result.contains("```cpp\nreturn 0;\n```"));
	assert!(result.contains("待补充。"));

	Ok(())
}

#[test]
fn build_flags_take_precedence_over_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::two_sum_project(tmp.path())?;
	common::write_file(tmp.path(), "probook.toml", "output = \"from-config.md\"\n")?;

	common::probook_cmd()
		.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.arg("--output")
		.arg("out/post.md")
		.assert()
		.success()
		.stdout(predicates::str::contains("post.md"));

	assert!(tmp.path().join("out/post.md").is_file());
	assert!(!tmp.path().join("from-config.md").exists());

	Ok(())
}

#[test]
fn build_dry_run_prints_without_writing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::two_sum_project(tmp.path())?;

	let output = common::probook_cmd()
		.arg("build")
		.arg("--dry-run")
		.arg("--path")
		.arg(tmp.path())
		.output()?;

	assert!(output.status.success());
	similar_asserts::assert_eq!(String::from_utf8(output.stdout)?, MERGED_TWO_SUM);
	assert!(!tmp.path().join("result.md").exists());

	Ok(())
}

#[test]
fn build_reports_unfilled_placeholders() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::two_sum_project(tmp.path())?;
	common::write_file(
		tmp.path(),
		"index.md",
		"<!-- problem.two-sum.begin -->\n<!-- problem.two-sum.end -->\n\n<!-- \
		 problem.unknown.begin -->\n<!-- problem.unknown.end -->\n",
	)?;

	common::probook_cmd()
		.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Merged 1 region(s)"))
		.stdout(predicates::str::contains("1 placeholder(s) left unchanged"));

	let result = std::fs::read_to_string(tmp.path().join("result.md"))?;
	assert!(result.ends_with("<!-- problem.unknown.begin -->\n<!-- problem.unknown.end -->"));

	Ok(())
}

#[test]
fn build_fails_on_mismatched_identifier() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::two_sum_project(tmp.path())?;
	common::write_file(
		tmp.path(),
		"data/three-sum.cpp",
		&common::snippet_source("3sum", "int main() {}"),
	)?;

	common::probook_cmd()
		.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("mismatched_identifier"));

	assert!(!tmp.path().join("result.md").exists());

	Ok(())
}

#[test]
fn build_strict_rejects_duplicate_identifiers() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::two_sum_project(tmp.path())?;
	common::write_file(
		tmp.path(),
		"data/other/leetcode-1.cpp",
		&common::snippet_source("leetcode-1", "int other() {}"),
	)?;

	common::probook_cmd()
		.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	let result = std::fs::read_to_string(tmp.path().join("result.md"))?;
	assert!(result.contains("int other() {}"));
	std::fs::remove_file(tmp.path().join("result.md"))?;

	common::probook_cmd()
		.arg("build")
		.arg("--strict")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("duplicate_identifier"));

	assert!(!tmp.path().join("result.md").exists());

	Ok(())
}

#[test]
fn build_fails_when_work_dir_is_missing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "index.md", "# Empty\n")?;

	common::probook_cmd()
		.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("work_dir_not_found"))
		.stdout(predicates::str::contains("Merged").not());

	Ok(())
}
