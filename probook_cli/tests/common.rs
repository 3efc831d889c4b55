#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn probook_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("probook"));
	cmd.env("NO_COLOR", "1")
		.env_remove("BLOG_BUILD_WORK_DIR")
		.env_remove("BLOG_BUILD_FILE")
		.env_remove("RUST_LOG");
	cmd
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> std::io::Result<()> {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)
}

pub fn snippet_source(problem: &str, body: &str) -> String {
	format!("/**\n * @problem: {problem}\n */\n{body}\n")
}

/// A project with one snippet, its explanation and a template asking for it.
pub fn two_sum_project(root: &Path) -> std::io::Result<()> {
	write_file(
		root,
		"data/leetcode/two-sum.cpp",
		&snippet_source("two-sum, leetcode-1", "int main() {}"),
	)?;
	write_file(root, "data/leetcode/two-sum.md", "Use a hash map.\n")?;
	write_file(
		root,
		"index.md",
		"# Solutions\n\n<!-- problem.leetcode-1.begin -->\n<!-- problem.leetcode-1.end -->\n",
	)
}
