use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum ProbookError {
	#[error(transparent)]
	#[diagnostic(code(probook::io_error))]
	Io(#[from] std::io::Error),

	#[error("snippet `{file}` does not list its own identifier `{identifier}` in `@problem: {declared}`")]
	#[diagnostic(
		code(probook::mismatched_identifier),
		help("add `{identifier}` to the `@problem` line or rename the file")
	)]
	MismatchedIdentifier {
		file: String,
		identifier: String,
		declared: String,
	},

	#[error("snippet `{file}` has a header without a `@problem` line")]
	#[diagnostic(
		code(probook::missing_problem_key),
		help("add ` * @problem: <identifier>` to the header comment")
	)]
	MissingProblemKey { file: String },

	#[error("duplicate identifier `{identifier}`: declared in `{first_file}` and `{second_file}`")]
	#[diagnostic(
		code(probook::duplicate_identifier),
		help("each identifier must be answered by a single snippet when duplicates are rejected")
	)]
	DuplicateIdentifier {
		identifier: String,
		first_file: String,
		second_file: String,
	},

	#[error("snippet directory not found: `{path}`")]
	#[diagnostic(
		code(probook::work_dir_not_found),
		help("pass `--work-dir`, set `BLOG_BUILD_WORK_DIR`, or set `work_dir` in probook.toml")
	)]
	WorkDirNotFound { path: String },

	#[error("symlink cycle detected at: `{path}`")]
	#[diagnostic(
		code(probook::symlink_cycle),
		help("remove the circular symlink or exclude this path")
	)]
	SymlinkCycle { path: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(probook::config_parse),
		help("check that probook.toml is valid TOML")
	)]
	ConfigParse(String),
}

pub type ProbookResult<T> = Result<T, ProbookError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
