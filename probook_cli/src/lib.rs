use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

/// Environment variable naming the snippet directory.
pub const WORK_DIR_ENV: &str = "BLOG_BUILD_WORK_DIR";
/// Environment variable naming the template document.
pub const BLOG_FILE_ENV: &str = "BLOG_BUILD_FILE";

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Merge annotated solution snippets into a markdown blog post.",
	long_about = "probook reads a tree of solution snippets, each starting with a `/** @problem: \
	              ... */` header, and fills the matching `<!-- problem.<id>.begin -->` ... \
	              `<!-- problem.<id>.end -->` regions of a markdown template with the snippet's \
	              explanation and source listing.\n\nQuick start:\n  probook build   Write the \
	              merged post\n  probook list    Show every registered snippet\n  probook check   \
	              Report placeholders without a snippet"
)]
pub struct ProbookCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory. Relative paths and the config
	/// file are resolved from here.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Directory containing the snippet tree.
	#[arg(long, global = true, env = WORK_DIR_ENV)]
	pub work_dir: Option<PathBuf>,

	/// Markdown template containing placeholder regions.
	#[arg(long, global = true, env = BLOG_FILE_ENV)]
	pub blog_file: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Scan the snippets, merge them into the template and write the result.
	///
	/// This is the default when no subcommand is given. The output file is
	/// overwritten. Nothing is written when a snippet header is invalid.
	Build {
		/// Where to write the merged document. Defaults to `output` from
		/// probook.toml, then `result.md`.
		#[arg(long, short)]
		output: Option<PathBuf>,

		/// Print the merged document to stdout instead of writing it.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Fail when two snippets declare the same identifier instead of
		/// letting the later one win.
		#[arg(long, default_value_t = false)]
		strict: bool,
	},
	/// List every registered snippet identifier.
	List {
		/// Output format. Use `text` for human-readable output or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Report placeholder regions that no snippet answers.
	///
	/// Exits with a non-zero status code when at least one placeholder has no
	/// matching snippet.
	Check,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
