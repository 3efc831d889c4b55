use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::ProbookError;
use crate::ProbookResult;
use crate::registry::DuplicatePolicy;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["probook.toml", ".probook.toml", ".config/probook.toml"];

pub const DEFAULT_WORK_DIR: &str = "data";
pub const DEFAULT_BLOG_FILE: &str = "index.md";
pub const DEFAULT_OUTPUT: &str = "result.md";

pub const DEFAULT_SNIPPET_EXTENSION: &str = "cpp";
pub const DEFAULT_EXPLANATION_EXTENSION: &str = "md";
/// Explanation used when a snippet has no companion explanation file.
pub const DEFAULT_PENDING_EXPLANATION: &str = "待补充。";

pub const DEFAULT_MARKER_NAMESPACE: &str = "problem";
pub const DEFAULT_EXPLANATION_HEADING: &str = "### 解答";
pub const DEFAULT_LISTING_HEADING: &str = "### 代码";

/// Configuration loaded from a `probook.toml` file.
///
/// ```toml
/// work_dir = "data"
/// blog_file = "index.md"
/// output = "result.md"
///
/// [snippets]
/// extensions = ["cpp"]
/// explanation_extension = "md"
/// pending_explanation = "待补充。"
/// duplicates = "overwrite"
///
/// [exclude]
/// patterns = ["drafts/"]
///
/// [markers]
/// namespace = "problem"
///
/// [render]
/// explanation_heading = "### 解答"
/// listing_heading = "### 代码"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct ProbookConfig {
	/// Directory holding the snippet tree, relative to the project root.
	#[serde(default)]
	pub work_dir: Option<PathBuf>,
	/// Template document with placeholder regions.
	#[serde(default)]
	pub blog_file: Option<PathBuf>,
	/// Where the merged document is written.
	#[serde(default)]
	pub output: Option<PathBuf>,
	#[serde(default)]
	pub snippets: SnippetsConfig,
	#[serde(default)]
	pub exclude: ExcludeConfig,
	#[serde(default)]
	pub markers: MarkersConfig,
	#[serde(default)]
	pub render: RenderConfig,
}

/// How snippet files and their explanations are recognized.
#[derive(Debug, Deserialize)]
pub struct SnippetsConfig {
	/// File extensions (without the dot) of snippet files.
	#[serde(default = "default_extensions")]
	pub extensions: Vec<String>,
	/// Extension of the companion explanation file sharing the snippet's
	/// stem.
	#[serde(default = "default_explanation_extension")]
	pub explanation_extension: String,
	/// Explanation used when no companion file exists.
	#[serde(default = "default_pending_explanation")]
	pub pending_explanation: String,
	/// What to do when two snippets declare the same identifier.
	#[serde(default)]
	pub duplicates: DuplicatePolicy,
}

impl Default for SnippetsConfig {
	fn default() -> Self {
		Self {
			extensions: default_extensions(),
			explanation_extension: default_explanation_extension(),
			pending_explanation: default_pending_explanation(),
			duplicates: DuplicatePolicy::default(),
		}
	}
}

/// Gitignore-style patterns, relative to the snippet directory, for files
/// and directories the scanner skips. Hidden directories are always skipped.
#[derive(Debug, Default, Deserialize)]
pub struct ExcludeConfig {
	#[serde(default)]
	pub patterns: Vec<String>,
}

/// Placeholder marker syntax. With the default namespace regions look like
/// `<!-- problem.two-sum.begin -->` ... `<!-- problem.two-sum.end -->`.
#[derive(Debug, Deserialize)]
pub struct MarkersConfig {
	#[serde(default = "default_marker_namespace")]
	pub namespace: String,
}

impl Default for MarkersConfig {
	fn default() -> Self {
		Self {
			namespace: default_marker_namespace(),
		}
	}
}

/// Headings of the sections inserted into each merged region.
#[derive(Debug, Deserialize)]
pub struct RenderConfig {
	#[serde(default = "default_explanation_heading")]
	pub explanation_heading: String,
	#[serde(default = "default_listing_heading")]
	pub listing_heading: String,
}

impl Default for RenderConfig {
	fn default() -> Self {
		Self {
			explanation_heading: default_explanation_heading(),
			listing_heading: default_listing_heading(),
		}
	}
}

fn default_extensions() -> Vec<String> {
	vec![DEFAULT_SNIPPET_EXTENSION.to_string()]
}

fn default_explanation_extension() -> String {
	DEFAULT_EXPLANATION_EXTENSION.to_string()
}

fn default_pending_explanation() -> String {
	DEFAULT_PENDING_EXPLANATION.to_string()
}

fn default_marker_namespace() -> String {
	DEFAULT_MARKER_NAMESPACE.to_string()
}

fn default_explanation_heading() -> String {
	DEFAULT_EXPLANATION_HEADING.to_string()
}

fn default_listing_heading() -> String {
	DEFAULT_LISTING_HEADING.to_string()
}

impl ProbookConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> ProbookResult<Option<ProbookConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: ProbookConfig =
			toml::from_str(&content).map_err(|e| ProbookError::ConfigParse(e.to_string()))?;

		Ok(Some(config))
	}
}

/// Paths given explicitly, typically from command-line flags or environment
/// variables. They take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
	pub work_dir: Option<PathBuf>,
	pub blog_file: Option<PathBuf>,
	pub output: Option<PathBuf>,
}

/// The input and output locations of a build, resolved against the project
/// root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPaths {
	pub work_dir: PathBuf,
	pub blog_file: PathBuf,
	pub output: PathBuf,
}

impl BuildPaths {
	/// Resolve each path from `overrides`, then `config`, then the defaults.
	/// Relative paths are joined onto `root`.
	pub fn resolve(root: &Path, overrides: &PathOverrides, config: Option<&ProbookConfig>) -> Self {
		let pick = |explicit: Option<&PathBuf>, configured: Option<&PathBuf>, default: &str| {
			let path = explicit
				.or(configured)
				.cloned()
				.unwrap_or_else(|| PathBuf::from(default));
			root.join(path)
		};

		Self {
			work_dir: pick(
				overrides.work_dir.as_ref(),
				config.and_then(|c| c.work_dir.as_ref()),
				DEFAULT_WORK_DIR,
			),
			blog_file: pick(
				overrides.blog_file.as_ref(),
				config.and_then(|c| c.blog_file.as_ref()),
				DEFAULT_BLOG_FILE,
			),
			output: pick(
				overrides.output.as_ref(),
				config.and_then(|c| c.output.as_ref()),
				DEFAULT_OUTPUT,
			),
		}
	}
}
