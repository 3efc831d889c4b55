use std::path::Path;
use std::path::PathBuf;

use crate::ProbookResult;
use crate::config::BuildPaths;
use crate::config::PathOverrides;
use crate::config::ProbookConfig;
use crate::merger::MergeOptions;
use crate::merger::MergeOutcome;
use crate::merger::merge_document;
use crate::registry::SnippetRegistry;
use crate::scanner::ScanOptions;
use crate::scanner::scan_tree_with_options;

/// Everything needed to run a build: resolved paths plus scan and merge
/// options.
#[derive(Debug, Clone)]
pub struct BuildContext {
	pub paths: BuildPaths,
	pub scan: ScanOptions,
	pub merge: MergeOptions,
}

impl BuildContext {
	/// Load the project config at `root` (if any) and resolve the build
	/// paths, preferring `overrides`.
	pub fn load(root: &Path, overrides: &PathOverrides) -> ProbookResult<Self> {
		let config = ProbookConfig::load(root)?;
		Ok(Self::from_config(root, overrides, config.as_ref()))
	}

	pub fn from_config(
		root: &Path,
		overrides: &PathOverrides,
		config: Option<&ProbookConfig>,
	) -> Self {
		Self {
			paths: BuildPaths::resolve(root, overrides, config),
			scan: ScanOptions::from_config(config),
			merge: MergeOptions::from_config(config),
		}
	}
}

/// The merged document produced by [`render_document`], before it is
/// written.
#[derive(Debug)]
pub struct RenderedDocument {
	pub registry: SnippetRegistry,
	pub outcome: MergeOutcome,
}

/// Result of a completed [`build`].
#[derive(Debug)]
pub struct BuildResult {
	/// Where the merged document was written.
	pub output: PathBuf,
	/// Number of identifiers registered during the scan.
	pub identifier_count: usize,
	pub outcome: MergeOutcome,
}

/// Read the template, dropping carriage returns and surrounding whitespace.
pub fn read_template(path: &Path) -> ProbookResult<String> {
	let content = std::fs::read_to_string(path)?;
	Ok(content.replace('\r', "").trim().to_string())
}

/// Scan the snippet tree, then merge it into the template. Nothing is
/// written.
pub fn render_document(ctx: &BuildContext) -> ProbookResult<RenderedDocument> {
	tracing::info!("Working on directory: {}", ctx.paths.work_dir.display());
	tracing::info!("Working on blog file: {}", ctx.paths.blog_file.display());

	let registry = scan_tree_with_options(&ctx.paths.work_dir, &ctx.scan)?;
	let template = read_template(&ctx.paths.blog_file)?;
	let outcome = merge_document(&template, &registry, &ctx.merge);

	Ok(RenderedDocument { registry, outcome })
}

/// Scan, merge, and write the merged document to the configured output.
/// Any fatal error during the scan aborts before the output is touched.
pub fn build(ctx: &BuildContext) -> ProbookResult<BuildResult> {
	let rendered = render_document(ctx)?;
	write_output(&ctx.paths.output, &rendered.outcome.content)?;

	Ok(BuildResult {
		output: ctx.paths.output.clone(),
		identifier_count: rendered.registry.len(),
		outcome: rendered.outcome,
	})
}

/// Write `content` to `path`, creating parent directories and replacing any
/// existing file.
pub fn write_output(path: &Path, content: &str) -> ProbookResult<()> {
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)?;
	Ok(())
}
