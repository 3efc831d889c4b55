use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;

use crate::ProbookError;
use crate::ProbookResult;
use crate::config::DEFAULT_EXPLANATION_EXTENSION;
use crate::config::DEFAULT_PENDING_EXPLANATION;
use crate::config::DEFAULT_SNIPPET_EXTENSION;
use crate::config::ProbookConfig;
use crate::header::parse_header;
use crate::registry::DuplicatePolicy;
use crate::registry::SnippetEntry;
use crate::registry::SnippetRegistry;

/// Options for controlling how a snippet tree is scanned.
///
/// Use [`ScanOptions::default()`] for the built-in conventions or
/// [`ScanOptions::from_config`] to construct from a [`ProbookConfig`].
#[derive(Debug, Clone)]
pub struct ScanOptions {
	/// Extensions (without the dot) of snippet files.
	pub extensions: Vec<String>,
	/// Extension of companion explanation files.
	pub explanation_extension: String,
	/// Explanation used when no companion file exists.
	pub pending_explanation: String,
	/// How identifiers declared by more than one snippet are handled.
	pub duplicates: DuplicatePolicy,
	/// Gitignore-style patterns to exclude from scanning.
	pub exclude_patterns: Vec<String>,
}

impl Default for ScanOptions {
	fn default() -> Self {
		Self {
			extensions: vec![DEFAULT_SNIPPET_EXTENSION.to_string()],
			explanation_extension: DEFAULT_EXPLANATION_EXTENSION.to_string(),
			pending_explanation: DEFAULT_PENDING_EXPLANATION.to_string(),
			duplicates: DuplicatePolicy::default(),
			exclude_patterns: Vec::new(),
		}
	}
}

impl ScanOptions {
	/// Construct [`ScanOptions`] from a [`ProbookConfig`].
	pub fn from_config(config: Option<&ProbookConfig>) -> Self {
		let Some(config) = config else {
			return Self::default();
		};

		Self {
			extensions: config.snippets.extensions.clone(),
			explanation_extension: config.snippets.explanation_extension.clone(),
			pending_explanation: config.snippets.pending_explanation.clone(),
			duplicates: config.snippets.duplicates,
			exclude_patterns: config.exclude.patterns.clone(),
		}
	}
}

/// Scan a snippet tree with the default [`ScanOptions`].
pub fn scan_tree(root: &Path) -> ProbookResult<SnippetRegistry> {
	scan_tree_with_options(root, &ScanOptions::default())
}

/// Walk `root` and register every annotated snippet found.
///
/// Within a directory, entries are visited in file name order: snippet files
/// first, then subdirectories. Later registrations win on duplicate
/// identifiers unless [`DuplicatePolicy::Error`] is configured, so this order
/// decides which snippet answers a contested identifier.
pub fn scan_tree_with_options(root: &Path, options: &ScanOptions) -> ProbookResult<SnippetRegistry> {
	if !root.is_dir() {
		return Err(ProbookError::WorkDirNotFound {
			path: root.display().to_string(),
		});
	}

	let exclude = build_exclude_matcher(root, &options.exclude_patterns)?;
	let mut registry = SnippetRegistry::with_policy(options.duplicates);
	let mut ancestors = HashSet::new();

	scan_dir(root, options, &exclude, &mut registry, &mut ancestors)?;

	tracing::debug!(identifiers = registry.len(), "snippet scan complete");
	Ok(registry)
}

fn scan_dir(
	dir: &Path,
	options: &ScanOptions,
	exclude: &Gitignore,
	registry: &mut SnippetRegistry,
	ancestors: &mut HashSet<PathBuf>,
) -> ProbookResult<()> {
	// Only a directory that is its own ancestor is a cycle. A directory
	// symlinked from two places is scanned once per path.
	let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
	if !ancestors.insert(canonical.clone()) {
		return Err(ProbookError::SymlinkCycle {
			path: dir.display().to_string(),
		});
	}

	tracing::info!("Loading directory: {}", dir.display());

	let mut paths = std::fs::read_dir(dir)?
		.map(|entry| entry.map(|entry| entry.path()))
		.collect::<Result<Vec<_>, _>>()?;
	paths.sort();

	for path in &paths {
		if !path.is_file()
			|| !is_snippet_file(path, &options.extensions)
			|| exclude.matched(path, false).is_ignore()
		{
			continue;
		}

		if let Some(entry) = read_snippet(path, options)? {
			registry.register(entry)?;
		}
	}

	for path in &paths {
		if !path.is_dir() || is_hidden(path) || exclude.matched(path, true).is_ignore() {
			continue;
		}

		scan_dir(path, options, exclude, registry, ancestors)?;
	}

	ancestors.remove(&canonical);
	Ok(())
}

/// Read one snippet file. Returns `Ok(None)` when the file has no header.
pub fn read_snippet(path: &Path, options: &ScanOptions) -> ProbookResult<Option<SnippetEntry>> {
	let Some(identifier) = snippet_identifier(path) else {
		return Ok(None);
	};

	tracing::info!("Adding problem: {identifier}");
	let content = std::fs::read_to_string(path)?;

	let Some(parsed) = parse_header(&content) else {
		tracing::info!("Skipped code file {}", path.display());
		return Ok(None);
	};

	let identifiers = parsed.header.identifiers(identifier, path)?;
	let explanation = read_explanation(path, identifier, options)?;
	let has_explanation = explanation.is_some();
	let language = path
		.extension()
		.and_then(|ext| ext.to_str())
		.unwrap_or_default()
		.to_string();

	Ok(Some(SnippetEntry {
		identifiers,
		tags: parsed.header.tags(),
		date: parsed.header.date(),
		explanation: explanation.unwrap_or_else(|| options.pending_explanation.clone()),
		has_explanation,
		listing: parsed.listing,
		language,
		file: path.to_path_buf(),
		metadata: parsed.header,
	}))
}

/// The identifier a snippet file answers by name: its file name without the
/// extension.
pub fn snippet_identifier(path: &Path) -> Option<&str> {
	path.file_stem().and_then(|stem| stem.to_str())
}

/// Read the explanation stored next to the snippet, if there is one.
fn read_explanation(
	path: &Path,
	identifier: &str,
	options: &ScanOptions,
) -> ProbookResult<Option<String>> {
	let explanation_path =
		path.with_file_name(format!("{identifier}.{}", options.explanation_extension));

	if !explanation_path.is_file() {
		return Ok(None);
	}

	let explanation = std::fs::read_to_string(&explanation_path)?;
	Ok(Some(explanation.trim().to_string()))
}

fn is_snippet_file(path: &Path, extensions: &[String]) -> bool {
	let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
		return false;
	};

	extensions.iter().any(|candidate| candidate == ext)
}

fn is_hidden(path: &Path) -> bool {
	path.file_name()
		.and_then(|name| name.to_str())
		.is_some_and(|name| name.starts_with('.'))
}

/// Build a `Gitignore` matcher from the configured exclude patterns.
fn build_exclude_matcher(root: &Path, patterns: &[String]) -> ProbookResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(root);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|e| {
			ProbookError::ConfigParse(format!("invalid exclude pattern `{pattern}`: {e}"))
		})?;
	}
	builder
		.build()
		.map_err(|e| ProbookError::ConfigParse(format!("failed to build exclude rules: {e}")))
}
