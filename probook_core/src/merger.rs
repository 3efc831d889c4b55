use crate::config::DEFAULT_EXPLANATION_HEADING;
use crate::config::DEFAULT_LISTING_HEADING;
use crate::config::DEFAULT_MARKER_NAMESPACE;
use crate::config::ProbookConfig;
use crate::registry::SnippetEntry;
use crate::registry::SnippetRegistry;

const MARKER_OPEN: &str = "<!-- ";
const BEGIN_SUFFIX: &str = ".begin -->";
const END_SUFFIX: &str = ".end -->";

/// Marker syntax and headings used when merging snippets into a template.
#[derive(Debug, Clone)]
pub struct MergeOptions {
	/// Namespace embedded in every marker, `problem` in
	/// `<!-- problem.<id>.begin -->`.
	pub namespace: String,
	pub explanation_heading: String,
	pub listing_heading: String,
}

impl Default for MergeOptions {
	fn default() -> Self {
		Self {
			namespace: DEFAULT_MARKER_NAMESPACE.to_string(),
			explanation_heading: DEFAULT_EXPLANATION_HEADING.to_string(),
			listing_heading: DEFAULT_LISTING_HEADING.to_string(),
		}
	}
}

impl MergeOptions {
	/// Construct [`MergeOptions`] from a [`ProbookConfig`].
	pub fn from_config(config: Option<&ProbookConfig>) -> Self {
		let Some(config) = config else {
			return Self::default();
		};

		Self {
			namespace: config.markers.namespace.clone(),
			explanation_heading: config.render.explanation_heading.clone(),
			listing_heading: config.render.listing_heading.clone(),
		}
	}

	/// `<!-- problem.` with the configured namespace.
	fn marker_prefix(&self) -> String {
		format!("{MARKER_OPEN}{}.", self.namespace)
	}

	pub fn opening_marker(&self, identifier: &str) -> String {
		format!("{}{identifier}{BEGIN_SUFFIX}", self.marker_prefix())
	}

	pub fn closing_marker(&self, identifier: &str) -> String {
		format!("{}{identifier}{END_SUFFIX}", self.marker_prefix())
	}
}

/// A placeholder region found in a template. Offsets are byte offsets into
/// the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderRegion {
	pub identifier: String,
	/// Start of the opening marker.
	pub start: usize,
	/// Start of the closing marker, where merged content is inserted.
	pub closing_start: usize,
	/// End of the closing marker.
	pub end: usize,
}

/// Result of merging snippets into a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
	/// The merged document.
	pub content: String,
	/// Identifiers of the regions that received content, in document order.
	pub merged: Vec<String>,
	/// Identifiers of regions left untouched because no snippet answers them.
	pub missing: Vec<String>,
}

/// Find every placeholder region in `template`, left to right.
///
/// The identifier is the text between `<!-- problem.` and the first
/// `.begin -->` on the same line. A region closes at the nearest following
/// `<!-- problem.<id>.end -->` for the same identifier. An opening marker
/// without a closing marker is not a region and scanning resumes right after
/// it.
pub fn find_regions(template: &str, options: &MergeOptions) -> Vec<PlaceholderRegion> {
	let prefix = options.marker_prefix();
	let mut regions = Vec::new();
	let mut search_from = 0;

	while let Some(found) = template[search_from..].find(&prefix) {
		let start = search_from + found;
		let after_prefix = start + prefix.len();

		let Some(identifier) = opening_identifier(&template[after_prefix..]) else {
			search_from = after_prefix;
			continue;
		};

		let opening_end = after_prefix + identifier.len() + BEGIN_SUFFIX.len();
		let closing = options.closing_marker(identifier);

		let Some(offset) = template[opening_end..].find(&closing) else {
			tracing::debug!(identifier, "opening marker has no closing marker");
			search_from = opening_end;
			continue;
		};

		let closing_start = opening_end + offset;
		let end = closing_start + closing.len();
		regions.push(PlaceholderRegion {
			identifier: identifier.to_string(),
			start,
			closing_start,
			end,
		});
		search_from = end;
	}

	regions
}

/// Extract the identifier from the text following `<!-- problem.`.
fn opening_identifier(rest: &str) -> Option<&str> {
	let line = &rest[..rest.find('\n').unwrap_or(rest.len())];
	let first = line.chars().next()?.len_utf8();
	let end = first + line[first..].find(BEGIN_SUFFIX)?;

	Some(&line[..end])
}

/// Merge registered snippets into every placeholder region of `template`.
///
/// Regions without a registered snippet are copied byte for byte. For the
/// others, an explanation section and a fenced listing are inserted directly
/// before the closing marker, separated from the preceding text by a blank
/// line. Nothing already in the region is replaced, so merging the output
/// again appends a second copy.
pub fn merge_document(
	template: &str,
	registry: &SnippetRegistry,
	options: &MergeOptions,
) -> MergeOutcome {
	let mut content = String::with_capacity(template.len());
	let mut merged = Vec::new();
	let mut missing = Vec::new();
	let mut cursor = 0;

	for region in find_regions(template, options) {
		tracing::info!("Placeholder region: {}", region.identifier);

		let Some(entry) = registry.get(&region.identifier) else {
			tracing::debug!(
				identifier = region.identifier.as_str(),
				"no snippet registered, leaving region unchanged"
			);
			missing.push(region.identifier);
			continue;
		};

		content.push_str(&template[cursor..region.closing_start]);
		pad_with_blank_line(&mut content);
		content.push_str(&render_entry(entry, options));
		content.push_str("\n\n");
		cursor = region.closing_start;
		merged.push(region.identifier);
	}

	content.push_str(&template[cursor..]);

	MergeOutcome {
		content,
		merged,
		missing,
	}
}

/// Render the explanation and listing sections for `entry`.
pub fn render_entry(entry: &SnippetEntry, options: &MergeOptions) -> String {
	format!(
		"{}\n\n{}\n\n{}\n\n```{}\n{}\n```",
		options.explanation_heading,
		entry.explanation,
		options.listing_heading,
		entry.language,
		entry.listing
	)
}

/// Append newlines until `content` ends with a blank line.
fn pad_with_blank_line(content: &mut String) {
	if content.ends_with("\n\n") {
		return;
	}

	if content.ends_with('\n') {
		content.push('\n');
	} else {
		content.push_str("\n\n");
	}
}
