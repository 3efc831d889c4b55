use std::path::Path;

use serde::Serialize;

use crate::ProbookError;
use crate::ProbookResult;

/// First line of a snippet header.
pub const HEADER_OPEN: &str = "/**";
/// Prefix of every header field line.
pub const FIELD_PREFIX: &str = " * @";
/// Start of the line closing a snippet header.
pub const HEADER_CLOSE: &str = " */";
/// Separator between items of a list valued field such as `@problem`.
pub const LIST_SEPARATOR: &str = ", ";

pub const PROBLEM_KEY: &str = "problem";
pub const TAGS_KEY: &str = "tags";
pub const DATE_KEY: &str = "date";

/// The `@key: value` lines of a snippet header, in the order they appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnippetHeader {
	pub fields: Vec<(String, String)>,
}

impl SnippetHeader {
	/// Value of `key`. When a key repeats the last occurrence wins.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.fields
			.iter()
			.rev()
			.find(|(name, _)| name == key)
			.map(|(_, value)| value.as_str())
	}

	/// Identifiers declared by `@problem`, validated against the identifier
	/// derived from the snippet's own file name.
	pub fn identifiers(&self, own_identifier: &str, file: &Path) -> ProbookResult<Vec<String>> {
		let Some(declared) = self.get(PROBLEM_KEY) else {
			return Err(ProbookError::MissingProblemKey {
				file: file.display().to_string(),
			});
		};

		let identifiers = split_list(declared);
		if !identifiers.iter().any(|id| id == own_identifier) {
			return Err(ProbookError::MismatchedIdentifier {
				file: file.display().to_string(),
				identifier: own_identifier.to_string(),
				declared: declared.to_string(),
			});
		}

		Ok(identifiers)
	}

	pub fn tags(&self) -> Vec<String> {
		self.get(TAGS_KEY).map(split_list).unwrap_or_default()
	}

	pub fn date(&self) -> Option<String> {
		self.get(DATE_KEY).map(ToString::to_string)
	}
}

/// A snippet whose text starts with a recognized header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSnippet {
	pub header: SnippetHeader,
	/// The normalized text after the header block, trimmed.
	pub listing: String,
}

/// Remove carriage returns, trim the text and strip trailing whitespace from
/// every line.
pub fn normalize_snippet(content: &str) -> String {
	content
		.replace('\r', "")
		.trim()
		.split('\n')
		.map(str::trim_end)
		.collect::<Vec<_>>()
		.join("\n")
		.trim()
		.to_string()
}

/// Parse the header at the very start of `content`.
///
/// Returns `None` when the text does not begin with a header of the exact
/// shape
///
/// ```text
/// /**
///  * @problem: a, b
///  * @tags: dp
///  */
/// ```
///
/// that is: a `/**` line, one or more ` * @key: value` lines with a lowercase
/// key and a non-empty value, and a line starting with ` */`. Whatever follows
/// the closing ` */` becomes the listing.
pub fn parse_header(content: &str) -> Option<ParsedSnippet> {
	let text = normalize_snippet(content);
	let mut rest = text.strip_prefix(HEADER_OPEN)?;
	let mut fields = Vec::new();

	loop {
		let line = rest.strip_prefix('\n')?;

		if let Some(after_close) = line.strip_prefix(HEADER_CLOSE) {
			if fields.is_empty() {
				return None;
			}

			return Some(ParsedSnippet {
				header: SnippetHeader { fields },
				listing: after_close.trim().to_string(),
			});
		}

		let line_end = line.find('\n').unwrap_or(line.len());
		fields.push(parse_field_line(&line[..line_end])?);
		rest = &line[line_end..];
	}
}

/// Parse a single ` * @key: value` line.
fn parse_field_line(line: &str) -> Option<(String, String)> {
	let field = line.strip_prefix(FIELD_PREFIX)?;
	let (key, value) = field.split_once(':')?;

	if key.is_empty() || !key.bytes().all(|byte| byte.is_ascii_lowercase()) {
		return None;
	}

	let value = value.strip_prefix(' ')?;
	if value.is_empty() {
		return None;
	}

	Some((key.to_string(), value.to_string()))
}

/// Split a `, ` separated header value, dropping empty items.
pub fn split_list(value: &str) -> Vec<String> {
	value
		.split(LIST_SEPARATOR)
		.filter(|item| !item.is_empty())
		.map(ToString::to_string)
		.collect()
}
