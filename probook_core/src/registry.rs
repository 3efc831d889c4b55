use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::ProbookError;
use crate::ProbookResult;
use crate::header::SnippetHeader;

/// A parsed snippet filed in the [`SnippetRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnippetEntry {
	/// Identifiers this snippet answers, in declaration order.
	pub identifiers: Vec<String>,
	pub tags: Vec<String>,
	/// Opaque date string from `@date`.
	pub date: Option<String>,
	/// Contents of the companion explanation file, or the pending
	/// placeholder.
	pub explanation: String,
	/// Whether a companion explanation file was found.
	pub has_explanation: bool,
	/// The snippet body with the header removed.
	pub listing: String,
	/// Fence label for the listing.
	pub language: String,
	/// The snippet file this entry was read from.
	pub file: PathBuf,
	/// Every header field, including keys probook does not interpret.
	pub metadata: SnippetHeader,
}

/// What happens when a second snippet declares an identifier that is already
/// registered.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
	/// The later snippet replaces the earlier one for that identifier.
	#[default]
	Overwrite,
	/// Registration fails with [`ProbookError::DuplicateIdentifier`].
	Error,
}

/// Identifier to snippet mapping built by the tree scanner.
///
/// Entries are stored once and indexed by every identifier they declare, so
/// lookups under any of them yield the same entry.
#[derive(Debug, Default)]
pub struct SnippetRegistry {
	entries: Vec<SnippetEntry>,
	index: HashMap<String, usize>,
	policy: DuplicatePolicy,
}

impl SnippetRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_policy(policy: DuplicatePolicy) -> Self {
		Self {
			policy,
			..Self::default()
		}
	}

	pub fn policy(&self) -> DuplicatePolicy {
		self.policy
	}

	/// File `entry` under each of its identifiers.
	pub fn register(&mut self, entry: SnippetEntry) -> ProbookResult<()> {
		let position = self.entries.len();

		for identifier in &entry.identifiers {
			let Some(&existing) = self.index.get(identifier) else {
				continue;
			};
			let first_file = self.entries[existing].file.display().to_string();

			match self.policy {
				DuplicatePolicy::Overwrite => {
					tracing::warn!(
						identifier = identifier.as_str(),
						first_file = first_file.as_str(),
						second_file = %entry.file.display(),
						"identifier declared twice, keeping the later snippet"
					);
				}
				DuplicatePolicy::Error => {
					return Err(ProbookError::DuplicateIdentifier {
						identifier: identifier.clone(),
						first_file,
						second_file: entry.file.display().to_string(),
					});
				}
			}
		}

		for identifier in &entry.identifiers {
			self.index.insert(identifier.clone(), position);
		}
		self.entries.push(entry);

		Ok(())
	}

	pub fn exists(&self, identifier: &str) -> bool {
		self.index.contains_key(identifier)
	}

	pub fn get(&self, identifier: &str) -> Option<&SnippetEntry> {
		self.index
			.get(identifier)
			.map(|&position| &self.entries[position])
	}

	/// Number of registered identifiers.
	pub fn len(&self) -> usize {
		self.index.len()
	}

	pub fn is_empty(&self) -> bool {
		self.index.is_empty()
	}

	/// All registered identifiers, sorted.
	pub fn identifiers(&self) -> Vec<&str> {
		let mut identifiers: Vec<&str> = self.index.keys().map(String::as_str).collect();
		identifiers.sort_unstable();
		identifiers
	}

	/// Entries still reachable under at least one identifier, in registration
	/// order.
	pub fn entries(&self) -> impl Iterator<Item = &SnippetEntry> {
		self.entries
			.iter()
			.enumerate()
			.filter(|(position, _)| self.index.values().any(|indexed| indexed == position))
			.map(|(_, entry)| entry)
	}
}
