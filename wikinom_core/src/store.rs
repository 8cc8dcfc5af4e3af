use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::WikinomError;
use crate::WikinomResult;

/// The boundary to the external content store.
///
/// The core never talks to a wiki itself; it only needs a way to read a
/// page's full text and to write a full replacement back. Anything beyond
/// that (authentication, retries, edit conflicts) belongs to the
/// implementation behind this trait.
pub trait DocumentStore {
	/// Fetch the full raw text of a page.
	fn fetch(&self, name: &str) -> WikinomResult<String>;

	/// Replace a page's text. Last write wins; there is no conflict
	/// detection at this layer.
	fn submit(&mut self, name: &str, text: &str) -> WikinomResult<()>;
}

/// A store backed by files in a directory; the page name is the file name.
#[derive(Debug, Clone)]
pub struct FileStore {
	root: PathBuf,
}

impl FileStore {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}
}

impl DocumentStore for FileStore {
	fn fetch(&self, name: &str) -> WikinomResult<String> {
		let path = self.root.join(name);
		std::fs::read_to_string(&path).map_err(|error| {
			if error.kind() == std::io::ErrorKind::NotFound {
				WikinomError::PageNotFound {
					name: name.to_string(),
				}
			} else {
				error.into()
			}
		})
	}

	fn submit(&mut self, name: &str, text: &str) -> WikinomResult<()> {
		std::fs::write(self.root.join(name), text)?;
		Ok(())
	}
}

/// An in-memory store, mostly for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
	pages: BTreeMap<String, String>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
		self.pages.insert(name.into(), text.into());
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.pages.get(name).map(String::as_str)
	}
}

impl DocumentStore for MemoryStore {
	fn fetch(&self, name: &str) -> WikinomResult<String> {
		self.pages
			.get(name)
			.cloned()
			.ok_or_else(|| WikinomError::PageNotFound {
				name: name.to_string(),
			})
	}

	fn submit(&mut self, name: &str, text: &str) -> WikinomResult<()> {
		self.insert(name, text);
		Ok(())
	}
}
