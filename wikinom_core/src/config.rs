use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::WikinomError;
use crate::WikinomResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["wikinom.toml", ".wikinom.toml", ".config/wikinom.toml"];

/// The template and parameter names the scanner looks for.
///
/// The production nomination pages use one standalone template per
/// nomination, a grouped variant that packs several nominations into one
/// invocation via numbered parameter keys, and a nested template for extra
/// nominations attached to an existing one. All four names are data, not
/// structure, so pages from another wiki (or test fixtures) can swap them
/// out via `wikinom.toml`:
///
/// ```toml
/// main_template = "Nom"
/// grouped_template = "NomGroup"
/// sub_template = "Nom/extra"
/// extra_param = "extras"
/// ```
///
/// The context is immutable and passed by reference through the whole
/// pipeline; nothing in this crate holds process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseContext {
	/// Name of the standalone nomination template.
	pub main_template: String,
	/// Name of the grouped variant carrying numbered parameter families.
	pub grouped_template: String,
	/// Name of the nested extra-nomination template.
	pub sub_template: String,
	/// Parameter of the standalone template whose value holds nested
	/// extra-nomination templates.
	pub extra_param: String,
}

impl Default for ParseContext {
	fn default() -> Self {
		Self {
			main_template: "ACG提名".to_string(),
			grouped_template: "ACG提名2".to_string(),
			sub_template: "ACG提名/extra".to_string(),
			extra_param: "額外提名".to_string(),
		}
	}
}

impl ParseContext {
	/// Load the context from the first config file candidate found under
	/// `root`. Returns `Ok(None)` when no candidate exists.
	pub fn load(root: &Path) -> WikinomResult<Option<ParseContext>> {
		for candidate in CONFIG_FILE_CANDIDATES {
			let path = root.join(candidate);
			if path.is_file() {
				return Self::from_file(&path).map(Some);
			}
		}

		Ok(None)
	}

	/// Load the context from `root`, falling back to the production
	/// defaults when no config file is present.
	pub fn load_or_default(root: &Path) -> WikinomResult<ParseContext> {
		Ok(Self::load(root)?.unwrap_or_default())
	}

	/// Load the context from an explicit file path.
	pub fn from_file(path: &Path) -> WikinomResult<ParseContext> {
		let content = std::fs::read_to_string(path)?;
		toml::from_str(&content).map_err(|e| WikinomError::ConfigParse(e.to_string()))
	}

	/// `{{` followed by the standalone template name.
	pub(crate) fn main_open(&self) -> String {
		format!("{{{{{}", self.main_template)
	}

	/// `{{` followed by the grouped template name.
	pub(crate) fn grouped_open(&self) -> String {
		format!("{{{{{}", self.grouped_template)
	}

	/// `{{` followed by the nested template name.
	pub(crate) fn sub_open(&self) -> String {
		format!("{{{{{}", self.sub_template)
	}

	/// Whether a parsed template name selects the grouped variant.
	pub(crate) fn is_grouped(&self, name: &str) -> bool {
		name.starts_with(&self.grouped_template)
	}
}
