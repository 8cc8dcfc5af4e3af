use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum WikinomError {
	#[error(transparent)]
	#[diagnostic(code(wikinom::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(wikinom::config_parse),
		help("check that wikinom.toml is valid TOML; all keys are optional strings")
	)]
	ConfigParse(String),

	#[error("page not found: `{name}`")]
	#[diagnostic(
		code(wikinom::page_not_found),
		help("the document store has no page with this name")
	)]
	PageNotFound { name: String },

	#[error("no section titled `{date}`")]
	#[diagnostic(
		code(wikinom::section_not_found),
		help("section titles must match a `=== date ===` heading exactly")
	)]
	SectionNotFound { date: String },

	#[error("no entry {index} under `{date}`")]
	#[diagnostic(
		code(wikinom::entry_not_found),
		help("entry indices are 1-based and count main, extra, and grouped nominations in page order")
	)]
	EntryNotFound { date: String, index: usize },

	#[error("invalid change `{0}`: expected key=value")]
	#[diagnostic(code(wikinom::invalid_change))]
	InvalidChange(String),
}

pub type WikinomResult<T> = Result<T, WikinomError>;
