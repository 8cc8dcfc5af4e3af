//! `wikinom_core` locates and edits award-nomination templates in raw
//! MediaWiki wikitext. It never renders anything: every structure it
//! produces carries byte spans back into the original page text, so a
//! caller can splice replacement values into the page without disturbing
//! any surrounding markup.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Raw page text
//!   → Sections (split on `=== date ===` headings)
//!   → Entry collector (anchored scan for nomination templates; grouped
//!     invocations expand into one entry per numbered group, standalone
//!     ones contribute their nested extras)
//!   → Entry lookup (date + 1-based index)
//!   → Engine (splice replacement parameter values, right to left)
//!   → Document store (write the full page back)
//! ```
//!
//! ## Key Types
//!
//! - [`ParseContext`]: the template and parameter names the scanner looks
//!   for; loadable from `wikinom.toml`.
//! - [`ParsedTemplate`] / [`Parameter`] / [`NumberedGroup`]: a parsed
//!   `{{…}}` invocation with spans for its name, keys, and values.
//! - [`Section`] / [`Entry`]: a date section and one addressable
//!   nomination within it.
//! - [`DocumentStore`]: the read/write boundary to wherever pages actually
//!   live (files, memory, a wiki API client).
//!
//! Everything is recomputed from the page text on every operation; there is
//! no cached index to invalidate, and concurrent edits are left to the
//! store's last-write-wins behavior.
//!
//! Malformed wikitext never raises an error. Unbalanced braces truncate at
//! the end of the page, unknown keys are skipped, and missing sections or
//! entries come back as `None`; the `_with_diagnostics` variants report
//! what was degraded for callers that want to surface it.

pub use config::*;
pub use engine::*;
pub use entries::*;
pub use error::*;
pub use lexer::find_template_end;
pub use lexer::memstr;
pub use lexer::split_parameters;
pub use parser::*;
pub use sections::*;
pub use span::*;
pub use store::*;

pub mod config;
mod engine;
mod entries;
mod error;
pub(crate) mod lexer;
mod parser;
mod sections;
mod span;
mod store;

#[cfg(test)]
mod __fixtures;
