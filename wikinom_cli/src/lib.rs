use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Query and edit award-nomination entries in wikitext pages.",
	long_about = "wikinom locates nomination templates in raw MediaWiki wikitext and edits \
	              their parameters in place, leaving every other byte of the page \
	              untouched.\n\nEntries are addressed by the date of their `=== date ===` \
	              section plus a 1-based position within it, counting standalone \
	              nominations, their nested extras, and grouped nominations alike.\n\nQuick \
	              start:\n  wikinom sections PAGE           List date sections\n  wikinom \
	              list PAGE --date DATE     List a section's entries\n  wikinom query PAGE \
	              --date DATE --index N\n  wikinom update PAGE --date DATE --index N --set \
	              key=value"
)]
pub struct WikinomCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to a wikinom.toml file overriding the template names to scan
	/// for. Without this flag the current directory is searched for one,
	/// falling back to the production defaults.
	#[arg(long, short, global = true)]
	pub config: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// List the date sections of a page with their entry counts.
	///
	/// Sections are the `=== date ===` headings; anything before the first
	/// heading belongs to no section and is never scanned for entries.
	Sections {
		/// The wikitext page file.
		file: PathBuf,
	},
	/// List the entries under one date section.
	///
	/// Prints each entry's 1-based index, kind (main, extra, or grouped),
	/// and leading parameter value. The index shown here is the one `query`
	/// and `update` expect.
	List {
		/// The wikitext page file.
		file: PathBuf,

		/// Date section to list, matching the heading text exactly.
		#[arg(long)]
		date: String,
	},
	/// Print one entry's parameters.
	Query {
		/// The wikitext page file.
		file: PathBuf,

		/// Date section to look in, matching the heading text exactly.
		#[arg(long)]
		date: String,

		/// 1-based entry position within the section.
		#[arg(long)]
		index: usize,

		/// Output format. Use `json` for the full parsed structure
		/// including byte spans.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Replace parameter values of one entry, in place.
	///
	/// Each `--set key=value` rewrites exactly that parameter's value span;
	/// the rest of the page is byte-for-byte untouched. Keys the entry
	/// doesn't carry are skipped with a warning. The page is re-read and
	/// re-parsed for every invocation, so indices always refer to the file
	/// as it is on disk right now.
	Update {
		/// The wikitext page file.
		file: PathBuf,

		/// Date section to look in, matching the heading text exactly.
		#[arg(long)]
		date: String,

		/// 1-based entry position within the section.
		#[arg(long)]
		index: usize,

		/// A `key=value` replacement; repeatable.
		#[arg(long = "set", value_name = "KEY=VALUE")]
		set: Vec<String>,

		/// Show a unified diff of what would change without writing the
		/// file.
		#[arg(long, default_value_t = false)]
		dry_run: bool,
	},
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable key/value listing.
	Text,
	/// The parsed entry as JSON, spans included.
	Json,
}
