use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use wikinom_cli::Commands;
use wikinom_cli::OutputFormat;
use wikinom_cli::WikinomCli;
use wikinom_core::DocumentStore;
use wikinom_core::Entry;
use wikinom_core::EntrySource;
use wikinom_core::FileStore;
use wikinom_core::ParseContext;
use wikinom_core::WikinomError;
use wikinom_core::WikinomResult;
use wikinom_core::apply_changes;
use wikinom_core::collect_entries;
use wikinom_core::date_sections;
use wikinom_core::update_entry_parameters;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let mut args = WikinomCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let command = args.command.take();
	let result = match command {
		Some(Commands::Sections { file }) => run_sections(&args, &file),
		Some(Commands::List { file, date }) => run_list(&args, &file, &date),
		Some(Commands::Query {
			file,
			date,
			index,
			format,
		}) => run_query(&args, &file, &date, index, format),
		Some(Commands::Update {
			file,
			date,
			index,
			set,
			dry_run,
		}) => run_update(&args, &file, &date, index, &set, dry_run),
		None => {
			eprintln!("No subcommand specified. Run `wikinom --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Render through miette for rich diagnostics with help text and
		// error codes; lookup misses get their own exit code so scripts can
		// tell "not there" from "broke".
		match e.downcast::<WikinomError>() {
			Ok(err) => {
				let exit_code = if matches!(
					&*err,
					WikinomError::PageNotFound { .. }
						| WikinomError::SectionNotFound { .. }
						| WikinomError::EntryNotFound { .. }
				) {
					1
				} else {
					2
				};
				let report: miette::Report = (*err).into();
				eprintln!("{report:?}");
				process::exit(exit_code);
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
				process::exit(2);
			}
		}
	}
}

/// Resolve the parse context from `--config`, a discovered `wikinom.toml`,
/// or the production defaults.
fn load_context(args: &WikinomCli) -> Result<ParseContext, Box<dyn std::error::Error>> {
	match &args.config {
		Some(path) => Ok(ParseContext::from_file(path)?),
		None => {
			let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
			Ok(ParseContext::load_or_default(&cwd)?)
		}
	}
}

/// A file-backed store rooted at the page file's directory, plus the page
/// name within it.
fn store_for(file: &Path) -> (FileStore, String) {
	let root = match file.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
		_ => PathBuf::from("."),
	};
	let name = file
		.file_name()
		.map_or_else(String::new, |name| name.to_string_lossy().into_owned());

	(FileStore::new(root), name)
}

fn locate_entry(
	ctx: &ParseContext,
	document: &str,
	date: &str,
	index: usize,
) -> WikinomResult<Entry> {
	let Some(section) = date_sections(document)
		.into_iter()
		.find(|section| section.date == date)
	else {
		return Err(WikinomError::SectionNotFound {
			date: date.to_string(),
		});
	};

	let mut entries = collect_entries(ctx, document, &section);
	if index == 0 || index > entries.len() {
		return Err(WikinomError::EntryNotFound {
			date: date.to_string(),
			index,
		});
	}

	Ok(entries.swap_remove(index - 1))
}

fn run_sections(args: &WikinomCli, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
	let ctx = load_context(args)?;
	let (store, page) = store_for(file);
	let document = store.fetch(&page)?;

	let sections = date_sections(&document);
	if sections.is_empty() {
		println!("No date sections found.");
		return Ok(());
	}

	for section in &sections {
		let count = collect_entries(&ctx, &document, section).len();
		println!("{}: {count} entries", section.date);
	}

	if args.verbose {
		println!();
		println!("{} section(s) in {}", sections.len(), file.display());
	}

	Ok(())
}

fn run_list(
	args: &WikinomCli,
	file: &Path,
	date: &str,
) -> Result<(), Box<dyn std::error::Error>> {
	let ctx = load_context(args)?;
	let (store, page) = store_for(file);
	let document = store.fetch(&page)?;

	let Some(section) = date_sections(&document)
		.into_iter()
		.find(|section| section.date == date)
	else {
		return Err(WikinomError::SectionNotFound {
			date: date.to_string(),
		}
		.into());
	};

	let entries = collect_entries(&ctx, &document, &section);
	if entries.is_empty() {
		println!("No entries under `{date}`.");
		return Ok(());
	}

	for (position, entry) in entries.iter().enumerate() {
		println!(
			"{:>3}. [{}] {}",
			position + 1,
			entry.kind(),
			entry_label(entry)
		);
	}

	Ok(())
}

/// A one-line label for an entry listing: the leading parameter value, which
/// on nomination templates is the nominated title.
fn entry_label(entry: &Entry) -> String {
	match &entry.source {
		EntrySource::Main(template) | EntrySource::Extra(template) => template
			.params
			.first()
			.map_or_else(|| template.name.clone(), |param| param.value.clone()),
		EntrySource::Grouped(group) => group
			.members
			.values()
			.next()
			.map_or_else(String::new, |param| param.value.clone()),
	}
}

fn run_query(
	args: &WikinomCli,
	file: &Path,
	date: &str,
	index: usize,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let ctx = load_context(args)?;
	let (store, page) = store_for(file);
	let document = store.fetch(&page)?;
	let entry = locate_entry(&ctx, &document, date, index)?;

	match format {
		OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
		OutputFormat::Text => print_entry(&entry, date, index),
	}

	Ok(())
}

fn print_entry(entry: &Entry, date: &str, index: usize) {
	match &entry.source {
		EntrySource::Main(template) | EntrySource::Extra(template) => {
			println!("[{}] {{{{{}}}}} ({date} #{index})", entry.kind(), template.name);
			for param in &template.params {
				println!("  {} = {}", param.key, param.value);
			}
		}
		EntrySource::Grouped(group) => {
			println!("[grouped] group {} ({date} #{index})", group.number);
			for (key, param) in &group.members {
				println!("  {key} = {}", param.value);
			}
		}
	}
}

fn run_update(
	args: &WikinomCli,
	file: &Path,
	date: &str,
	index: usize,
	set: &[String],
	dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let ctx = load_context(args)?;
	let (mut store, page) = store_for(file);
	let changes = parse_changes(set)?;

	let document = store.fetch(&page)?;
	let entry = locate_entry(&ctx, &document, date, index)?;

	let skipped: Vec<&str> = changes
		.keys()
		.filter(|key| entry.get(key).is_none())
		.map(String::as_str)
		.collect();
	if !skipped.is_empty() {
		eprintln!(
			"{} key(s) not on this entry, skipped: {}",
			colored!("warning:", yellow),
			skipped.join(", ")
		);
	}

	if dry_run {
		let patched = apply_changes(&document, &entry, &changes);
		if patched == document {
			println!("No changes.");
		} else {
			println!("Dry run: entry {index} under `{date}` in {}:", file.display());
			print_diff(&document, &patched);
		}
		return Ok(());
	}

	// The full fetch-locate-patch-submit cycle runs against the file as it
	// is now, not the snapshot used for the warning above.
	update_entry_parameters(&ctx, &mut store, &page, date, index, &changes)?;
	println!("Updated entry {index} under `{date}` in {}.", file.display());

	Ok(())
}

fn parse_changes(pairs: &[String]) -> WikinomResult<BTreeMap<String, String>> {
	let mut changes = BTreeMap::new();

	for pair in pairs {
		let Some((key, value)) = pair.split_once('=') else {
			return Err(WikinomError::InvalidChange(pair.clone()));
		};
		changes.insert(key.trim().to_string(), value.to_string());
	}

	Ok(changes)
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				print!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				print!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				print!("   {change}");
			}
		}
	}
}
