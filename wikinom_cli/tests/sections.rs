use assert_cmd::Command;
use predicates::prelude::*;

mod common;

fn wikinom() -> Command {
	Command::cargo_bin("wikinom").expect("binary builds")
}

#[test]
fn sections_lists_dates_with_entry_counts() {
	let (_dir, page, config) = common::setup();

	wikinom()
		.arg("sections")
		.arg(&page)
		.arg("--config")
		.arg(&config)
		.assert()
		.success()
		.stdout(predicate::str::contains("Jan 1: 3 entries"))
		.stdout(predicate::str::contains("Jan 2: 1 entries"));
}

#[test]
fn sections_on_page_without_headings() {
	let (dir, _page, config) = common::setup();
	let plain = dir.path().join("plain.wiki");
	std::fs::write(&plain, "just prose, no headings\n").expect("write page");

	wikinom()
		.arg("sections")
		.arg(&plain)
		.arg("--config")
		.arg(&config)
		.assert()
		.success()
		.stdout(predicate::str::contains("No date sections found."));
}

#[test]
fn sections_of_missing_page_exits_with_lookup_code() {
	let (dir, _page, config) = common::setup();

	wikinom()
		.arg("sections")
		.arg(dir.path().join("missing.wiki"))
		.arg("--config")
		.arg(&config)
		.assert()
		.code(1);
}

#[test]
fn list_shows_indices_and_kinds() {
	let (_dir, page, config) = common::setup();

	wikinom()
		.arg("list")
		.arg(&page)
		.arg("--date")
		.arg("Jan 1")
		.arg("--config")
		.arg(&config)
		.assert()
		.success()
		.stdout(predicate::str::contains("1. [main] Alpha"))
		.stdout(predicate::str::contains("2. [grouped] Beta"))
		.stdout(predicate::str::contains("3. [grouped] Gamma"));
}

#[test]
fn list_unknown_date_exits_with_lookup_code() {
	let (_dir, page, config) = common::setup();

	wikinom()
		.arg("list")
		.arg(&page)
		.arg("--date")
		.arg("Jan 9")
		.arg("--config")
		.arg(&config)
		.assert()
		.code(1)
		.stderr(predicate::str::contains("Jan 9"));
}
