use assert_cmd::Command;
use predicates::prelude::*;

mod common;

fn wikinom() -> Command {
	Command::cargo_bin("wikinom").expect("binary builds")
}

#[test]
fn update_rewrites_only_the_target_value() {
	let (_dir, page, config) = common::setup();

	wikinom()
		.arg("update")
		.arg(&page)
		.arg("--date")
		.arg("Jan 2")
		.arg("--index")
		.arg("1")
		.arg("--set")
		.arg("title=Omega")
		.arg("--config")
		.arg(&config)
		.assert()
		.success()
		.stdout(predicate::str::contains("Updated entry 1 under `Jan 2`"));

	let updated = std::fs::read_to_string(&page).expect("read page");
	assert!(updated.contains("|title = Omega"));
	assert!(updated.contains("|user = dave"));
	// The first section is untouched.
	assert!(updated.contains("|title = Alpha"));
}

#[test]
fn update_grouped_member_by_prefix_key() {
	let (_dir, page, config) = common::setup();

	wikinom()
		.arg("update")
		.arg(&page)
		.arg("--date")
		.arg("Jan 1")
		.arg("--index")
		.arg("2")
		.arg("--set")
		.arg("title=Betamax")
		.arg("--config")
		.arg(&config)
		.assert()
		.success();

	let updated = std::fs::read_to_string(&page).expect("read page");
	assert!(updated.contains("|title1 = Betamax"));
	assert!(updated.contains("|title2 = Gamma"));
}

#[test]
fn update_dry_run_leaves_the_file_alone() {
	let (_dir, page, config) = common::setup();

	wikinom()
		.arg("update")
		.arg(&page)
		.arg("--date")
		.arg("Jan 2")
		.arg("--index")
		.arg("1")
		.arg("--set")
		.arg("title=Omega")
		.arg("--dry-run")
		.arg("--config")
		.arg(&config)
		.assert()
		.success()
		.stdout(predicate::str::contains("Dry run"))
		.stdout(predicate::str::contains("+|title = Omega"));

	let content = std::fs::read_to_string(&page).expect("read page");
	assert_eq!(content, common::PAGE);
}

#[test]
fn update_warns_about_unknown_keys() {
	let (_dir, page, config) = common::setup();

	wikinom()
		.arg("update")
		.arg(&page)
		.arg("--date")
		.arg("Jan 2")
		.arg("--index")
		.arg("1")
		.arg("--set")
		.arg("nope=x")
		.arg("--config")
		.arg(&config)
		.assert()
		.success()
		.stderr(predicate::str::contains("skipped: nope"));

	// Nothing resolved, so the page is rewritten unchanged.
	let content = std::fs::read_to_string(&page).expect("read page");
	assert_eq!(content, common::PAGE);
}

#[test]
fn update_rejects_malformed_set_pair() {
	let (_dir, page, config) = common::setup();

	wikinom()
		.arg("update")
		.arg(&page)
		.arg("--date")
		.arg("Jan 2")
		.arg("--index")
		.arg("1")
		.arg("--set")
		.arg("noequals")
		.arg("--config")
		.arg(&config)
		.assert()
		.code(2);
}
