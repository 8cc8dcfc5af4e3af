use assert_cmd::Command;
use predicates::prelude::*;

mod common;

fn wikinom() -> Command {
	Command::cargo_bin("wikinom").expect("binary builds")
}

#[test]
fn query_prints_entry_parameters() {
	let (_dir, page, config) = common::setup();

	wikinom()
		.arg("query")
		.arg(&page)
		.arg("--date")
		.arg("Jan 2")
		.arg("--index")
		.arg("1")
		.arg("--config")
		.arg(&config)
		.assert()
		.success()
		.stdout(predicate::str::contains("[main] {{Nom}} (Jan 2 #1)"))
		.stdout(predicate::str::contains("title = Delta"))
		.stdout(predicate::str::contains("user = dave"));
}

#[test]
fn query_grouped_entry_prints_member_parameters() {
	let (_dir, page, config) = common::setup();

	wikinom()
		.arg("query")
		.arg(&page)
		.arg("--date")
		.arg("Jan 1")
		.arg("--index")
		.arg("3")
		.arg("--config")
		.arg(&config)
		.assert()
		.success()
		.stdout(predicate::str::contains("[grouped] group 2"))
		.stdout(predicate::str::contains("title = Gamma"))
		.stdout(predicate::str::contains("user = carol"));
}

#[test]
fn query_json_includes_parsed_values() {
	let (_dir, page, config) = common::setup();

	wikinom()
		.arg("query")
		.arg(&page)
		.arg("--date")
		.arg("Jan 2")
		.arg("--index")
		.arg("1")
		.arg("--format")
		.arg("json")
		.arg("--config")
		.arg(&config)
		.assert()
		.success()
		.stdout(predicate::str::contains("\"Delta\""))
		.stdout(predicate::str::contains("\"value_span\""));
}

#[test]
fn query_out_of_range_index_exits_with_lookup_code() {
	let (_dir, page, config) = common::setup();

	wikinom()
		.arg("query")
		.arg(&page)
		.arg("--date")
		.arg("Jan 2")
		.arg("--index")
		.arg("5")
		.arg("--config")
		.arg(&config)
		.assert()
		.code(1);
}
