use std::path::PathBuf;

use tempfile::TempDir;

/// A small nomination page: one standalone nomination plus a grouped
/// invocation under the first date, one standalone under the second.
pub const PAGE: &str = "=== Jan 1 ===\n\
                        {{Nom\n\
                        |title = Alpha\n\
                        |user = alice}}\n\
                        {{NomGroup\n\
                        |title1 = Beta\n\
                        |user1 = bob\n\
                        |title2 = Gamma\n\
                        |user2 = carol}}\n\
                        \n\
                        === Jan 2 ===\n\
                        {{Nom\n\
                        |title = Delta\n\
                        |user = dave}}\n";

pub const CONFIG: &str = "main_template = \"Nom\"\n\
                          grouped_template = \"NomGroup\"\n\
                          sub_template = \"Nom/extra\"\n\
                          extra_param = \"extras\"\n";

/// Write the fixture page and config into a fresh temp dir. Returns the dir
/// guard (keep it alive), the page path, and the config path.
pub fn setup() -> (TempDir, PathBuf, PathBuf) {
	let dir = tempfile::tempdir().expect("create temp dir");

	let page = dir.path().join("nominations.wiki");
	std::fs::write(&page, PAGE).expect("write fixture page");

	let config = dir.path().join("wikinom.toml");
	std::fs::write(&config, CONFIG).expect("write fixture config");

	(dir, page, config)
}
