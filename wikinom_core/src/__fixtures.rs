use crate::ParseContext;

/// Markers used by most tests. Same prefix structure as the production
/// defaults: the standalone name prefixes both the grouped and the nested
/// variant, which is the shape the classifier has to disambiguate.
pub fn test_context() -> ParseContext {
	ParseContext {
		main_template: "Nom".to_string(),
		grouped_template: "NomGroup".to_string(),
		sub_template: "Nom/extra".to_string(),
		extra_param: "extras".to_string(),
	}
}

/// A two-date nomination page exercising every entry shape: a standalone
/// nomination with a nested extra, a grouped invocation with two numbered
/// groups, and a marker mentioned mid-sentence that must not become an
/// entry.
pub fn nomination_page() -> &'static str {
	"== Awards ==\n\
	 Introductory prose.\n\
	 \n\
	 === Jan 1 ===\n\
	 {{Nom\n\
	 |title = Alpha\n\
	 |user = alice\n\
	 |reason = uses {{tl|foo}} inline\n\
	 |extras =\n\
	 {{Nom/extra\n\
	 |title = Beta\n\
	 |user = bob}}\n\
	 }}\n\
	 {{NomGroup\n\
	 |title1 = Gamma\n\
	 |user1 = carol\n\
	 |title2 = Delta\n\
	 |user2 = dave}}\n\
	 Mentions {{Nom}} mid-sentence.\n\
	 \n\
	 === Jan 2 ===\n\
	 {{Nom\n\
	 |title = Epsilon\n\
	 |user = eve}}\n"
}

/// A page in the production template vocabulary, exercising multi-byte
/// parameter keys and the default [`ParseContext`].
pub fn acg_page() -> &'static str {
	"=== 8月12日 ===\n\
	 {{ACG提名\n\
	 |條目名稱 = 條目甲\n\
	 |提名人 = Alice\n\
	 |額外提名 =\n\
	 {{ACG提名/extra\n\
	 |條目名稱 = 條目乙\n\
	 |提名人 = Bob}}\n\
	 }}\n\
	 {{ACG提名2\n\
	 |條目名稱1 = 條目丙\n\
	 |用戶名稱1 = Carol\n\
	 |條目名稱2 = 條目丁\n\
	 |用戶名稱2 = Dave}}\n"
}
