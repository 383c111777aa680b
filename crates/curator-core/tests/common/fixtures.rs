//! Test fixture loading utilities

use std::path::PathBuf;

use curator_domain::{Article, CompoundRecord, PageState};

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Load a fixture file as a string
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Load a page state fixture
pub fn load_page_fixture(name: &str) -> PageState {
    let json = load_fixture(&format!("pages/{}", name));
    PageState::from_json(&json).unwrap_or_else(|e| panic!("Bad page fixture {}: {}", name, e))
}

/// Load a mock backend response fixture
pub fn load_response_fixture(name: &str) -> String {
    load_fixture(&format!("responses/{}", name))
}

/// A page with `n` unsaved compounds named `c0..`
pub fn page_with(n: usize) -> PageState {
    PageState {
        path: "/article/100".to_string(),
        article: Article::new("Antimicrobial metabolites", "J. Nat. Prod."),
        compounds: (0..n)
            .map(|i| CompoundRecord::new(format!("c{}", i), "CCO"))
            .collect(),
        session_compound: None,
    }
}
