//! Validation for articles
//!
//! Mirrors the checks the backend's article form applies. Issues are advisory
//! on the client: the backend remains the authority on what it accepts.

use super::Article;
use serde::{Deserialize, Serialize};

/// Severity of a validation issue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

/// A validation error or warning
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
    pub severity: ValidationSeverity,
}

impl ValidationIssue {
    fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
            severity: ValidationSeverity::Error,
        }
    }

    fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
            severity: ValidationSeverity::Warning,
        }
    }
}

const MAX_JOURNAL: usize = 255;
const MAX_VOLUME_ISSUE: usize = 10;
const MAX_PAGES: usize = 20;

/// Validate an article against the number of compounds currently on the page
pub fn validate_article(article: &Article, compound_count: usize) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if article.title.trim().is_empty() {
        issues.push(ValidationIssue::error("title", "Title is required"));
    }
    if article.authors.trim().is_empty() {
        issues.push(ValidationIssue::error("authors", "Authors are required"));
    }
    if article.journal.trim().is_empty() {
        issues.push(ValidationIssue::error("journal", "Journal is required"));
    } else if article.journal.chars().count() > MAX_JOURNAL {
        issues.push(ValidationIssue::error(
            "journal",
            format!("Journal must be at most {} characters", MAX_JOURNAL),
        ));
    }

    match article.year {
        None => issues.push(ValidationIssue::error("year", "Year is required")),
        Some(year) if !(1800 < year && year < 3000) => {
            issues.push(ValidationIssue::error("year", format!("{}: Format incorrect", year)))
        }
        Some(_) => {}
    }

    if let Some(doi) = &article.doi {
        if !crate::is_valid_doi(&crate::normalize_doi(doi)) {
            issues.push(ValidationIssue::error("doi", format!("{}: Format incorrect", doi)));
        }
    }

    for (field, value, max) in [
        ("volume", &article.volume, MAX_VOLUME_ISSUE),
        ("issue", &article.issue, MAX_VOLUME_ISSUE),
        ("pages", &article.pages, MAX_PAGES),
    ] {
        if let Some(value) = value {
            if value.chars().count() > max {
                issues.push(ValidationIssue::error(
                    field,
                    format!("{} must be at most {} characters", field, max),
                ));
            }
        }
    }

    match article.num_compounds {
        None | Some(0) => issues.push(ValidationIssue::error(
            "num_compounds",
            "Number of Compounds field is required",
        )),
        Some(declared) if declared as usize != compound_count => {
            issues.push(ValidationIssue::warning(
                "num_compounds",
                format!(
                    "Number of Compounds field ({}) does not match the {} compounds entered",
                    declared, compound_count
                ),
            ))
        }
        Some(_) => {}
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_article() -> Article {
        Article {
            title: "Cytotoxic macrolides from a marine sponge".to_string(),
            journal: "J. Nat. Prod.".to_string(),
            authors: "Smith J, Doe A".to_string(),
            year: Some(2015),
            num_compounds: Some(2),
            doi: Some("10.1021/np500123".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_article_is_clean() {
        assert!(validate_article(&complete_article(), 2).is_empty());
    }

    #[test]
    fn test_year_bounds() {
        let mut article = complete_article();
        article.year = Some(1800);
        let issues = validate_article(&article, 2);
        assert!(issues.iter().any(|i| i.field == "year"));
    }

    #[test]
    fn test_count_mismatch_is_warning() {
        let issues = validate_article(&complete_article(), 3);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "num_compounds");
        assert_eq!(issues[0].severity, ValidationSeverity::Warning);
    }

    #[test]
    fn test_long_volume_rejected() {
        let mut article = complete_article();
        article.volume = Some("12345678901".to_string());
        let issues = validate_article(&article, 2);
        assert!(issues.iter().any(|i| i.field == "volume"));
    }

    #[test]
    fn test_bad_doi() {
        let mut article = complete_article();
        article.doi = Some("11.1/x".to_string());
        let issues = validate_article(&article, 2);
        assert!(issues.iter().any(|i| i.field == "doi"));
    }
}
