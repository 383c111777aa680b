//! Article domain model

use serde::{Deserialize, Serialize};

/// The article a page curates. One per page session.
///
/// Field names on the wire follow the backend's form names (`vol`, `iss`,
/// `abstract`), so the struct can be posted verbatim.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub pmid: Option<u64>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub journal: String,
    #[serde(default)]
    pub authors: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub pages: Option<String>,
    #[serde(default, rename = "vol")]
    pub volume: Option<String>,
    #[serde(default, rename = "iss")]
    pub issue: Option<String>,
    /// Number of compounds the curator declares the article reports
    #[serde(default)]
    pub num_compounds: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub needs_work: bool,
}

/// A single edit applied to an article form field
#[derive(Clone, Debug, PartialEq)]
pub enum ArticleEdit {
    Pmid(Option<u64>),
    Doi(String),
    Title(String),
    Journal(String),
    Authors(String),
    Abstract(String),
    Year(Option<i32>),
    Pages(String),
    Volume(String),
    Issue(String),
    NumCompounds(Option<u32>),
    Notes(String),
    NeedsWork(bool),
}

impl Article {
    /// Create an article with a title and journal, everything else empty
    pub fn new(title: impl Into<String>, journal: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            journal: journal.into(),
            ..Default::default()
        }
    }

    /// Apply a form edit. Optional text fields collapse to `None` when emptied,
    /// the same way the backend filters blank inputs.
    pub fn apply(&mut self, edit: ArticleEdit) {
        match edit {
            ArticleEdit::Pmid(v) => self.pmid = v,
            ArticleEdit::Doi(v) => self.doi = non_empty(crate::normalize_doi(&v)),
            ArticleEdit::Title(v) => self.title = v,
            ArticleEdit::Journal(v) => self.journal = v,
            ArticleEdit::Authors(v) => self.authors = v,
            ArticleEdit::Abstract(v) => self.abstract_text = non_empty(v),
            ArticleEdit::Year(v) => self.year = v,
            ArticleEdit::Pages(v) => self.pages = non_empty(v),
            ArticleEdit::Volume(v) => self.volume = non_empty(v),
            ArticleEdit::Issue(v) => self.issue = non_empty(v),
            ArticleEdit::NumCompounds(v) => self.num_compounds = v,
            ArticleEdit::Notes(v) => self.notes = non_empty(v),
            ArticleEdit::NeedsWork(v) => self.needs_work = v,
        }
    }

    /// Whether the declared compound count disagrees with `actual`.
    ///
    /// An undeclared count is not a mismatch.
    pub fn compound_count_mismatch(&self, actual: usize) -> bool {
        match self.num_compounds {
            Some(declared) => declared as usize != actual,
            None => false,
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
