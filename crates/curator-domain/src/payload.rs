//! Request and response shapes exchanged with the curation backend

use serde::{Deserialize, Serialize};

use super::{Article, CompoundPayload, CompoundRecord};

/// The state a page is hydrated from
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageState {
    /// Path of the page, sent back on navigation requests
    pub path: String,
    pub article: Article,
    #[serde(default)]
    pub compounds: Vec<CompoundRecord>,
    /// Index of a just-added compound to open instead of the first one
    #[serde(default, rename = "session_compId")]
    pub session_compound: Option<usize>,
}

impl PageState {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Body of the next/previous article requests (form encoded)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigateRequest {
    pub url: String,
}

/// Body of the add compound request: the full page state
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MutationRequest {
    pub url: String,
    pub article: Article,
    pub compounds: Vec<CompoundPayload>,
}

impl MutationRequest {
    pub fn new(url: impl Into<String>, article: &Article, compounds: &[CompoundRecord]) -> Self {
        Self {
            url: url.into(),
            article: article.clone(),
            compounds: compounds.iter().map(CompoundRecord::to_payload).collect(),
        }
    }
}

/// Body of the delete compounds request: full page state plus target ids
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteRequest {
    #[serde(flatten)]
    pub state: MutationRequest,
    /// Backend row ids of the targets; unsaved targets are `null`
    #[serde(rename = "compIds")]
    pub ids: Vec<Option<i64>>,
}

/// Response of every mutation and navigation endpoint
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationResponse {
    #[serde(default)]
    pub url: Option<String>,
}

impl LocationResponse {
    pub fn with_location(location: impl Into<String>) -> Self {
        Self {
            url: Some(location.into()),
        }
    }

    /// The follow-up location, treating an empty string as absent
    pub fn location(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Body of the structure render request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureRequest {
    pub smiles: String,
}

/// Response of the structure render endpoint
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureResponse {
    /// `1` on success
    #[serde(default)]
    pub success: i32,
    /// Rendered structure as an MDL MOL block
    #[serde(default)]
    pub molblock: Option<String>,
}

impl StructureResponse {
    /// The rendered data when the backend reports success
    pub fn rendered(self) -> Option<String> {
        if self.success == 1 {
            self.molblock
        } else {
            None
        }
    }
}
