//! Backend protocol
//!
//! The curation server is a black box reached through five request/response
//! exchanges. [`Backend`] is the seam: the HTTP implementation talks to the
//! real server, tests substitute a recording mock.

mod http;

pub use http::HttpBackend;

use async_trait::async_trait;
use curator_domain::{
    DeleteRequest, LocationResponse, MutationRequest, NavigateRequest, PageState,
    StructureRequest, StructureResponse,
};

use crate::error::TransportError;

/// Article navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Next => "next",
            Direction::Previous => "previous",
        }
    }
}

/// Requests the editor sends to the curation server.
///
/// Every call is independent: no retry, no de-duplication, no cancellation.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Ask for the next or previous article after the page at `request.url`
    async fn navigate(
        &self,
        direction: Direction,
        request: NavigateRequest,
    ) -> Result<LocationResponse, TransportError>;

    /// Submit the full page state to the add compound endpoint
    async fn add_compound(
        &self,
        request: MutationRequest,
    ) -> Result<LocationResponse, TransportError>;

    /// Submit the full page state plus target ids to the delete endpoint
    async fn delete_compounds(
        &self,
        request: DeleteRequest,
    ) -> Result<LocationResponse, TransportError>;

    /// Convert a notation string into rendered structure data
    async fn render_structure(
        &self,
        request: StructureRequest,
    ) -> Result<StructureResponse, TransportError>;

    /// Fetch the page state served at `location`
    async fn load_page(&self, location: &str) -> Result<PageState, TransportError>;
}
