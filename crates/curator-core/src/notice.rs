//! User-facing notifications
//!
//! Every failed action ends in exactly one notice; the editor state is left
//! as it was before the action.

use std::fmt;

/// A message shown to the curator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Deleting would leave the article without compounds
    LastRecord,
    /// A mutation succeeded without telling us where to go
    UnexpectedResponse,
    /// Transport failure on any backend call
    ServerUnreachable,
    /// Forward navigation found nothing
    NoNextArticle,
    /// Backward navigation found nothing
    NoPreviousArticle,
    /// Bulk source replacement with an empty value
    EmptySourceOrganism,
}

impl Notice {
    /// Whether the notice blocks until acknowledged
    pub fn is_blocking(&self) -> bool {
        !matches!(self, Notice::LastRecord | Notice::EmptySourceOrganism)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Notice::LastRecord => {
                "Cannot delete every compound from an article. \
                 Please add a real compound before deleting this one."
            }
            Notice::UnexpectedResponse => "Something unexpected happened. Please reload the page.",
            Notice::ServerUnreachable => "Could not access server. Please contact the admin.",
            Notice::NoNextArticle => "No next article.",
            Notice::NoPreviousArticle => "No previous article.",
            Notice::EmptySourceOrganism => "Enter a source organism to replace with.",
        };
        f.write_str(text)
    }
}
