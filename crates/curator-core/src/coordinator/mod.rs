//! Mutation and navigation coordinator
//!
//! Serializes the article plus every compound record and exchanges it with
//! the backend. Each action is fire-and-forget: one request per user action,
//! no retry, no de-duplication. Success with a location means the page is
//! replaced; every other result becomes exactly one [`Notice`] and leaves
//! the editor untouched.

use curator_domain::{
    Article, DeleteRequest, LocationResponse, MutationRequest, NavigateRequest,
};

use crate::backend::{Backend, Direction};
use crate::error::{StoreError, TransportError};
use crate::notice::Notice;
use crate::store::RecordStore;

/// The three backend actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Delete,
    Navigate(Direction),
}

/// A request ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Add(MutationRequest),
    Delete(DeleteRequest),
    Navigate(Direction, NavigateRequest),
}

impl Mutation {
    pub fn action(&self) -> Action {
        match self {
            Mutation::Add(_) => Action::Add,
            Mutation::Delete(_) => Action::Delete,
            Mutation::Navigate(direction, _) => Action::Navigate(*direction),
        }
    }

    /// Send to the backend
    pub async fn send(self, backend: &dyn Backend) -> Result<LocationResponse, TransportError> {
        match self {
            Mutation::Add(request) => backend.add_compound(request).await,
            Mutation::Delete(request) => backend.delete_compounds(request).await,
            Mutation::Navigate(direction, request) => backend.navigate(direction, request).await,
        }
    }
}

/// How a delete proceeds
#[derive(Debug, Clone, PartialEq)]
pub enum DeletePlan {
    /// A target is already known server-side: ask first
    Confirm(DeleteRequest),
    /// Only unsaved targets: send right away
    Immediate(DeleteRequest),
}

impl DeletePlan {
    pub fn request(&self) -> &DeleteRequest {
        match self {
            DeletePlan::Confirm(request) | DeletePlan::Immediate(request) => request,
        }
    }

    pub fn needs_confirmation(&self) -> bool {
        matches!(self, DeletePlan::Confirm(_))
    }
}

/// Result of a finished action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Replace the page with the one at this location
    Navigate(String),
    Notify(Notice),
}

/// Builds requests for the page at `path` and interprets their responses
#[derive(Debug, Clone)]
pub struct MutationCoordinator {
    path: String,
}

impl MutationCoordinator {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Full page state for the add endpoint, unsaved edits included
    pub fn add_request(&self, article: &Article, store: &RecordStore) -> Mutation {
        Mutation::Add(MutationRequest::new(
            self.path.clone(),
            article,
            &store.snapshot(),
        ))
    }

    /// Resolve the delete targets and decide whether to confirm.
    ///
    /// Targets are the checked records in multi-select mode, otherwise the
    /// active one. Fails before anything is sent if no record would remain.
    pub fn plan_delete(
        &self,
        article: &Article,
        store: &RecordStore,
    ) -> Result<DeletePlan, StoreError> {
        let targets = store.targets();
        if store.len() <= 1 || targets.len() >= store.len() {
            tracing::info!(len = store.len(), targets = targets.len(), "delete refused: last record");
            return Err(StoreError::MinimumOneRecord);
        }

        let records: Vec<_> = targets.iter().filter_map(|&i| store.get(i)).collect();
        let ids = records.iter().map(|record| record.id).collect();
        let known = records.iter().any(|record| record.is_persisted());

        let request = DeleteRequest {
            state: MutationRequest::new(self.path.clone(), article, &store.snapshot()),
            ids,
        };
        Ok(if known {
            DeletePlan::Confirm(request)
        } else {
            DeletePlan::Immediate(request)
        })
    }

    /// Only the current path is sent for navigation
    pub fn navigate_request(&self, direction: Direction) -> Mutation {
        Mutation::Navigate(
            direction,
            NavigateRequest {
                url: self.path.clone(),
            },
        )
    }

    /// Interpret a backend response for `action`
    pub fn resolve(action: Action, result: Result<LocationResponse, TransportError>) -> Outcome {
        let response = match result {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(?action, %error, "backend unreachable");
                return Outcome::Notify(Notice::ServerUnreachable);
            }
        };

        if let Some(location) = response.location() {
            tracing::info!(?action, location, "navigating");
            return Outcome::Navigate(location.to_string());
        }

        let notice = match action {
            Action::Add | Action::Delete => Notice::UnexpectedResponse,
            Action::Navigate(Direction::Next) => Notice::NoNextArticle,
            Action::Navigate(Direction::Previous) => Notice::NoPreviousArticle,
        };
        tracing::info!(?action, %notice, "response without location");
        Outcome::Notify(notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator_domain::CompoundRecord;

    fn store() -> RecordStore {
        RecordStore::new(vec![
            CompoundRecord::new("saved", "CCO").with_id(11).with_external_id(900),
            CompoundRecord::new("draft", "CCN").with_id(12),
            CompoundRecord::new("new", ""),
        ])
    }

    fn coordinator() -> MutationCoordinator {
        MutationCoordinator::new("/article/5")
    }

    #[test]
    fn test_add_request_carries_full_state() {
        let mut store = store();
        store
            .edit(2, curator_domain::CompoundEdit::Name("edited".to_string()))
            .unwrap();
        match coordinator().add_request(&Article::default(), &store) {
            Mutation::Add(request) => {
                assert_eq!(request.url, "/article/5");
                assert_eq!(request.compounds.len(), 3);
                assert_eq!(request.compounds[2].name, "edited");
            }
            other => panic!("expected add, got {:?}", other),
        }
    }

    #[test]
    fn test_delete_unsaved_is_immediate() {
        let mut store = store();
        store.set_active(2);
        let plan = coordinator().plan_delete(&Article::default(), &store).unwrap();
        assert!(!plan.needs_confirmation());
        assert_eq!(plan.request().ids, vec![None]);
    }

    #[test]
    fn test_delete_known_record_needs_confirmation() {
        let store = store();
        let plan = coordinator().plan_delete(&Article::default(), &store).unwrap();
        assert!(plan.needs_confirmation());
        assert_eq!(plan.request().ids, vec![Some(11)]);
    }

    #[test]
    fn test_delete_checked_records() {
        let mut store = store();
        store.toggle_select(1);
        store.toggle_select(2);
        let plan = coordinator().plan_delete(&Article::default(), &store).unwrap();
        assert!(!plan.needs_confirmation());
        assert_eq!(plan.request().ids, vec![Some(12), None]);
        assert_eq!(plan.request().state.compounds.len(), 3);
    }

    #[test]
    fn test_delete_every_record_refused() {
        let mut store = store();
        for i in 0..3 {
            store.toggle_select(i);
        }
        assert_eq!(
            coordinator().plan_delete(&Article::default(), &store),
            Err(StoreError::MinimumOneRecord)
        );

        let single = RecordStore::new(vec![CompoundRecord::new("only", "C")]);
        assert_eq!(
            coordinator().plan_delete(&Article::default(), &single),
            Err(StoreError::MinimumOneRecord)
        );
    }

    #[test]
    fn test_resolve_outcomes() {
        let located = Ok(LocationResponse::with_location("/article/6"));
        assert_eq!(
            MutationCoordinator::resolve(Action::Add, located),
            Outcome::Navigate("/article/6".to_string())
        );
        assert_eq!(
            MutationCoordinator::resolve(Action::Add, Ok(LocationResponse::default())),
            Outcome::Notify(Notice::UnexpectedResponse)
        );
        assert_eq!(
            MutationCoordinator::resolve(
                Action::Navigate(Direction::Next),
                Ok(LocationResponse::default())
            ),
            Outcome::Notify(Notice::NoNextArticle)
        );
        assert_eq!(
            MutationCoordinator::resolve(
                Action::Navigate(Direction::Previous),
                Ok(LocationResponse::with_location(""))
            ),
            Outcome::Notify(Notice::NoPreviousArticle)
        );
        assert_eq!(
            MutationCoordinator::resolve(Action::Delete, Err(TransportError::Timeout)),
            Outcome::Notify(Notice::ServerUnreachable)
        );
    }
}
