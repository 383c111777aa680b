//! Add, delete and navigation against a recording backend

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::backend::{Call, MockBackend};
use common::fixtures::page_with;
use curator_core::{
    Action, Completion, CuratorConfig, Direction, Dispatcher, EditorEvent, EditorSession, Effect,
    LocalEngine, Notice,
};
use curator_domain::CompoundRecord;
use tokio::sync::mpsc::UnboundedReceiver;

fn setup(
    backend: MockBackend,
    compounds: usize,
) -> (Arc<MockBackend>, Dispatcher, UnboundedReceiver<Completion>, EditorSession) {
    let backend = Arc::new(backend);
    let (dispatcher, rx) = Dispatcher::new(backend.clone(), Arc::new(LocalEngine));
    let (session, _) = EditorSession::hydrate(page_with(compounds), &CuratorConfig::default());
    (backend, dispatcher, rx, session)
}

/// Wait for the next mutation completion, skipping renders
async fn next_mutation(rx: &mut UnboundedReceiver<Completion>) -> Completion {
    loop {
        let completion = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("completion timed out")
            .expect("channel closed");
        if matches!(completion, Completion::Mutated { .. }) {
            return completion;
        }
    }
}

#[tokio::test]
async fn test_add_without_location_notifies_once() {
    let (backend, dispatcher, mut rx, mut session) = setup(MockBackend::new(), 2);

    let effects = session.handle(EditorEvent::AddCompound);
    assert!(dispatcher.run(effects).is_empty());

    let effects = session.complete(next_mutation(&mut rx).await);
    assert_eq!(effects, vec![Effect::Notify(Notice::UnexpectedResponse)]);
    assert_eq!(backend.call_count(), 1);
    assert_eq!(session.store().len(), 2);
}

#[tokio::test]
async fn test_add_sends_unsaved_edits_and_follows_location() {
    let backend = MockBackend::new();
    backend.respond_with_location("/article/100?compound=2");
    let (backend, dispatcher, mut rx, mut session) = setup(backend, 2);

    session.handle(EditorEvent::EditName("renamed".to_string()));
    dispatcher.run(session.handle(EditorEvent::AddCompound));
    let effects = session.complete(next_mutation(&mut rx).await);
    assert_eq!(
        effects,
        vec![Effect::Navigate("/article/100?compound=2".to_string())]
    );

    match &backend.calls()[0] {
        Call::Add(request) => {
            assert_eq!(request.url, "/article/100");
            assert_eq!(request.compounds[0].name, "renamed");
            assert_eq!(request.article.journal, "J. Nat. Prod.");
        }
        other => panic!("expected add, got {:?}", other),
    }
}

#[tokio::test]
async fn test_double_delete_issues_two_requests() {
    let (backend, gate) = MockBackend::gated();
    let (backend, dispatcher, mut rx, mut session) = setup(backend, 3);

    dispatcher.run(session.handle(EditorEvent::Delete));
    dispatcher.run(session.handle(EditorEvent::Delete));

    // Both requests reach the backend before either is answered
    tokio::time::timeout(Duration::from_secs(5), async {
        while backend.call_count() < 2 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("both deletes should be in flight");
    assert!(rx.try_recv().is_err());

    gate.add_permits(2);
    for _ in 0..2 {
        match next_mutation(&mut rx).await {
            Completion::Mutated { action, .. } => assert_eq!(action, Action::Delete),
            other => panic!("unexpected completion {:?}", other),
        }
    }
    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
}

#[tokio::test]
async fn test_delete_last_record_sends_nothing() {
    let (backend, dispatcher, _rx, mut session) = setup(MockBackend::new(), 1);
    let rest = dispatcher.run(session.handle(EditorEvent::Delete));
    assert_eq!(rest, vec![Effect::Notify(Notice::LastRecord)]);

    tokio::task::yield_now().await;
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_delete_multi_selection_sends_checked_ids() {
    let backend = Arc::new(MockBackend::new());
    let (dispatcher, mut rx) = Dispatcher::new(backend.clone(), Arc::new(LocalEngine));
    let mut page = page_with(0);
    page.compounds = vec![
        CompoundRecord::new("a", "C").with_id(1),
        CompoundRecord::new("b", "N").with_id(2),
        CompoundRecord::new("c", "O"),
    ];
    let (mut session, _) = EditorSession::hydrate(page, &CuratorConfig::default());

    session.handle(EditorEvent::ToggleCheck(1));
    session.handle(EditorEvent::ToggleCheck(2));
    dispatcher.run(session.handle(EditorEvent::Delete));
    next_mutation(&mut rx).await;

    match &backend.calls()[0] {
        Call::Delete(request) => {
            assert_eq!(request.ids, vec![Some(2), None]);
            assert_eq!(request.state.compounds.len(), 3);
        }
        other => panic!("expected delete, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_persisted_waits_for_confirmation() {
    let backend = Arc::new(MockBackend::new());
    let (dispatcher, mut rx) = Dispatcher::new(backend.clone(), Arc::new(LocalEngine));
    let mut page = page_with(2);
    page.compounds[0] = CompoundRecord::new("known", "C")
        .with_id(5)
        .with_external_id(31255);
    let (mut session, _) = EditorSession::hydrate(page, &CuratorConfig::default());

    let rest = dispatcher.run(session.handle(EditorEvent::Delete));
    assert_eq!(rest, vec![Effect::Confirm { count: 1 }]);
    tokio::task::yield_now().await;
    assert_eq!(backend.call_count(), 0);

    dispatcher.run(session.handle(EditorEvent::ConfirmDelete(true)));
    next_mutation(&mut rx).await;
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn test_navigation_outcomes() {
    let (backend, dispatcher, mut rx, mut session) = setup(MockBackend::new(), 1);

    dispatcher.run(session.handle(EditorEvent::Navigate(Direction::Next)));
    assert_eq!(
        session.complete(next_mutation(&mut rx).await),
        vec![Effect::Notify(Notice::NoNextArticle)]
    );

    dispatcher.run(session.handle(EditorEvent::Navigate(Direction::Previous)));
    assert_eq!(
        session.complete(next_mutation(&mut rx).await),
        vec![Effect::Notify(Notice::NoPreviousArticle)]
    );

    backend.respond_with_location("/article/99");
    dispatcher.run(session.handle(EditorEvent::Navigate(Direction::Previous)));
    assert_eq!(
        session.complete(next_mutation(&mut rx).await),
        vec![Effect::Navigate("/article/99".to_string())]
    );

    match &backend.calls()[0] {
        Call::Navigate(Direction::Next, request) => assert_eq!(request.url, "/article/100"),
        other => panic!("expected navigate, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_backend_leaves_state_untouched() {
    let backend = MockBackend::new();
    backend.set_unreachable(true);
    let (_backend, dispatcher, mut rx, mut session) = setup(backend, 3);
    session.handle(EditorEvent::Select(2));

    dispatcher.run(session.handle(EditorEvent::Delete));
    let effects = session.complete(next_mutation(&mut rx).await);
    assert_eq!(effects, vec![Effect::Notify(Notice::ServerUnreachable)]);
    assert_eq!(session.store().len(), 3);
    assert_eq!(session.store().active(), 2);
}
