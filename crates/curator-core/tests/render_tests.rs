//! Structure rendering through the dispatcher with both engines

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::backend::{Call, MockBackend};
use common::fixtures::{load_response_fixture, page_with};
use curator_core::{
    Completion, CuratorConfig, Dispatcher, EditorEvent, EditorSession, EngineKind, LocalEngine,
    RemoteEngine, RenderError, StructureEngine,
};
use curator_domain::CompoundRecord;
use tokio::sync::mpsc::UnboundedReceiver;

/// Feed `count` completions back into the session
async fn drain(session: &mut EditorSession, rx: &mut UnboundedReceiver<Completion>, count: usize) {
    for _ in 0..count {
        let completion = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("render timed out")
            .expect("channel closed");
        session.complete(completion);
    }
}

#[tokio::test]
async fn test_malformed_notation_isolated_to_its_record() {
    let backend = Arc::new(MockBackend::new());
    let (dispatcher, mut rx) = Dispatcher::new(backend, Arc::new(LocalEngine));
    let mut page = page_with(0);
    page.compounds = vec![
        CompoundRecord::new("benzene", "C1=CC=CC=C1"),
        CompoundRecord::new("broken", "("),
        CompoundRecord::new("empty", ""),
    ];
    let (mut session, effects) = EditorSession::hydrate(page, &CuratorConfig::default());
    assert_eq!(effects.len(), 2);
    dispatcher.run(effects);
    drain(&mut session, &mut rx, 2).await;

    let view = session.view();
    assert_eq!(view.panel[0].formula, "C6H6");
    assert!(view.panel[0].render_error.is_none());
    assert!(view.panel[1].render_error.is_some());
    assert_eq!(view.panel[2].formula, " ");
    assert!(view.panel[2].render_error.is_none());
}

#[tokio::test]
async fn test_edit_renders_on_blur_and_skips_unchanged() {
    let backend = Arc::new(MockBackend::new());
    let (dispatcher, mut rx) = Dispatcher::new(backend, Arc::new(LocalEngine));
    let (mut session, effects) = EditorSession::hydrate(page_with(1), &CuratorConfig::default());
    dispatcher.run(effects);
    drain(&mut session, &mut rx, 1).await;
    assert_eq!(session.view().panel[0].formula, "C2H6O");

    session.handle(EditorEvent::EditNotation("CCO".to_string()));
    assert!(session.handle(EditorEvent::CommitNotation).is_empty());

    session.handle(EditorEvent::EditNotation("c1ccncc1".to_string()));
    dispatcher.run(session.handle(EditorEvent::CommitNotation));
    drain(&mut session, &mut rx, 1).await;
    assert_eq!(session.view().panel[0].formula, "C5H5N");
}

#[tokio::test]
async fn test_render_after_removal_is_discarded() {
    let backend = Arc::new(MockBackend::new());
    let (dispatcher, mut rx) = Dispatcher::new(backend, Arc::new(LocalEngine));
    let (mut session, effects) = EditorSession::hydrate(page_with(2), &CuratorConfig::default());
    let removed = session.store().key(1).unwrap();

    session.handle(EditorEvent::Select(1));
    session.handle(EditorEvent::RemoveTargets);
    dispatcher.run(effects);
    drain(&mut session, &mut rx, 2).await;

    assert!(session.pipeline().slot(removed).is_none());
    assert_eq!(session.view().panel.len(), 1);
    assert_eq!(session.view().panel[0].formula, "C2H6O");
}

#[tokio::test]
async fn test_remote_engine_reads_backend_molblock() {
    let backend = Arc::new(MockBackend::new());
    backend.respond_with_molblock(&load_response_fixture("ethanol.mol"));
    let engine = RemoteEngine::new(backend.clone());

    let drawing = engine.draw("CCO").await.unwrap();
    assert_eq!(drawing.formula, "C2H6O");
    assert_eq!(drawing.depiction.atoms.len(), 3);
    assert_eq!(drawing.depiction.atoms[2].symbol, "O");
    match &backend.calls()[0] {
        Call::Render(request) => assert_eq!(request.smiles, "CCO"),
        other => panic!("expected render, got {:?}", other),
    }
}

#[tokio::test]
async fn test_remote_engine_failure_is_inline_error() {
    let backend = Arc::new(MockBackend::new());
    let engine = RemoteEngine::new(backend.clone());
    assert!(matches!(engine.draw("CCO").await, Err(RenderError::Engine(_))));

    // Malformed input never reaches the server
    assert!(matches!(engine.draw("C1CC").await, Err(RenderError::Parse { .. })));
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn test_dispatcher_uses_configured_engine() {
    let backend = Arc::new(MockBackend::new());
    backend.respond_with_molblock(&load_response_fixture("ethanol.mol"));
    let mut config = CuratorConfig::default();
    config.render.engine = EngineKind::Remote;

    let (dispatcher, mut rx) = Dispatcher::from_config(backend.clone(), &config);
    let (mut session, effects) = EditorSession::hydrate(page_with(1), &config);
    dispatcher.run(effects);
    drain(&mut session, &mut rx, 1).await;

    assert_eq!(backend.call_count(), 1);
    assert_eq!(session.view().panel[0].formula, "C2H6O");
}
