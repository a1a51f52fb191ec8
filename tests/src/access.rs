//! End-to-end flow: drive the selection session exactly as the event loop
//! does, spawn the reconciliation it requests, and feed its single terminal
//! outcome back in.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use tokio::sync::mpsc;

use kubehop_common::cluster::{AllowList, ClusterSnapshot};
use kubehop_common::config::PollConfig;
use kubehop_core::reconcile::Reconciler;
use kubehop_core::session::{Effect, Event, Key, Session, Stage};

use crate::mocks::{MockAddress, MockAdmin, MockDirectory, MockIdentity, MockToolchain};

fn cluster_a(allow_list_enabled: bool) -> ClusterSnapshot {
    ClusterSnapshot {
        name: "cluster-a".into(),
        location: "europe-west1".into(),
        allow_list_enabled,
        allow_gcp_public_cidrs: false,
        current_allow_list: AllowList::new(),
    }
}

fn session_over(cluster: ClusterSnapshot) -> Session {
    Session::new(
        vec!["proj-1".into()],
        Arc::new(MockDirectory {
            projects: vec!["proj-1".into()],
            clusters: vec![cluster],
        }),
        Arc::new(MockIdentity("jane-doe")),
    )
}

/// Walks the session to `Configuring`, runs the requested reconciliation on
/// a background task, and delivers its outcome event — the same wiring the
/// CLI event loop uses.
async fn drive_to_terminal(session: &mut Session, reconciler: Arc<Reconciler>) {
    session.update(Event::Key(Key::Confirm)).await;
    assert_eq!(*session.stage(), Stage::ChoosingCluster);
    assert_eq!(session.choices(), ["cluster-a"]);

    let effect = session.update(Event::Key(Key::Confirm)).await;
    assert_eq!(*session.stage(), Stage::Configuring);

    let (target, snapshot) = match effect {
        Effect::StartReconcile { target, snapshot } => (target, snapshot),
        other => panic!("expected StartReconcile, got {other:?}"),
    };
    assert_eq!(target.operator_label, "jane-doe");

    let (done_tx, mut done_rx) = mpsc::channel(1);
    tokio::spawn(async move {
        let result = reconciler
            .reconcile(&target, &snapshot)
            .await
            .map(|()| target.cluster_name);
        let _ = done_tx.send(result).await;
    });

    let outcome = done_rx.recv().await.expect("reconciliation must report");
    session.update(Event::ReconcileDone(outcome)).await;
    assert!(session.is_terminal());
}

#[tokio::test(start_paused = true)]
async fn full_flow_with_allow_list_enabled() {
    let mut session = session_over(cluster_a(true));
    let admin = Arc::new(MockAdmin::completing_after(1));
    let toolchain = Arc::new(MockToolchain::default());
    let reconciler = Arc::new(Reconciler::new(
        Arc::new(MockAddress("203.0.113.5")),
        admin.clone(),
        toolchain.clone(),
        PollConfig::default(),
    ));

    drive_to_terminal(&mut session, reconciler).await;

    assert_eq!(*session.stage(), Stage::Finished("cluster-a".into()));

    let (desired, gcp_flag) = admin.submitted.lock().unwrap().clone().unwrap();
    assert_eq!(desired.len(), 1);
    assert_eq!(desired[0].label, "jane-doe");
    assert_eq!(desired[0].cidr, "203.0.113.5/32");
    assert!(!gcp_flag);

    // One pending poll, then done.
    assert_eq!(admin.polls.load(Ordering::SeqCst), 2);
    assert_eq!(toolchain.credentials.load(Ordering::SeqCst), 1);
    assert_eq!(toolchain.verifications.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn full_flow_with_allow_list_disabled_skips_submission() {
    let mut session = session_over(cluster_a(false));
    let admin = Arc::new(MockAdmin::completing_after(0));
    let toolchain = Arc::new(MockToolchain::default());
    let reconciler = Arc::new(Reconciler::new(
        Arc::new(MockAddress("203.0.113.5")),
        admin.clone(),
        toolchain.clone(),
        PollConfig::default(),
    ));

    drive_to_terminal(&mut session, reconciler).await;

    assert_eq!(*session.stage(), Stage::Finished("cluster-a".into()));
    assert!(admin.submitted.lock().unwrap().is_none());
    assert_eq!(admin.polls.load(Ordering::SeqCst), 0);
    assert_eq!(toolchain.credentials.load(Ordering::SeqCst), 1);
    assert_eq!(toolchain.verifications.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn failed_operation_surfaces_as_failed_stage() {
    let mut session = session_over(cluster_a(true));
    let admin = Arc::new(MockAdmin::failing_with("control plane rejected the update"));
    let toolchain = Arc::new(MockToolchain::default());
    let reconciler = Arc::new(Reconciler::new(
        Arc::new(MockAddress("203.0.113.5")),
        admin,
        toolchain.clone(),
        PollConfig::default(),
    ));

    drive_to_terminal(&mut session, reconciler).await;

    match session.stage() {
        Stage::Failed(message) => {
            assert!(message.contains("control plane rejected the update"));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    // The failure aborts before any local configuration happens.
    assert_eq!(toolchain.credentials.load(Ordering::SeqCst), 0);
}
