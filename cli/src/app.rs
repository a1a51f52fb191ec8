//! Foreground event loop.
//!
//! Owns the session, the picker rendering and the terminal; everything else
//! reaches it through channels. The single background reconciliation task is
//! spawned here and reports back with exactly one message.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use kubehop_common::error::ReconcileError;
use kubehop_core::reconcile::Reconciler;
use kubehop_core::session::{Effect, Event, Session, Stage};

use crate::terminal::{input, picker::Picker, spinner};

/// How the interactive run ended.
#[derive(Debug)]
pub enum Outcome {
    Finished(String),
    Failed(String),
    /// Operator quit before reaching a terminal stage.
    Aborted,
}

pub async fn run(mut session: Session, reconciler: Arc<Reconciler>) -> anyhow::Result<Outcome> {
    let _raw = input::RawModeGuard::enable()?;
    let mut keys = input::spawn_key_thread();

    // Single-slot channel: one reconciliation run, one terminal message.
    let (done_tx, mut done_rx) = mpsc::channel::<Result<String, ReconcileError>>(1);

    let mut picker = Picker::new();

    let outcome = loop {
        match session.stage() {
            Stage::ChoosingProject => {
                picker.draw("Choose a GCP project", session.choices(), session.cursor())?;
            }
            Stage::ChoosingCluster => {
                picker.draw("Choose a GKE cluster", session.choices(), session.cursor())?;
            }
            // The spinner started when reconciliation was launched.
            Stage::Configuring => {}
            Stage::Finished(cluster) => break Outcome::Finished(cluster.clone()),
            Stage::Failed(message) => break Outcome::Failed(message.clone()),
        }

        let event = tokio::select! {
            Some(key) = keys.recv() => Event::Key(key),
            Some(result) = done_rx.recv() => Event::ReconcileDone(result),
            // Input thread gone (terminal closed) with nothing in flight.
            else => break Outcome::Aborted,
        };

        match session.update(event).await {
            Effect::None => {}
            Effect::Quit => break Outcome::Aborted,
            Effect::StartReconcile { target, snapshot } => {
                picker.clear()?;
                spinner::start(format!(
                    "Configuring access to {}...",
                    target.cluster_name
                ));

                debug!("Launching reconciliation for {}", target.resource_name());
                let reconciler = Arc::clone(&reconciler);
                let done = done_tx.clone();
                tokio::spawn(async move {
                    let result = reconciler
                        .reconcile(&target, &snapshot)
                        .await
                        .map(|()| target.cluster_name);
                    let _ = done.send(result).await;
                });
            }
        }
    };

    spinner::stop();
    picker.clear()?;
    Ok(outcome)
}
