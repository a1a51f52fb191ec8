//! # Selection Session
//!
//! State machine behind the interactive picker: choose a project, choose a
//! cluster, then hand off to the access reconciler and wait for its single
//! terminal outcome event.
//!
//! The session owns all selection state. It never spawns anything itself:
//! [`Session::update`] returns an [`Effect`] telling the owning event loop
//! what to do next, which keeps the machine free of terminal and runtime
//! concerns and directly testable.

use std::sync::Arc;

use tracing::debug;

use kubehop_common::cluster::{ClusterSnapshot, TargetDescriptor};
use kubehop_common::error::ReconcileError;
use kubehop_common::sources::{Directory, IdentityResolver};

/// Keyboard intent, already decoded from raw terminal events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Confirm,
    Quit,
}

/// Everything the session reacts to.
#[derive(Debug)]
pub enum Event {
    Key(Key),
    /// Terminal outcome of the background reconciliation run; `Ok` carries
    /// the configured cluster name.
    ReconcileDone(Result<String, ReconcileError>),
}

/// Current stage of the flow. `Finished` and `Failed` are terminal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    ChoosingProject,
    ChoosingCluster,
    Configuring,
    Finished(String),
    Failed(String),
}

/// Instruction back to the owning event loop.
#[derive(Debug)]
pub enum Effect {
    None,
    /// Terminate the process immediately.
    Quit,
    /// Spawn exactly one background reconciliation run for this target.
    StartReconcile {
        target: TargetDescriptor,
        snapshot: ClusterSnapshot,
    },
}

pub struct Session {
    directory: Arc<dyn Directory>,
    identity: Arc<dyn IdentityResolver>,
    stage: Stage,
    cursor: usize,
    choices: Vec<String>,
    project_id: Option<String>,
    clusters: Vec<ClusterSnapshot>,
}

impl Session {
    /// Starts in `ChoosingProject` over an already-fetched project list.
    pub fn new(
        projects: Vec<String>,
        directory: Arc<dyn Directory>,
        identity: Arc<dyn IdentityResolver>,
    ) -> Self {
        Self {
            directory,
            identity,
            stage: Stage::ChoosingProject,
            cursor: 0,
            choices: projects,
            project_id: None,
            clusters: Vec::new(),
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.stage, Stage::Finished(_) | Stage::Failed(_))
    }

    /// Applies one event and reports what the event loop should do next.
    pub async fn update(&mut self, event: Event) -> Effect {
        match event {
            Event::Key(Key::Quit) => Effect::Quit,
            Event::Key(Key::Up) => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
                Effect::None
            }
            Event::Key(Key::Down) => {
                // Clamped at the last row, no wraparound.
                if self.cursor + 1 < self.choices.len() {
                    self.cursor += 1;
                }
                Effect::None
            }
            Event::Key(Key::Confirm) => self.confirm().await,
            Event::ReconcileDone(Ok(cluster)) => {
                self.stage = Stage::Finished(cluster);
                Effect::None
            }
            Event::ReconcileDone(Err(e)) => {
                self.stage = Stage::Failed(e.to_string());
                Effect::None
            }
        }
    }

    async fn confirm(&mut self) -> Effect {
        match self.stage {
            Stage::ChoosingProject => self.confirm_project().await,
            Stage::ChoosingCluster => self.confirm_cluster().await,
            // Busy or already terminal; Enter means nothing here.
            _ => Effect::None,
        }
    }

    async fn confirm_project(&mut self) -> Effect {
        let Some(project_id) = self.choices.get(self.cursor).cloned() else {
            return Effect::None;
        };

        debug!("Fetching clusters in {project_id}");
        match self.directory.clusters(&project_id).await {
            Ok(clusters) => {
                self.choices = clusters.iter().map(|c| c.name.clone()).collect();
                self.clusters = clusters;
                self.cursor = 0;
                self.project_id = Some(project_id);
                self.stage = Stage::ChoosingCluster;
                Effect::None
            }
            // No interactive choice is possible without a list.
            Err(e) => {
                self.stage = Stage::Failed(e.to_string());
                Effect::None
            }
        }
    }

    async fn confirm_cluster(&mut self) -> Effect {
        let Some(snapshot) = self.clusters.get(self.cursor).cloned() else {
            return Effect::None;
        };

        let operator_label = match self.identity.operator_label().await {
            Ok(label) => label,
            Err(e) => {
                self.stage = Stage::Failed(e.to_string());
                return Effect::None;
            }
        };

        let target = TargetDescriptor {
            project_id: self.project_id.clone().unwrap_or_default(),
            region: snapshot.location.clone(),
            cluster_name: snapshot.name.clone(),
            operator_label,
        };

        self.stage = Stage::Configuring;
        Effect::StartReconcile { target, snapshot }
    }
}
