// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deployment progress events.

use tracing::{debug, info, trace};

/// Pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeployStage {
    Resolve,
    Prepare,
    Fetch,
    ResolveComposePaths,
    Deploy,
}

impl std::fmt::Display for DeployStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolve => write!(f, "resolve"),
            Self::Prepare => write!(f, "prepare"),
            Self::Fetch => write!(f, "fetch"),
            Self::ResolveComposePaths => write!(f, "resolve-compose-paths"),
            Self::Deploy => write!(f, "deploy"),
        }
    }
}

/// Progress notification emitted by the deployer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    StageStarted(DeployStage),
    /// `message` never contains credentials.
    StageFailed { stage: DeployStage, message: String },
    Completed,
}

/// Forwards events to `tracing` and an optional channel observer.
///
/// Sending never blocks: events that do not fit a full bounded channel, or
/// whose receiver is gone, are dropped.
#[derive(Debug, Clone, Default)]
pub(super) struct EventSink {
    observer: Option<flume::Sender<DeployEvent>>,
}

impl EventSink {
    pub(super) const fn new(observer: Option<flume::Sender<DeployEvent>>) -> Self {
        Self { observer }
    }

    pub(super) fn started(&self, stage: DeployStage) {
        trace!(%stage, "stage started");
        self.emit(DeployEvent::StageStarted(stage));
    }

    pub(super) fn failed(&self, stage: DeployStage, message: impl Into<String>) {
        let message = message.into();
        debug!(%stage, error = %message, "stage failed");
        self.emit(DeployEvent::StageFailed { stage, message });
    }

    pub(super) fn completed(&self) {
        info!("Compose stack deployment complete");
        self.emit(DeployEvent::Completed);
    }

    fn emit(&self, event: DeployEvent) {
        if let Some(observer) = &self.observer
            && let Err(e) = observer.try_send(event)
        {
            trace!(error = %e, "deploy event dropped");
        }
    }
}
