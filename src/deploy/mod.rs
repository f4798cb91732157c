// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deployment orchestration.
//!
//! ```text
//! DeploymentRequest
//!       |
//!       v
//!   Resolve ------------ resolve_repository_name --> InvalidRepositoryAddress
//!       |
//!   Prepare ------------ DirectoryManager::prepare --> DirectoryPreparation(io)
//!       |                        |                      DeploymentFailure
//!       |                   BackupGuard (held until return)
//!   Fetch -------------- VcsClient::clone_repository --> DeploymentFailure
//!       |
//!   ResolveComposePaths - <dest>/<name>/<file>...
//!       |
//!   Deploy ------------- ComposeEngine::deploy --> DeploymentFailure
//!       |
//!   Completed
//! ```
//!
//! Fetch and deploy errors are logged with their full chain and collapsed into
//! [`DeployError::DeploymentFailure`]. The destination is not locked; callers
//! must not run two deployments against the same destination concurrently.

pub mod events;


use bon::Builder;
use std::path::{Component, Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::auth::{Credential, REDACTED};
use crate::compose::{ComposeDeployOptions, ComposeEngine};
use crate::error::{DeployError, DeployResult};
use crate::fs::destination::DirectoryManager;
use crate::fs::{FileSystem, LocalFs};
use crate::git::{CloneOptions, VcsClient};
use crate::repo::resolve_repository_name;

use events::EventSink;
pub use events::{DeployEvent, DeployStage};

/// Everything needed for one deployment.
///
/// The password is only read to derive a [`Credential`]; `Debug` redacts it.
#[derive(Clone, Builder)]
pub struct DeploymentRequest {
    /// Remote repository address (must contain `/`).
    #[builder(into)]
    repository: String,
    #[builder(into, default)]
    username: String,
    #[builder(into, default)]
    password: String,
    /// Root directory; the repository is cloned to `<destination>/<name>`.
    #[builder(into)]
    destination: PathBuf,
    /// Compose files relative to the repository root, in override order.
    #[builder(default)]
    compose_files: Vec<PathBuf>,
    #[builder(into)]
    project_name: Option<String>,
}

impl DeploymentRequest {
    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    #[must_use]
    pub fn compose_files(&self) -> &[PathBuf] {
        &self.compose_files
    }

    #[must_use]
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    /// Credential derived from the username/password pair.
    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        Credential::derive(&self.username, &self.password)
    }
}

impl std::fmt::Debug for DeploymentRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeploymentRequest")
            .field("repository", &self.repository)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("destination", &self.destination)
            .field("compose_files", &self.compose_files)
            .field("project_name", &self.project_name)
            .finish()
    }
}

/// Join each compose file onto `clone_target`, keeping order.
///
/// Every result stays inside `clone_target`: roots and drive prefixes are
/// dropped and `..` never climbs above the repository root.
#[must_use]
pub fn resolve_compose_paths<P: AsRef<Path>>(clone_target: &Path, files: &[P]) -> Vec<PathBuf> {
    files
        .iter()
        .map(|f| clone_target.join(confine(f.as_ref())))
        .collect()
}

/// Lexically normalize `path` into a relative path with no `..` left over.
fn confine(path: &Path) -> PathBuf {
    let mut relative = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::ParentDir => {
                relative.pop();
            }
            Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
        }
    }
    relative
}

/// Runs the fetch-then-deploy pipeline against injected collaborators.
pub struct Deployer<V, C, F = LocalFs> {
    vcs: V,
    compose: C,
    fs: F,
    events: EventSink,
}

impl<V, C, F> Deployer<V, C, F>
where
    V: VcsClient,
    C: ComposeEngine,
    F: FileSystem,
{
    pub fn new(vcs: V, compose: C, fs: F) -> Self {
        Self {
            vcs,
            compose,
            fs,
            events: EventSink::default(),
        }
    }

    /// Also send progress events to `observer`.
    #[must_use]
    pub fn with_events(mut self, observer: flume::Sender<DeployEvent>) -> Self {
        self.events = EventSink::new(Some(observer));
        self
    }

    /// Deploy `request`.
    ///
    /// Any backup of an existing destination is removed before this returns,
    /// on success and on failure.
    ///
    /// # Errors
    ///
    /// - [`DeployError::InvalidRepositoryAddress`] before any filesystem access.
    /// - [`DeployError::DirectoryPreparation`] with the original I/O error if
    ///   the existing destination could not be moved aside.
    /// - [`DeployError::DeploymentFailure`] for everything else, including
    ///   cancellation through `token`.
    pub async fn deploy(
        &self,
        request: &DeploymentRequest,
        token: &CancellationToken,
    ) -> DeployResult<()> {
        info!(
            repository = request.repository(),
            compose_files = ?request.compose_files(),
            destination = %request.destination().display(),
            "Deploying Compose stack from Git repository"
        );

        self.events.started(DeployStage::Resolve);
        let name = resolve_repository_name(request.repository()).inspect_err(|e| {
            error!(repository = request.repository(), "Invalid Git repository URL");
            self.events.failed(DeployStage::Resolve, e.to_string());
        })?;
        let clone_target = request.destination().join(&name);

        self.events.started(DeployStage::Prepare);
        let manager = DirectoryManager::new(&self.fs);
        // Held until return so the backup outlives fetch and deploy
        let _backup = manager.prepare(request.destination()).inspect_err(|e| {
            // creation failures are logged where they happen
            if let Some(io_error) = e.io_error() {
                error!(
                    directory = %request.destination().display(),
                    error = %io_error,
                    "Failed to back up destination directory"
                );
            }
            self.events.failed(DeployStage::Prepare, e.to_string());
        })?;

        self.events.started(DeployStage::Fetch);
        self.fetch(request, &clone_target, token).await?;

        self.events.started(DeployStage::ResolveComposePaths);
        let compose_files = resolve_compose_paths(&clone_target, request.compose_files());

        self.events.started(DeployStage::Deploy);
        let options = ComposeDeployOptions::builder()
            .working_dir(clone_target)
            .maybe_project_name(request.project_name())
            .compose_files(compose_files)
            .build();
        info!(
            compose_files = ?options.compose_files(),
            working_dir = %options.working_dir().display(),
            project_name = options.project_name().unwrap_or_default(),
            "Deploying Compose stack"
        );
        if let Err(e) = self.compose.deploy(&options, token.clone()).await {
            error!(error = %e, "Failed to deploy Compose stack");
            self.events.failed(DeployStage::Deploy, e.to_string());
            return Err(DeployError::DeploymentFailure);
        }

        self.events.completed();
        Ok(())
    }

    async fn fetch(
        &self,
        request: &DeploymentRequest,
        clone_target: &Path,
        token: &CancellationToken,
    ) -> DeployResult<()> {
        let credential = request.credential();
        if let Some(ref credential) = credential {
            info!(
                user = credential.username(),
                password = REDACTED,
                "Using Git authentication"
            );
        }

        if token.is_cancelled() {
            warn!("Deployment cancelled before cloning");
            self.events.failed(DeployStage::Fetch, "cancelled");
            return Err(DeployError::DeploymentFailure);
        }

        let options = CloneOptions::new(request.repository(), credential);
        info!(path = %clone_target.display(), depth = options.depth(), "Cloning git repository");

        if let Err(e) = self
            .vcs
            .clone_repository(clone_target, &options, token.clone())
            .await
        {
            error!(error = %e, "Failed to clone Git repository");
            self.events.failed(DeployStage::Fetch, e.to_string());
            return Err(DeployError::DeploymentFailure);
        }
        Ok(())
    }
}

impl<V, C, F> std::fmt::Debug for Deployer<V, C, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deployer").finish_non_exhaustive()
    }
}
