//! services/app/src/state.rs
//!
//! Defines the application's shared state: the wired-up adapters behind their
//! ports, plus the auth session manager. Created once at startup and handed
//! to every view as an `Arc`.

use std::sync::Arc;

use openhealth_core::ports::{
    BackendService, IdeaGenerationService, KeyValueStore, ProblemRefinementService,
    ThreadSummaryService,
};

use crate::adapters::{
    HttpBackendAdapter, JsonFileStore, TemplateIdeaAdapter, TemplateRefineAdapter,
    TemplateSummaryAdapter,
};
use crate::config::Config;
use crate::error::AppError;
use crate::pages::{
    CollaborationHub, DashboardPage, DataSandbox, IdeaGenerator, ProblemBoard,
};
use crate::session::{AuthError, AuthManager};
use openhealth_core::domain::SessionUser;

/// The shared application state, created once at startup.
pub struct AppState {
    pub store: Arc<dyn KeyValueStore>,
    pub config: Arc<Config>,
    /// `None` when no backend is configured; every page tolerates that.
    pub backend: Option<Arc<dyn BackendService>>,
    pub refine_adapter: Arc<dyn ProblemRefinementService>,
    pub ideas_adapter: Arc<dyn IdeaGenerationService>,
    pub summary_adapter: Arc<dyn ThreadSummaryService>,
    pub auth: AuthManager,
}

impl AppState {
    /// Wires the concrete adapters from configuration.
    pub fn from_config(config: Config) -> Result<Arc<Self>, AppError> {
        let store: Arc<dyn KeyValueStore> =
            Arc::new(JsonFileStore::new(config.storage_dir.clone())?);

        let backend: Option<Arc<dyn BackendService>> = config.backend_url.as_ref().map(|url| {
            Arc::new(HttpBackendAdapter::new(reqwest::Client::new(), url.clone()))
                as Arc<dyn BackendService>
        });

        let refine_adapter: Arc<dyn ProblemRefinementService> =
            Arc::new(TemplateRefineAdapter::new(config.refine_delay));
        let ideas_adapter: Arc<dyn IdeaGenerationService> =
            Arc::new(TemplateIdeaAdapter::new(config.idea_delay));
        let summary_adapter: Arc<dyn ThreadSummaryService> = Arc::new(TemplateSummaryAdapter);

        let auth = AuthManager::new(store.clone());

        Ok(Arc::new(Self {
            store,
            config: Arc::new(config),
            backend,
            refine_adapter,
            ideas_adapter,
            summary_adapter,
            auth,
        }))
    }

    /// Registers an account locally and mirrors it to the backend when one is
    /// configured. The mirror never affects the result.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SessionUser, AuthError> {
        let user = self.auth.register(name, email, password)?;
        if let Some(backend) = &self.backend {
            self.auth.mirror_registration(backend.as_ref(), &user.email).await;
        }
        Ok(user)
    }

    pub fn problem_board(&self) -> ProblemBoard {
        ProblemBoard::new(
            self.store.clone(),
            self.backend.clone(),
            self.refine_adapter.clone(),
            self.config.mirror_delay,
        )
    }

    pub fn idea_generator(&self) -> IdeaGenerator {
        IdeaGenerator::new(
            self.backend.clone(),
            self.ideas_adapter.clone(),
            self.config.mirror_delay,
        )
    }

    pub fn collaboration(&self) -> CollaborationHub {
        CollaborationHub::new(
            self.store.clone(),
            self.backend.clone(),
            self.summary_adapter.clone(),
        )
    }

    pub fn sandbox(&self) -> DataSandbox {
        DataSandbox::new(self.backend.clone())
    }

    pub fn dashboard(&self) -> DashboardPage {
        DashboardPage::new(self.store.clone(), self.backend.clone())
    }
}
