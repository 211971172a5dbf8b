//! services/app/src/pages/problems.rs
//!
//! The problem submission page: a validated draft goes through "AI"
//! refinement, the user accepts or discards the refined statement, and
//! accepted problems land at the head of the locally persisted list with a
//! best-effort mirror to the remote backend.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use openhealth_core::domain::{Problem, SessionUser};
use openhealth_core::ports::{
    load_or, save, BackendService, KeyValueStore, PortError, ProblemRefinementService,
};
use tracing::{debug, info};

use crate::keys;

/// The selectable problem categories.
pub const CATEGORIES: [&str; 4] = ["Clinical", "Research", "Administrative", "Public Health"];

/// Minimum description length accepted by validation.
pub const MIN_DESCRIPTION_LEN: usize = 50;

fn seed_problems() -> Vec<Problem> {
    vec![
        Problem {
            id: 1,
            title: "Early Sepsis Detection in ICU Patients".into(),
            description: "Need a reliable method to detect sepsis onset 2-3 hours earlier \
                than current clinical signs."
                .into(),
            submitted_by: "dr.chen@hospital.org".into(),
        },
        Problem {
            id: 2,
            title: "Medication Adherence in Elderly Patients".into(),
            description: "Elderly patients often miss medications due to complex schedules. \
                Need a scalable solution."
                .into(),
            submitted_by: "j.smith@clinic.com".into(),
        },
    ]
}

//=========================================================================================
// Draft + Validation
//=========================================================================================

/// The user's in-progress form input.
#[derive(Debug, Clone, Default)]
pub struct ProblemDraft {
    pub title: String,
    pub category: String,
    pub description: String,
}

/// Field-level validation messages. Failed validation blocks the
/// Idle -> Refining transition and never produces a page-level fault.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub title: Option<&'static str>,
    pub category: Option<&'static str>,
    pub description: Option<&'static str>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.category.is_none() && self.description.is_none()
    }
}

fn validate(draft: &ProblemDraft) -> ValidationErrors {
    let mut errs = ValidationErrors::default();
    if draft.title.trim().is_empty() {
        errs.title = Some("Problem title is required");
    }
    if draft.category.is_empty() {
        errs.category = Some("Please select a category");
    }
    if draft.description.trim().is_empty() {
        errs.description = Some("Description is required");
    } else if draft.description.trim().chars().count() < MIN_DESCRIPTION_LEN {
        errs.description = Some("Description must be at least 50 characters");
    }
    errs
}

/// Failures of the submission flow.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("draft failed validation")]
    Invalid(ValidationErrors),
    #[error("no refined statement to accept")]
    NotRefined,
    #[error(transparent)]
    Service(#[from] PortError),
}

//=========================================================================================
// ProblemBoard (the persisted list)
//=========================================================================================

/// Read/write access to the problem list shared by this page and the
/// dashboard.
#[derive(Clone)]
pub struct ProblemBoard {
    store: Arc<dyn KeyValueStore>,
    backend: Option<Arc<dyn BackendService>>,
    refiner: Arc<dyn ProblemRefinementService>,
    mirror_delay: Duration,
}

impl ProblemBoard {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        backend: Option<Arc<dyn BackendService>>,
        refiner: Arc<dyn ProblemRefinementService>,
        mirror_delay: Duration,
    ) -> Self {
        Self {
            store,
            backend,
            refiner,
            mirror_delay,
        }
    }

    /// Lists problems, newest first. Locally submitted problems always win so
    /// the user sees their own work; otherwise the backend is consulted, and
    /// an absent/failing/empty backend falls back to the seed records.
    pub async fn list(&self) -> Vec<Problem> {
        let local: Vec<Problem> = load_or(self.store.as_ref(), keys::PROBLEMS, Vec::new);
        if !local.is_empty() {
            return local;
        }
        if let Some(backend) = &self.backend {
            match backend.list_problems().await {
                Ok(remote) if !remote.is_empty() => return remote,
                Ok(_) => {}
                Err(e) => debug!(error = %e, "backend problem list unavailable"),
            }
        }
        seed_problems()
    }

    /// Opens a fresh submission form over this board.
    pub fn submission(&self) -> SubmissionPage {
        SubmissionPage {
            board: self.clone(),
            draft: ProblemDraft::default(),
            state: SubmissionState::Idle,
        }
    }

    fn persist(&self, problem: &Problem) {
        let mut local: Vec<Problem> = load_or(self.store.as_ref(), keys::PROBLEMS, Vec::new);
        local.insert(0, problem.clone());
        save(self.store.as_ref(), keys::PROBLEMS, &local);
    }
}

//=========================================================================================
// SubmissionPage (the state machine)
//=========================================================================================

/// Where the form currently is:
/// `Idle -> Refining -> Refined -> { accept -> Idle | edit_again -> Idle }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Refining,
    Refined { preview: String },
}

pub struct SubmissionPage {
    board: ProblemBoard,
    pub draft: ProblemDraft,
    state: SubmissionState,
}

impl SubmissionPage {
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Validates the draft and runs it through the refinement service.
    /// Validation failures leave the page Idle with no persistence and no
    /// remote call; a successful run lands in `Refined` with the preview text.
    pub async fn refine(&mut self) -> Result<String, SubmitError> {
        let errs = validate(&self.draft);
        if !errs.is_empty() {
            return Err(SubmitError::Invalid(errs));
        }

        self.state = SubmissionState::Refining;
        let preview = match self
            .board
            .refiner
            .refine(&self.draft.title, &self.draft.description, &self.draft.category)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                self.state = SubmissionState::Idle;
                return Err(e.into());
            }
        };
        self.state = SubmissionState::Refined {
            preview: preview.clone(),
        };
        Ok(preview)
    }

    /// Accepts the refined statement: persists the problem at the head of the
    /// local list, mirrors it to the backend without tying success to the
    /// mirror, and resets the form to Idle.
    pub async fn accept(&mut self, user: Option<&SessionUser>) -> Result<Problem, SubmitError> {
        let SubmissionState::Refined { preview } = &self.state else {
            return Err(SubmitError::NotRefined);
        };

        let problem = Problem {
            id: Utc::now().timestamp_millis(),
            title: self.draft.title.clone(),
            description: preview.clone(),
            submitted_by: user.map(|u| u.email.clone()).unwrap_or_else(|| "anonymous".into()),
        };

        // Local persistence carries the user-visible contract.
        self.board.persist(&problem);
        info!(id = problem.id, "problem submitted");

        match &self.board.backend {
            Some(backend) => {
                if let Err(e) = backend
                    .submit_problem(&problem.title, &problem.description, &problem.submitted_by)
                    .await
                {
                    // Already saved locally, so the mirror failure is not the
                    // user's problem.
                    debug!(error = %e, "backend problem mirror failed");
                }
            }
            None => tokio::time::sleep(self.board.mirror_delay).await,
        }

        self.draft = ProblemDraft::default();
        self.state = SubmissionState::Idle;
        Ok(problem)
    }

    /// Discards the refined preview and returns to Idle, keeping the draft so
    /// the user can edit and resubmit.
    pub fn edit_again(&mut self) {
        self.state = SubmissionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{JsonFileStore, TemplateRefineAdapter};

    fn board() -> (tempfile::TempDir, Arc<dyn KeyValueStore>, ProblemBoard) {
        let dir = tempfile::tempdir().unwrap();
        let store: Arc<dyn KeyValueStore> =
            Arc::new(JsonFileStore::new(dir.path().to_path_buf()).unwrap());
        let board = ProblemBoard::new(
            store.clone(),
            None,
            Arc::new(TemplateRefineAdapter::new(Duration::ZERO)),
            Duration::ZERO,
        );
        (dir, store, board)
    }

    fn valid_draft() -> ProblemDraft {
        ProblemDraft {
            title: "Early Sepsis Detection".into(),
            category: "Clinical".into(),
            description: "Need a reliable method to detect sepsis onset hours earlier than \
                current clinical signs allow."
                .into(),
        }
    }

    #[tokio::test]
    async fn empty_board_lists_seed_problems() {
        let (_dir, _store, board) = board();
        let problems = board.list().await;
        assert_eq!(problems.len(), 2);
        assert_eq!(problems[0].title, "Early Sepsis Detection in ICU Patients");
    }

    #[tokio::test]
    async fn short_description_is_rejected_before_any_persistence() {
        let (_dir, store, board) = board();
        let mut page = board.submission();
        page.draft = valid_draft();
        page.draft.description = "too short".into();

        let err = page.refine().await.unwrap_err();
        match err {
            SubmitError::Invalid(errs) => {
                assert_eq!(
                    errs.description,
                    Some("Description must be at least 50 characters")
                );
                assert!(errs.title.is_none());
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
        assert_eq!(*page.state(), SubmissionState::Idle);
        // Nothing was written.
        assert!(store.get(keys::PROBLEMS).is_none());
    }

    #[tokio::test]
    async fn missing_fields_surface_field_level_messages() {
        let (_dir, _store, board) = board();
        let mut page = board.submission();
        let SubmitError::Invalid(errs) = page.refine().await.unwrap_err() else {
            panic!("expected validation failure");
        };
        assert_eq!(errs.title, Some("Problem title is required"));
        assert_eq!(errs.category, Some("Please select a category"));
        assert_eq!(errs.description, Some("Description is required"));
    }

    #[tokio::test]
    async fn refine_accept_puts_problem_at_head_of_list() {
        let (_dir, _store, board) = board();
        let mut page = board.submission();
        page.draft = valid_draft();

        let preview = page.refine().await.unwrap();
        assert!(matches!(page.state(), SubmissionState::Refined { .. }));

        let user = SessionUser {
            name: "Dr. Jane Smith".into(),
            email: "jane@x.com".into(),
        };
        let submitted = page.accept(Some(&user)).await.unwrap();
        assert_eq!(submitted.description, preview);
        assert_eq!(submitted.submitted_by, "jane@x.com");
        assert_eq!(*page.state(), SubmissionState::Idle);
        assert!(page.draft.title.is_empty());

        let problems = board.list().await;
        assert_eq!(problems[0], submitted);
    }

    #[tokio::test]
    async fn accept_without_refinement_is_rejected() {
        let (_dir, _store, board) = board();
        let mut page = board.submission();
        page.draft = valid_draft();
        assert!(matches!(
            page.accept(None).await,
            Err(SubmitError::NotRefined)
        ));
    }

    #[tokio::test]
    async fn edit_again_discards_the_preview_but_keeps_the_draft() {
        let (_dir, store, board) = board();
        let mut page = board.submission();
        page.draft = valid_draft();
        page.refine().await.unwrap();

        page.edit_again();
        assert_eq!(*page.state(), SubmissionState::Idle);
        assert_eq!(page.draft.title, "Early Sepsis Detection");
        assert!(store.get(keys::PROBLEMS).is_none());
    }

    #[tokio::test]
    async fn anonymous_submission_is_attributed_as_anonymous() {
        let (_dir, _store, board) = board();
        let mut page = board.submission();
        page.draft = valid_draft();
        page.refine().await.unwrap();
        let submitted = page.accept(None).await.unwrap();
        assert_eq!(submitted.submitted_by, "anonymous");
    }
}
