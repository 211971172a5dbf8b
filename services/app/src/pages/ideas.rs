//! services/app/src/pages/ideas.rs
//!
//! The idea generator page: pick a problem, run the canned generation, and
//! optionally save the trio of ideas to the backend. The save is the one
//! action in the application with no local fallback, so its failure is
//! surfaced to the user instead of being swallowed.

use std::sync::Arc;
use std::time::Duration;

use futures::future::try_join_all;
use openhealth_core::domain::{Idea, Problem};
use openhealth_core::ports::{BackendService, IdeaGenerationService, PortError};
use tracing::{debug, info};

/// Fallback problems when the backend is absent, failing, or empty.
pub fn mock_problems() -> Vec<Problem> {
    vec![
        Problem {
            id: 1,
            title: "Early Sepsis Detection in ICU Patients".into(),
            description: "Need a reliable method to detect sepsis onset earlier.".into(),
            submitted_by: "dr.chen@hospital.org".into(),
        },
        Problem {
            id: 2,
            title: "Medication Adherence in Elderly Patients".into(),
            description: "Elderly patients often miss medications due to complex schedules."
                .into(),
            submitted_by: "j.smith@clinic.com".into(),
        },
        Problem {
            id: 3,
            title: "Reducing Emergency Wait Times".into(),
            description: "ED patient waiting times exceed 4 hours during peak periods.".into(),
            submitted_by: "ed.admin@medcenter.org".into(),
        },
    ]
}

/// Buckets a feasibility score for display.
pub fn feasibility_label(score: u32) -> &'static str {
    if score >= 70 {
        "High Feasibility"
    } else if score >= 40 {
        "Moderate"
    } else {
        "Complex"
    }
}

/// Failures of the idea generator page.
#[derive(Debug, thiserror::Error)]
pub enum IdeaError {
    #[error("Please select a problem first")]
    NoProblemSelected,
    #[error(transparent)]
    Service(#[from] PortError),
}

#[derive(Clone)]
pub struct IdeaGenerator {
    backend: Option<Arc<dyn BackendService>>,
    generator: Arc<dyn IdeaGenerationService>,
    mirror_delay: Duration,
}

impl IdeaGenerator {
    pub fn new(
        backend: Option<Arc<dyn BackendService>>,
        generator: Arc<dyn IdeaGenerationService>,
        mirror_delay: Duration,
    ) -> Self {
        Self {
            backend,
            generator,
            mirror_delay,
        }
    }

    /// The selectable problems: the backend list when it has anything,
    /// otherwise the fixed mock set.
    pub async fn problems(&self) -> Vec<Problem> {
        if let Some(backend) = &self.backend {
            match backend.list_problems().await {
                Ok(remote) if !remote.is_empty() => return remote,
                Ok(_) => {}
                Err(e) => debug!(error = %e, "backend problem list unavailable"),
            }
        }
        mock_problems()
    }

    /// Generates three ideas for the selected problem. A missing selection is
    /// the only validation failure here.
    pub async fn generate(&self, problem_id: Option<i64>) -> Result<Vec<Idea>, IdeaError> {
        let problem_id = problem_id.ok_or(IdeaError::NoProblemSelected)?;
        let problems = self.problems().await;
        let title = problems
            .iter()
            .find(|p| p.id == problem_id)
            .map(|p| p.title.as_str())
            .unwrap_or("Healthcare Challenge");
        let ideas = self.generator.generate(title).await?;
        info!(problem_id, count = ideas.len(), "ideas generated");
        Ok(ideas)
    }

    /// Saves generated ideas to the backend. Unlike every other remote call,
    /// a failure here is returned to the caller (there is nothing local to
    /// fall back on); without a backend the save is simulated with a short
    /// delay and succeeds.
    pub async fn save(&self, problem_id: u64, ideas: &[Idea]) -> Result<(), IdeaError> {
        match &self.backend {
            Some(backend) => {
                try_join_all(ideas.iter().map(|idea| {
                    let mut to_store = idea.clone();
                    to_store.problem_id = problem_id;
                    async move { backend.store_idea(&to_store).await }
                }))
                .await?;
                Ok(())
            }
            None => {
                tokio::time::sleep(self.mirror_delay).await;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::TemplateIdeaAdapter;

    fn generator() -> IdeaGenerator {
        IdeaGenerator::new(
            None,
            Arc::new(TemplateIdeaAdapter::new(Duration::ZERO)),
            Duration::ZERO,
        )
    }

    #[tokio::test]
    async fn no_backend_offers_the_mock_problems() {
        let problems = generator().problems().await;
        assert_eq!(problems.len(), 3);
        assert_eq!(problems[2].title, "Reducing Emergency Wait Times");
    }

    #[tokio::test]
    async fn generation_requires_a_selection() {
        let err = generator().generate(None).await.unwrap_err();
        assert!(matches!(err, IdeaError::NoProblemSelected));
    }

    #[tokio::test]
    async fn generation_uses_the_selected_problem_title() {
        let ideas = generator().generate(Some(3)).await.unwrap();
        assert_eq!(ideas.len(), 3);
        assert_eq!(ideas[0].title, "AI-Powered Reducing Monitoring System");
    }

    #[tokio::test]
    async fn unknown_selection_falls_back_to_generic_title() {
        let ideas = generator().generate(Some(999)).await.unwrap();
        assert_eq!(ideas[0].title, "AI-Powered Healthcare Monitoring System");
    }

    #[tokio::test]
    async fn save_without_backend_simulates_success() {
        let gen = generator();
        let ideas = gen.generate(Some(1)).await.unwrap();
        gen.save(1, &ideas).await.unwrap();
    }

    #[test]
    fn feasibility_buckets() {
        assert_eq!(feasibility_label(82), "High Feasibility");
        assert_eq!(feasibility_label(70), "High Feasibility");
        assert_eq!(feasibility_label(67), "Moderate");
        assert_eq!(feasibility_label(40), "Moderate");
        assert_eq!(feasibility_label(39), "Complex");
    }
}
