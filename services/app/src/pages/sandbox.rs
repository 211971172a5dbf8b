//! services/app/src/pages/sandbox.rs
//!
//! The data sandbox page: a read-only catalogue of healthcare datasets with
//! search and category filtering. The backend list is preferred when it has
//! anything; otherwise the fixed catalogue is shown. Nothing here mutates
//! persistence.

use std::sync::Arc;

use openhealth_core::domain::Dataset;
use openhealth_core::ports::BackendService;
use tracing::debug;

/// The dataset categories, in display order, preceded by the "All" filter.
pub const CATEGORIES: [&str; 7] = [
    "All",
    "Epidemiology",
    "Cardiology",
    "Psychiatry",
    "Pharmacology",
    "Pediatrics",
    "Genomics",
];

fn mock_datasets() -> Vec<Dataset> {
    vec![
        Dataset {
            id: 1,
            name: "COVID-19 Clinical Outcomes".into(),
            description: "Comprehensive dataset of COVID-19 patient outcomes across 47 \
                countries including ICU admissions, treatment protocols, and recovery \
                trajectories. Includes anonymized patient demographics and comorbidities."
                .into(),
            category: "Epidemiology".into(),
            record_count: 2_400_000,
            last_updated: 1_731_628_800_000,
        },
        Dataset {
            id: 2,
            name: "Heart Disease Risk Factors".into(),
            description: "Longitudinal study data tracking cardiovascular risk factors \
                across diverse populations. Covers dietary habits, physical activity, \
                genetic markers, and clinical measurements over 15 years."
                .into(),
            category: "Cardiology".into(),
            record_count: 890_000,
            last_updated: 1_727_481_600_000,
        },
        Dataset {
            id: 3,
            name: "Mental Health Survey 2023".into(),
            description: "National mental health survey data capturing anxiety, depression, \
                PTSD prevalence and treatment outcomes. Includes demographic breakdowns and \
                correlation with socioeconomic factors."
                .into(),
            category: "Psychiatry".into(),
            record_count: 156_000,
            last_updated: 1_704_844_800_000,
        },
        Dataset {
            id: 4,
            name: "Drug Interaction Database".into(),
            description: "Curated database of known and predicted drug-drug interactions \
                with clinical severity ratings, mechanisms of action, and evidence quality \
                scores from peer-reviewed literature."
                .into(),
            category: "Pharmacology".into(),
            record_count: 3_100_000,
            last_updated: 1_733_011_200_000,
        },
        Dataset {
            id: 5,
            name: "Pediatric Growth Charts".into(),
            description: "WHO and CDC standardized growth chart data for children aged 0-18 \
                years, segmented by gender, ethnicity, and geographic region. Updated with \
                latest global health metrics."
                .into(),
            category: "Pediatrics".into(),
            record_count: 445_000,
            last_updated: 1_718_841_600_000,
        },
        Dataset {
            id: 6,
            name: "Genomics Research Dataset".into(),
            description: "Whole genome sequencing data from diverse patient populations \
                with associated phenotypic data. Includes variant calling results and GWAS \
                findings for 120+ common diseases."
                .into(),
            category: "Genomics".into(),
            record_count: 78_000,
            last_updated: 1_728_086_400_000,
        },
    ]
}

/// Public landing page for each catalogue entry.
pub fn external_link(name: &str) -> Option<&'static str> {
    match name {
        "COVID-19 Clinical Outcomes" => Some(
            "https://www.who.int/emergencies/diseases/novel-coronavirus-2019/technical-guidance/early-investigations",
        ),
        "Heart Disease Risk Factors" => {
            Some("https://www.kaggle.com/datasets/fedesoriano/heart-failure-prediction")
        }
        "Mental Health Survey 2023" => {
            Some("https://www.nimh.nih.gov/health/statistics/mental-illness")
        }
        "Drug Interaction Database" => Some("https://www.drugbank.com/"),
        "Pediatric Growth Charts" => {
            Some("https://www.who.int/tools/child-growth-standards/standards")
        }
        "Genomics Research Dataset" => Some("https://www.ncbi.nlm.nih.gov/gap/"),
        _ => None,
    }
}

/// Compact record-count rendering: 2.4M, 890K, 156.
pub fn format_record_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.0}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

#[derive(Clone)]
pub struct DataSandbox {
    backend: Option<Arc<dyn BackendService>>,
}

impl DataSandbox {
    pub fn new(backend: Option<Arc<dyn BackendService>>) -> Self {
        Self { backend }
    }

    /// All datasets; backend first, catalogue as fallback.
    pub async fn list(&self) -> Vec<Dataset> {
        if let Some(backend) = &self.backend {
            match backend.list_datasets().await {
                Ok(remote) if !remote.is_empty() => return remote,
                Ok(_) => {}
                Err(e) => debug!(error = %e, "backend dataset list unavailable"),
            }
        }
        mock_datasets()
    }

    pub async fn get(&self, id: u64) -> Option<Dataset> {
        self.list().await.into_iter().find(|d| d.id == id)
    }

    /// Case-insensitive search over name and description, narrowed by
    /// category unless the category is "All".
    pub async fn search(&self, query: &str, category: &str) -> Vec<Dataset> {
        let needle = query.to_lowercase();
        self.list()
            .await
            .into_iter()
            .filter(|d| {
                let matches_search = d.name.to_lowercase().contains(&needle)
                    || d.description.to_lowercase().contains(&needle);
                let matches_category = category == "All" || d.category == category;
                matches_search && matches_category
            })
            .collect()
    }
}
