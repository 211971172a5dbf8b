pub mod collaboration;
pub mod dashboard;
pub mod ideas;
pub mod problems;
pub mod sandbox;

pub use collaboration::CollaborationHub;
pub use dashboard::DashboardPage;
pub use ideas::IdeaGenerator;
pub use problems::{ProblemBoard, SubmissionPage, SubmissionState};
pub use sandbox::DataSandbox;
