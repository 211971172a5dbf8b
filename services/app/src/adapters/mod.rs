pub mod backend;
pub mod ideas;
pub mod refine;
pub mod store;
pub mod summary;

pub use backend::HttpBackendAdapter;
pub use ideas::TemplateIdeaAdapter;
pub use refine::TemplateRefineAdapter;
pub use store::JsonFileStore;
pub use summary::TemplateSummaryAdapter;
