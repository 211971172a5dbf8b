pub mod domain;
pub mod ports;

pub use domain::{
    fingerprint, Account, Dataset, Idea, Message, Problem, ProblemRef, SessionUser, Thread,
};
pub use ports::{
    load_or, save, BackendService, IdeaGenerationService, KeyValueStore, PortError, PortResult,
    ProblemRefinementService, ThreadSummaryService,
};
