//! services/app/src/keys.rs
//!
//! The fixed store keys. These names are load-bearing: existing deployments
//! already hold data under them, so they must match byte for byte.

/// The registered accounts collection.
pub const USERS: &str = "openhealth_users";

/// The current-session singleton (at most one [`SessionUser`] value).
///
/// [`SessionUser`]: openhealth_core::domain::SessionUser
pub const SESSION: &str = "openhealth_user";

/// The submitted problems list, newest first.
pub const PROBLEMS: &str = "openhealth_problems";

/// The collaboration threads list.
pub const THREADS: &str = "openhealth_collab_threads";
