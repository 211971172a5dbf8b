//! crates/openhealth_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These are also the wire shapes: everything here is persisted as JSON under
//! fixed store keys, so the serde field names must stay camelCase for
//! compatibility with existing stored data.

use serde::{Deserialize, Serialize};

/// A registered account as kept in the users collection.
///
/// `email` is the unique key within the collection. Uniqueness is enforced by
/// a linear scan before insert, not by an index; two concurrent writers can
/// race, which is an accepted limitation of the local store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub email: String,
    /// Rolling-hash fingerprint of the password, see [`fingerprint`].
    /// Stored under the legacy `passwordHash` field name.
    #[serde(rename = "passwordHash")]
    pub password_fingerprint: String,
}

/// The currently signed-in user; the subset of [`Account`] that is safe to
/// hold in memory and persist under the session singleton key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: String,
    pub email: String,
}

/// A submitted healthcare problem. Append-only, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// Epoch-millisecond id assigned at submission time.
    pub id: i64,
    pub title: String,
    pub description: String,
    pub submitted_by: String,
}

/// A lightweight (id, title) reference to a problem, used where a full
/// [`Problem`] is not needed, e.g. when attaching a thread to a problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemRef {
    pub id: String,
    pub title: String,
}

/// A collaboration thread and its messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub id: String,
    pub title: String,
    pub problem_id: String,
    pub messages: Vec<Message>,
}

/// A single message within a thread. Append-only within its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub content: String,
    pub author: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub thread_id: String,
}

/// A generated solution idea with its feasibility score (0-100).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: u64,
    pub problem_id: u64,
    pub title: String,
    pub description: String,
    pub feasibility_score: u32,
    pub category: String,
}

/// A browsable healthcare dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub record_count: u64,
    /// Epoch milliseconds.
    pub last_updated: i64,
}

/// Derives the password fingerprint stored in an [`Account`].
///
/// This is a rolling hash over the UTF-16 code units of the input
/// (`h = (h << 5) - h + unit` with 32-bit signed wrapping), sign-stripped and
/// rendered in lowercase base-16. It reproduces the checksum used by existing
/// stored accounts, so the exact arithmetic must not change.
///
/// This is NOT a cryptographic hash. It is adequate only for equality
/// comparison in a trust-free local demo.
pub fn fingerprint(input: &str) -> String {
    let mut hash: i32 = 0;
    for unit in input.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    format!("{:x}", hash.unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_matches_known_values() {
        assert_eq!(fingerprint("secret1"), "756e8781");
        assert_eq!(fingerprint("wrong"), "6c26dad");
        assert_eq!(fingerprint("password123"), "53ab39b7");
        assert_eq!(fingerprint(""), "0");
        assert_eq!(fingerprint("a"), "61");
        assert_eq!(fingerprint("hello world"), "6aefe2c4");
    }

    #[test]
    fn fingerprint_is_deterministic() {
        for input in ["secret1", "", "üñïçødé", "a much longer passphrase with spaces"] {
            assert_eq!(fingerprint(input), fingerprint(input));
        }
    }

    #[test]
    fn fingerprint_distinguishes_typical_inputs() {
        assert_ne!(fingerprint("secret1"), fingerprint("secret2"));
        assert_ne!(fingerprint("secret1"), fingerprint("Secret1"));
    }

    #[test]
    fn account_serializes_with_legacy_field_names() {
        let account = Account {
            name: "Dr. Jane Smith".into(),
            email: "jane@x.com".into(),
            password_fingerprint: fingerprint("secret1"),
        };
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["passwordHash"], "756e8781");
        assert_eq!(json["email"], "jane@x.com");
    }

    #[test]
    fn message_round_trips_camel_case() {
        let raw = r#"{"id":"m1","content":"hi","author":"A","timestamp":1700000000000,"threadId":"1"}"#;
        let msg: Message = serde_json::from_str(raw).unwrap();
        assert_eq!(msg.thread_id, "1");
        let back = serde_json::to_string(&msg).unwrap();
        assert!(back.contains("\"threadId\":\"1\""));
    }
}
