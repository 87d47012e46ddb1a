//! Task id generation and resolution of user-typed id prefixes.

use crate::error::{Result, TaskboardError};

/// Length of a canonical id (simple-format uuid).
pub const ID_LEN: usize = 32;

/// Number of characters shown in compact listings.
pub const SHORT_LEN: usize = 8;

pub fn generate() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

pub fn short(id: &str) -> &str {
    match id.char_indices().nth(SHORT_LEN) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Resolve user input to one of `existing`.
///
/// An exact match always wins. Otherwise the input is treated as a
/// case-insensitive prefix which must match exactly one id.
pub fn resolve<'a, I>(input: &str, existing: I) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let raw = input.trim();
    if raw.is_empty() {
        return Err(TaskboardError::InvalidTaskId(
            input.to_string(),
            "task id cannot be empty".into(),
        ));
    }

    let existing: Vec<&str> = existing.into_iter().collect();
    if existing.contains(&raw) {
        return Ok(raw.to_string());
    }

    if raw.len() > ID_LEN {
        return Err(TaskboardError::InvalidTaskId(
            raw.to_string(),
            format!("expected at most {ID_LEN} characters"),
        ));
    }

    let prefix = raw.to_ascii_lowercase();
    let mut matches: Vec<&str> = existing
        .iter()
        .copied()
        .filter(|id| id.to_ascii_lowercase().starts_with(&prefix))
        .collect();
    matches.sort_unstable();
    matches.dedup();

    match matches.len() {
        0 => Err(TaskboardError::TaskNotFound(raw.to_string())),
        1 => Ok(matches[0].to_string()),
        _ => Err(TaskboardError::TaskIdAmbiguous(
            raw.to_string(),
            matches.join(", "),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_hex() {
        let a = generate();
        let b = generate();
        assert_ne!(a, b);
        assert_eq!(a.len(), ID_LEN);
        assert!(a.bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn short_truncates_long_ids_only() {
        assert_eq!(short("deadbeefcafe"), "deadbeef");
        assert_eq!(short("abc"), "abc");
    }

    #[test]
    fn resolves_exact_match() {
        let ids = ["deadbeef", "deadbeefcafe"];
        assert_eq!(resolve("deadbeef", ids).unwrap(), "deadbeef");
    }

    #[test]
    fn resolves_unique_prefix_case_insensitively() {
        let ids = ["deadbeef0001", "cafebabe0002"];
        assert_eq!(resolve("DEAD", ids).unwrap(), "deadbeef0001");
    }

    #[test]
    fn resolves_legacy_non_hex_ids() {
        let ids = ["lq2k3x9abc", "m01zz"];
        assert_eq!(resolve("lq2", ids).unwrap(), "lq2k3x9abc");
    }

    #[test]
    fn reports_ambiguous_prefix_sorted() {
        let ids = ["abcf0002", "abc00001"];
        match resolve("abc", ids).unwrap_err() {
            TaskboardError::TaskIdAmbiguous(prefix, matches) => {
                assert_eq!(prefix, "abc");
                assert_eq!(matches, "abc00001, abcf0002");
            }
            other => panic!("expected TaskIdAmbiguous, got {other:?}"),
        }
    }

    #[test]
    fn reports_not_found_and_invalid() {
        let ids = ["deadbeef0001"];
        assert!(matches!(
            resolve("beef", ids),
            Err(TaskboardError::TaskNotFound(_))
        ));
        assert!(matches!(
            resolve("  ", ids),
            Err(TaskboardError::InvalidTaskId(_, _))
        ));
        let long = "a".repeat(ID_LEN + 1);
        assert!(matches!(
            resolve(&long, ids),
            Err(TaskboardError::InvalidTaskId(_, _))
        ));
    }
}
