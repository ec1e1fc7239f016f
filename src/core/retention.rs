//! core::retention
//!
//! What happens to the sidecar once its migrated lines are gone.
//!
//! A sidecar whose remaining lines are all blank or `using` headers has
//! nothing left worth keeping and is deleted. Anything else is rewritten
//! with exactly the remaining lines.

use serde::Serialize;

use super::markers::SIDECAR_USING_PREFIX;

/// Outcome of the retention decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "lines", rename_all = "snake_case")]
pub enum Retention {
    /// Remove the sidecar file.
    Delete,
    /// Overwrite the sidecar with these lines.
    Rewrite(Vec<String>),
    /// Leave the sidecar as it is.
    Keep,
}

/// Retention settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Delete sidecars left with only blank and `using` lines.
    /// When false such sidecars are kept untouched.
    pub delete_when_empty: bool,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            delete_when_empty: true,
        }
    }
}

impl RetentionPolicy {
    /// Decide what to do with the remaining sidecar lines.
    pub fn decide<S: AsRef<str>>(&self, remaining: &[S]) -> Retention {
        if remaining.iter().any(|line| carries_content(line.as_ref())) {
            Retention::Rewrite(remaining.iter().map(|l| l.as_ref().to_string()).collect())
        } else if self.delete_when_empty {
            Retention::Delete
        } else {
            Retention::Keep
        }
    }
}

/// Decide retention with the default policy.
///
/// ```
/// use attrshift::core::retention::{decide_retention, Retention};
///
/// assert_eq!(decide_retention(&["using System;", ""]), Retention::Delete);
/// assert_eq!(
///     decide_retention(&["[assembly: ComVisible(false)]"]),
///     Retention::Rewrite(vec!["[assembly: ComVisible(false)]".to_string()])
/// );
/// ```
pub fn decide_retention<S: AsRef<str>>(remaining: &[S]) -> Retention {
    RetentionPolicy::default().decide(remaining)
}

/// A line that is neither empty nor a `using` header.
fn carries_content(line: &str) -> bool {
    !line.is_empty() && !line.starts_with(SIDECAR_USING_PREFIX)
}
