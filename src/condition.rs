//! Boolean conditions for WHERE, HAVING, UPDATE and DELETE clauses.
//!
//! A [`Condition`] is either one raw fragment or an ordered list of fragments, where every
//! fragment after the first may carry a connective token (`AND`, `OR`, ...). Connectives are
//! injected verbatim: nothing is implied, nothing is parenthesised, nothing is escaped.
//! Literal values belong in the bound parameter list, never in a fragment.
//!
//! ```rust
//! use sql_adapter::condition::{Condition, encode};
//!
//! let cond = Condition::first("age > ?").and("name = ?").or("admin = 1");
//! assert_eq!(encode(Some(&cond), "WHERE"), " WHERE age > ? AND name = ? OR admin = 1");
//! ```

use std::fmt::Write;

/// One entry of a [`Condition::List`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionPart {
    pub connective: Option<String>,
    pub fragment: String,
}

impl ConditionPart {
    #[must_use]
    pub fn new(connective: Option<&str>, fragment: impl Into<String>) -> Self {
        Self {
            connective: connective.map(str::to_string),
            fragment: fragment.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Emitted verbatim after the keyword.
    Raw(String),
    /// Fragments emitted in order, each after its connective.
    List(Vec<ConditionPart>),
}

impl Condition {
    #[must_use]
    pub fn raw(fragment: impl Into<String>) -> Self {
        Condition::Raw(fragment.into())
    }

    /// Start a list with a leading fragment that has no connective.
    #[must_use]
    pub fn first(fragment: impl Into<String>) -> Self {
        Condition::List(vec![ConditionPart {
            connective: None,
            fragment: fragment.into(),
        }])
    }

    #[must_use]
    pub fn and(self, fragment: impl Into<String>) -> Self {
        self.with("AND", fragment)
    }

    #[must_use]
    pub fn or(self, fragment: impl Into<String>) -> Self {
        self.with("OR", fragment)
    }

    /// Append a fragment joined by an arbitrary connective token. A raw condition is promoted
    /// to a list whose first entry is the raw fragment.
    #[must_use]
    pub fn with(self, connective: &str, fragment: impl Into<String>) -> Self {
        let mut parts = match self {
            Condition::Raw(raw) if raw.trim().is_empty() => Vec::new(),
            Condition::Raw(raw) => vec![ConditionPart {
                connective: None,
                fragment: raw,
            }],
            Condition::List(parts) => parts,
        };
        let connective = if parts.is_empty() {
            None
        } else {
            Some(connective.to_string())
        };
        parts.push(ConditionPart {
            connective,
            fragment: fragment.into(),
        });
        Condition::List(parts)
    }

    /// True when encoding would emit nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Condition::Raw(raw) => raw.trim().is_empty(),
            Condition::List(parts) => parts.is_empty(),
        }
    }

    fn body(&self) -> String {
        match self {
            Condition::Raw(raw) => raw.clone(),
            Condition::List(parts) => {
                let mut out = String::new();
                for (idx, part) in parts.iter().enumerate() {
                    match (&part.connective, idx) {
                        (Some(connective), _) => {
                            let _ = write!(out, " {connective} {}", part.fragment);
                        }
                        (None, 0) => out.push_str(&part.fragment),
                        (None, _) => {
                            let _ = write!(out, " {}", part.fragment);
                        }
                    }
                }
                out
            }
        }
    }
}

impl From<&str> for Condition {
    fn from(fragment: &str) -> Self {
        Condition::Raw(fragment.to_string())
    }
}

impl From<String> for Condition {
    fn from(fragment: String) -> Self {
        Condition::Raw(fragment)
    }
}

impl From<Vec<ConditionPart>> for Condition {
    fn from(parts: Vec<ConditionPart>) -> Self {
        Condition::List(parts)
    }
}

impl<'a> From<Vec<(Option<&'a str>, &'a str)>> for Condition {
    fn from(parts: Vec<(Option<&'a str>, &'a str)>) -> Self {
        Condition::List(
            parts
                .into_iter()
                .map(|(connective, fragment)| ConditionPart::new(connective, fragment))
                .collect(),
        )
    }
}

/// Render a condition behind `keyword`.
///
/// Returns `""` for an absent or empty condition so the clause disappears. With an empty
/// keyword only the condition body is returned (UPDATE appends its own `WHERE`).
#[must_use]
pub fn encode(condition: Option<&Condition>, keyword: &str) -> String {
    let Some(condition) = condition.filter(|c| !c.is_empty()) else {
        return String::new();
    };
    let body = condition.body();
    if keyword.is_empty() {
        body
    } else {
        format!(" {keyword} {body}")
    }
}
