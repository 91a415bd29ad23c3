// ── Object identifier newtype ──

use std::fmt;

use serde::{Deserialize, Serialize};

/// A dotted-numeric SNMP object identifier, e.g. `1.3.6.1.2.1.2.2.1.8`.
///
/// Stored in its textual form: row keys coming back from a table walk keep
/// their full hierarchical name, and the core's index-extraction helpers
/// operate on the trailing components of that text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Oid(String);

impl Oid {
    /// The dotted textual form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append one numeric component (`base` -> `base.index`).
    pub fn child(&self, index: u32) -> Oid {
        Oid(format!("{}.{index}", self.0))
    }

    /// Returns `true` if `self` is `prefix` or lies under it.
    pub fn starts_with(&self, prefix: &Oid) -> bool {
        self.0 == prefix.0
            || (self.0.starts_with(prefix.0.as_str())
                && self.0.as_bytes().get(prefix.0.len()) == Some(&b'.'))
    }
}

impl From<&str> for Oid {
    fn from(s: &str) -> Self {
        Oid(s.to_owned())
    }
}

impl From<String> for Oid {
    fn from(s: String) -> Self {
        Oid(s)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn child_appends_component() {
        let base = Oid::from("1.3.6.1.2.1.2.2.1.7");
        assert_eq!(base.child(3).as_str(), "1.3.6.1.2.1.2.2.1.7.3");
        assert_eq!(base.child(1).child(2).as_str(), "1.3.6.1.2.1.2.2.1.7.1.2");
    }

    #[test]
    fn starts_with_respects_component_boundaries() {
        let prefix = Oid::from("1.3.6.1.2.1.2");
        assert!(Oid::from("1.3.6.1.2.1.2.2.1").starts_with(&prefix));
        assert!(Oid::from("1.3.6.1.2.1.2").starts_with(&prefix));
        // "1.3.6.1.2.1.22" shares the text prefix but not the component.
        assert!(!Oid::from("1.3.6.1.2.1.22.1").starts_with(&prefix));
    }
}
