//! Structured resource records produced by resource-collection jobs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved attribute key identifying named resources (packages, snaps).
pub const NAME_ATTR: &str = "name";

/// One record of key/value string attributes.
///
/// Attributes live in a `BTreeMap` so every iteration is in sorted key order;
/// the report builders rely on that wherever deterministic attribute ordering
/// is required. Immutable once collected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource {
    attrs: BTreeMap<String, String>,
}

impl Resource {
    /// Build a resource from attribute pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            attrs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a single attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// The reserved `name` attribute, if present.
    pub fn name(&self) -> Option<&str> {
        self.get(NAME_ATTR)
    }

    /// All attributes in sorted key order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attrs_iterate_in_sorted_key_order() {
        let res = Resource::from_pairs([("version", "1.2"), ("name", "acl"), ("arch", "amd64")]);
        let keys: Vec<&str> = res.attrs().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["arch", "name", "version"]);
        assert_eq!(res.name(), Some("acl"));
    }
}
