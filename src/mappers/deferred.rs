//! Entries collected during traversal and emitted once the whole source has been visited.

use std::collections::HashMap;

use crate::path::RbPath;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    /// A classification key and the legacy alias it is known by.
    KeyAlias { key: String, alias: String },
    /// An auxiliary attribute, already resolved to its full output path.
    Info { path: RbPath, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum DeferredId {
    Key(String),
    Info(RbPath),
}

impl Deferred {
    fn id(&self) -> DeferredId {
        match self {
            Deferred::KeyAlias { key, .. } => DeferredId::Key(key.clone()),
            Deferred::Info { path, .. } => DeferredId::Info(path.clone()),
        }
    }
}

/// Insertion-ordered side table. Recording an entry with the same identity as an earlier one
/// (same key, or same info path) replaces it in place.
#[derive(Debug, Default)]
pub struct SideTable {
    entries: Vec<Deferred>,
    index: HashMap<DeferredId, usize>,
}

impl SideTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: Deferred) {
        match self.index.get(&entry.id()) {
            Some(&i) => self.entries[i] = entry,
            None => {
                self.index.insert(entry.id(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Deferred> {
        self.entries.iter()
    }
}

impl IntoIterator for SideTable {
    type Item = Deferred;
    type IntoIter = std::vec::IntoIter<Deferred>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_alias(key: &str, alias: &str) -> Deferred {
        Deferred::KeyAlias {
            key: key.to_string(),
            alias: alias.to_string(),
        }
    }

    #[test]
    fn test_rerecording_replaces_in_place() {
        let mut table = SideTable::new();
        table.record(key_alias("ca", "calendar"));
        table.record(key_alias("co", "collation"));
        table.record(key_alias("ca", "cal"));

        assert_eq!(table.len(), 2);
        let entries: Vec<_> = table.into_iter().collect();
        assert_eq!(entries, vec![key_alias("ca", "cal"), key_alias("co", "collation")]);
    }

    #[test]
    fn test_kinds_do_not_collide() {
        let mut table = SideTable::new();
        table.record(key_alias("ca", "calendar"));
        table.record(Deferred::Info {
            path: RbPath::parse("keyInfo/deprecated/ca").unwrap(),
            value: "true".to_string(),
        });
        table.record(Deferred::Info {
            path: RbPath::parse("keyInfo/deprecated/ca").unwrap(),
            value: "true".to_string(),
        });
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
        assert!(matches!(table.iter().last(), Some(Deferred::Info { .. })));
    }
}
