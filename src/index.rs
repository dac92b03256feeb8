//! Alias indexes built once per compile.
//!
//! Reference strings name their target with a free-form human label
//! (`{Brand.Primary 1}`) that does not have to match the structural path, so
//! every indexed token is stored under several spellings. Lookups try exact
//! spellings first, then a canonical form (lowercase, alphanumerics only),
//! then substring containment between canonical forms. The strict and
//! containment passes are also available separately so a caller can put
//! other strategies between them.
//!
//! Ties are always broken by insertion order, which is document traversal
//! order: the first indexed entry that matches wins.

use std::collections::HashMap;

/// Shortest canonical form allowed to match by containment. Single
/// characters (`l`, `2`) would otherwise match almost any alias.
pub const MIN_SUBSTRING_LEN: usize = 2;

/// How an alias was matched against an index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// One of the stored spellings equals the alias
    Exact,
    /// Canonical forms are equal
    Canonical,
    /// One canonical form contains the other
    Substring,
}

/// Comparison key: lowercase alphanumerics only
pub fn canonical(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Every spelling an alias for `path` might use.
///
/// `path` holds the raw keys from the section root down to the token. The
/// full dotted path comes first, then the bare key, then spacing and casing
/// variants of both.
pub fn alias_variants(path: &[&str]) -> Vec<String> {
    let Some(key) = path.last() else {
        return Vec::new();
    };
    let dotted = path.join(".");

    let mut variants: Vec<String> = Vec::new();
    let mut push = |s: String| {
        if !s.is_empty() && !variants.contains(&s) {
            variants.push(s);
        }
    };

    for base in [dotted.as_str(), *key] {
        push(base.to_string());
        push(base.split_whitespace().collect::<Vec<_>>().join("."));
        push(base.split_whitespace().collect::<Vec<_>>().join("-"));
        push(base.to_lowercase());
        push(base.to_lowercase().split_whitespace().collect::<Vec<_>>().join("."));
        push(base.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-"));
        push(base.chars().filter(|c| c.is_alphanumeric() || *c == '.').collect());
    }
    variants
}

#[derive(Debug, Clone)]
struct Entry<T> {
    key: String,
    canonical: String,
    value: T,
}

/// A hit in an [`AliasIndex`]
#[derive(Debug, Clone, PartialEq)]
pub struct Hit<'a, T> {
    pub value: &'a T,
    /// The stored spelling that matched
    pub key: &'a str,
    pub kind: MatchKind,
}

/// Insertion-ordered alias index.
///
/// ```
/// use tokensmith::index::{AliasIndex, MatchKind};
///
/// let mut index = AliasIndex::new();
/// index.insert_path(&["Brand", "Primary 1"], "#18181b".to_string());
///
/// let hit = index.lookup("Brand.Primary 1").unwrap();
/// assert_eq!(hit.value, "#18181b");
/// assert_eq!(hit.kind, MatchKind::Exact);
///
/// let hit = index.lookup("brand / primary-1").unwrap();
/// assert_eq!(hit.kind, MatchKind::Canonical);
/// ```
#[derive(Debug, Clone)]
pub struct AliasIndex<T> {
    entries: Vec<Entry<T>>,
    exact: HashMap<String, usize>,
}

impl<T> Default for AliasIndex<T> {
    fn default() -> Self {
        AliasIndex {
            entries: Vec::new(),
            exact: HashMap::new(),
        }
    }
}

impl<T: Clone> AliasIndex<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `value` under every alias variant of `path`
    pub fn insert_path(&mut self, path: &[&str], value: T) {
        for key in alias_variants(path) {
            self.insert(key, value.clone());
        }
    }

    /// Index `value` under one spelling. An existing spelling is kept.
    pub fn insert(&mut self, key: String, value: T) {
        if self.exact.contains_key(&key) {
            return;
        }
        self.exact.insert(key.clone(), self.entries.len());
        self.entries.push(Entry {
            canonical: canonical(&key),
            key,
            value,
        });
    }
}

impl<T> AliasIndex<T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact spelling match only
    pub fn exact(&self, alias: &str) -> Option<Hit<'_, T>> {
        self.exact.get(alias).map(|&i| self.hit(i, MatchKind::Exact))
    }

    /// Exact, then canonical equality
    pub fn lookup_strict(&self, alias: &str) -> Option<Hit<'_, T>> {
        if let Some(hit) = self.exact(alias) {
            return Some(hit);
        }
        let wanted = canonical(alias);
        if wanted.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .position(|e| e.canonical == wanted)
            .map(|i| self.hit(i, MatchKind::Canonical))
    }

    /// Exact, then canonical equality, then substring containment
    pub fn lookup(&self, alias: &str) -> Option<Hit<'_, T>> {
        self.lookup_strict(alias).or_else(|| self.lookup_contained(alias))
    }

    /// Substring containment between canonical forms only
    pub fn lookup_contained(&self, alias: &str) -> Option<Hit<'_, T>> {
        let wanted = canonical(alias);
        if wanted.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .position(|e| contains_either(&e.canonical, &wanted))
            .map(|i| self.hit(i, MatchKind::Substring))
    }

    fn hit(&self, i: usize, kind: MatchKind) -> Hit<'_, T> {
        let entry = &self.entries[i];
        Hit {
            value: &entry.value,
            key: &entry.key,
            kind,
        }
    }
}

fn contains_either(a: &str, b: &str) -> bool {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    short.chars().count() >= MIN_SUBSTRING_LEN && long.contains(short)
}

/// Literal values of tokens without references
pub type PrimitiveIndex = AliasIndex<String>;

/// Raw reference strings of tokens whose value points elsewhere
pub type ReferenceIndex = AliasIndex<String>;
