//! Deterministic author pseudonyms.
//!
//! Names are sorted and numbered from 1, so the same author set always
//! produces the same table.
//!
//! ```
//! use chatmin::core::anonymize::Pseudonyms;
//!
//! let table = Pseudonyms::build(["Zoe", "Adam", "Zoe"]);
//! assert_eq!(table.get("Adam"), Some("User 1"));
//! assert_eq!(table.get("Zoe"), Some("User 2"));
//! assert_eq!(table.resolve("Stranger"), "Stranger");
//! ```

use std::collections::{BTreeMap, BTreeSet};

/// Author → pseudonym table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pseudonyms {
    table: BTreeMap<String, String>,
}

impl Pseudonyms {
    /// Builds the table from every known author name.
    ///
    /// Duplicates are ignored; names are numbered in ascending lexical order.
    pub fn build<I, S>(authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unique: BTreeSet<String> = authors
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();

        let table = unique
            .into_iter()
            .enumerate()
            .map(|(i, name)| (name, format!("User {}", i + 1)))
            .collect();

        Self { table }
    }

    /// Returns the pseudonym of a known author.
    pub fn get(&self, author: &str) -> Option<&str> {
        self.table.get(author).map(String::as_str)
    }

    /// Returns the pseudonym of a known author, or the name unchanged.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.get(name).unwrap_or(name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Iterates over `(author, pseudonym)` pairs in author order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.table.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_in_lexical_order() {
        let table = Pseudonyms::build(["Charlie", "Alice", "Bob"]);
        let pairs: Vec<(&str, &str)> = table.iter().collect();
        assert_eq!(
            pairs,
            vec![("Alice", "User 1"), ("Bob", "User 2"), ("Charlie", "User 3")]
        );
    }

    #[test]
    fn test_stable_across_builds() {
        let a = Pseudonyms::build(["b", "a", "c"]);
        let b = Pseudonyms::build(["c", "b", "a", "a"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_lexical_is_bytewise() {
        // Uppercase sorts before lowercase, Latin before Cyrillic.
        let table = Pseudonyms::build(["alice", "Bob", "Иван"]);
        assert_eq!(table.get("Bob"), Some("User 1"));
        assert_eq!(table.get("alice"), Some("User 2"));
        assert_eq!(table.get("Иван"), Some("User 3"));
    }

    #[test]
    fn test_unknown_name_resolves_to_itself() {
        let table = Pseudonyms::build(["Alice"]);
        assert_eq!(table.resolve("Alice"), "User 1");
        assert_eq!(table.resolve("Channel"), "Channel");
        assert!(table.get("Channel").is_none());
    }

    #[test]
    fn test_empty() {
        let table = Pseudonyms::build(Vec::<String>::new());
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }
}
