//! # Definition Registry
//!
//! Static table of well-known names (language keywords, standard library,
//! Promise / Web / gRPC APIs and project vocabulary) mapped to tooltip content.
//!
//! The registry is assembled once per batch from compile-time
//! [`DefinitionTable`]s plus optional project terms, then frozen. The same
//! build step compiles the whole-word matcher the fallback parser scans with.

pub mod grpc;
pub mod palette;
pub mod promise;
pub mod tables;
pub mod web_api;

use std::collections::HashMap;

use regex::Regex;
use serde::Serialize;

pub use palette::{Color, Palette};

/// Registry value: what a hover over a known name shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionEntry {
    #[serde(rename = "type")]
    pub type_name: String,
    pub documentation: String,
    pub color: Color,
}

impl DefinitionEntry {
    pub fn new(
        type_name: impl Into<String>,
        documentation: impl Into<String>,
        palette: Palette,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            documentation: documentation.into(),
            color: palette.color(),
        }
    }
}

/// A compile-time table of `(name, type, documentation)` rows sharing a palette.
#[derive(Debug, Clone, Copy)]
pub struct DefinitionTable {
    pub name: &'static str,
    pub palette: Palette,
    pub entries: &'static [(&'static str, &'static str, &'static str)],
}

/// Tables merged by [`DefinitionRegistry::load`], in precedence order.
pub const DEFAULT_TABLES: &[DefinitionTable] = &[
    tables::KEYWORDS,
    tables::BUILTINS,
    tables::REACT,
    promise::PROMISE_API,
    web_api::WEB_API,
    grpc::GRPC_API,
];

#[derive(Debug)]
pub struct DefinitionRegistry {
    entries: HashMap<String, DefinitionEntry>,
    matcher: Option<Regex>,
}

impl DefinitionRegistry {
    /// Registry built from [`DEFAULT_TABLES`].
    pub fn load() -> Self {
        RegistryBuilder::with_default_tables().build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn lookup(&self, name: &str) -> Option<&DefinitionEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whole-word matcher over every registered name. `None` for an empty
    /// registry.
    pub(crate) fn matcher(&self) -> Option<&Regex> {
        self.matcher.as_ref()
    }
}

/// Collects tables and project terms; the first definition of a name wins.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: HashMap<String, DefinitionEntry>,
}

impl RegistryBuilder {
    pub fn with_default_tables() -> Self {
        DEFAULT_TABLES
            .iter()
            .fold(Self::default(), |builder, table| builder.table(table))
    }

    pub fn table(mut self, table: &DefinitionTable) -> Self {
        for (name, type_name, documentation) in table.entries {
            self.insert(
                name,
                DefinitionEntry::new(*type_name, *documentation, table.palette),
                table.name,
            );
        }
        self
    }

    pub fn extra<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, DefinitionEntry)>,
        S: Into<String>,
    {
        for (name, entry) in entries {
            let name = name.into();
            self.insert(&name, entry, "extra");
        }
        self
    }

    fn insert(&mut self, name: &str, entry: DefinitionEntry, source: &str) {
        if !is_identifier_name(name) {
            log::warn!("registry: skipping `{name}` from {source}: not an identifier");
            return;
        }
        if self.entries.contains_key(name) {
            log::debug!("registry: `{name}` from {source} already defined");
            return;
        }
        self.entries.insert(name.to_string(), entry);
    }

    pub fn build(self) -> DefinitionRegistry {
        let matcher = compile_matcher(self.entries.keys().map(String::as_str));
        log::debug!("registry: loaded {} definitions", self.entries.len());
        DefinitionRegistry {
            entries: self.entries,
            matcher,
        }
    }
}

fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn compile_matcher<'a>(names: impl Iterator<Item = &'a str>) -> Option<Regex> {
    let mut names: Vec<&str> = names.collect();
    if names.is_empty() {
        return None;
    }
    // Longest first so alternation never stops at a shorter prefix.
    names.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    let alternation = names
        .iter()
        .map(|n| regex::escape(n))
        .collect::<Vec<_>>()
        .join("|");
    match Regex::new(&format!(r"\b(?:{alternation})\b")) {
        Ok(re) => Some(re),
        Err(e) => {
            log::warn!("registry: failed to compile name matcher: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_names_from_each_table() {
        let registry = DefinitionRegistry::load();

        assert_eq!(registry.lookup("const").unwrap().type_name, "keyword");
        assert_eq!(registry.lookup("Promise").unwrap().color, Palette::Promise.color());
        assert_eq!(registry.lookup("fetch").unwrap().color, Palette::WebApi.color());
        assert_eq!(registry.lookup("Metadata").unwrap().color, Palette::Grpc.color());
        assert_eq!(registry.lookup("useState").unwrap().type_name, "hook");
    }

    #[test]
    fn unknown_name_is_none() {
        let registry = DefinitionRegistry::load();
        assert!(registry.lookup("definitelyNotAKnownName").is_none());
    }

    #[test]
    fn first_table_wins_on_duplicates() {
        // `catch` is both a keyword and a Promise method.
        let registry = DefinitionRegistry::load();
        assert_eq!(registry.lookup("catch").unwrap().color, Palette::Keyword.color());
    }

    #[test]
    fn extra_terms_do_not_override_tables() {
        let registry = RegistryBuilder::with_default_tables()
            .extra([
                ("Promise", DefinitionEntry::new("x", "x", Palette::Project)),
                (
                    "useTooltip",
                    DefinitionEntry::new("hook", "Site tooltip hook.", Palette::Project),
                ),
            ])
            .build();

        assert_eq!(registry.lookup("Promise").unwrap().color, Palette::Promise.color());
        assert_eq!(registry.lookup("useTooltip").unwrap().type_name, "hook");
    }

    #[test]
    fn non_identifier_names_are_rejected() {
        let registry = DefinitionRegistry::builder()
            .extra([
                ("Promise.all", DefinitionEntry::new("x", "x", Palette::Promise)),
                ("$store", DefinitionEntry::new("x", "x", Palette::Project)),
                ("", DefinitionEntry::new("x", "x", Palette::Project)),
            ])
            .build();

        assert!(registry.is_empty());
        assert!(registry.matcher().is_none());
    }

    #[test]
    fn matcher_prefers_whole_words() {
        let registry = DefinitionRegistry::builder()
            .extra([
                ("Map", DefinitionEntry::new("class", "", Palette::Builtin)),
                ("WeakMap", DefinitionEntry::new("class", "", Palette::Builtin)),
            ])
            .build();
        let matches: Vec<&str> = registry
            .matcher()
            .unwrap()
            .find_iter("new WeakMap(); new Map(); Mapping")
            .map(|m| m.as_str())
            .collect();

        assert_eq!(matches, vec!["WeakMap", "Map"]);
    }
}
