//! Snippet dictionary construction.
//!
//! A snippet maps a short key to either literal output text (`Raw`) or a
//! structured property definition (`Property`). Construction happens once per
//! configuration:
//!
//! ```text
//! raw map ──▶ dedup + lexicographic sort (BTreeMap)
//!         ──▶ classify each pair          (property-ish value? parse it)
//!         ──▶ nest                        ("pos-a" folds into "pos")
//!         ──▶ SnippetTable (immutable, shareable across resolutions)
//! ```
//!
//! Classification: a value shaped like `name` or `name:alt|alt|...` becomes a
//! `Property` entry whose keyword aliases are derived from the literal tokens
//! (and function names) of its own value alternatives. Anything else stays a
//! `Raw` entry emitted verbatim.
//!
//! Nesting folds a specialization's alternatives and aliases into its general
//! entry, so fuzzy keyword lookups against `pos` also see what `pos-a`
//! contributes. The specialized entry stays in the table and remains directly
//! matchable.

use super::parser::parse_value_text;
use crate::{KeywordRef, Value, ValueGroup};
use std::collections::BTreeMap;

/// A dictionary entry: raw output text or a structured property definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Snippet {
    Raw(RawSnippet),
    Property(PropertySnippet),
}

impl Snippet {
    pub fn key(&self) -> &str {
        match self {
            Snippet::Raw(raw) => &raw.key,
            Snippet::Property(property) => &property.key,
        }
    }
}

/// Literal output text with no property semantics (`@f` → an `@font-face`
/// block).
#[derive(Debug, Clone, PartialEq)]
pub struct RawSnippet {
    pub key: String,
    pub value: String,
}

/// A canonical property name plus its default/keyword value alternatives.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySnippet {
    pub key: String,
    pub property: String,
    /// Ordered value alternatives; the first one doubles as the default.
    pub value: Vec<Vec<ValueGroup>>,
    /// Keyword aliases pointing into `value` by index.
    pub keywords: Vec<KeywordRef>,
}

/// An ordered, queryable collection of dictionary entries.
///
/// Built once per configuration and treated as immutable thereafter; safe to
/// share across concurrent resolutions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnippetTable {
    entries: Vec<Snippet>,
}

impl SnippetTable {
    /// Build a table from raw key/value pairs.
    ///
    /// Pairs are deduplicated by key (later entries win) and sorted
    /// lexicographically before nesting, so the result does not depend on
    /// input iteration order.
    pub fn build<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let deduped: BTreeMap<String, String> = pairs.into_iter().collect();
        let mut entries: Vec<Snippet> =
            deduped.iter().map(|(key, value)| classify(key, value)).collect();
        nest(&mut entries);
        SnippetTable { entries }
    }

    pub fn entries(&self) -> &[Snippet] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the property entry for an enclosing property name (used when a
    /// bare value is resolved against an explicit context).
    pub fn property(&self, name: &str) -> Option<&PropertySnippet> {
        self.entries.iter().find_map(|entry| match entry {
            Snippet::Property(property) if property.property == name || property.key == name => {
                Some(property)
            }
            _ => None,
        })
    }
}

fn classify(key: &str, value: &str) -> Snippet {
    let property_re = regex!(r"^([a-zA-Z-]+)(?:\s*:\s*(.+))?$");
    let Some(caps) = property_re.captures(value) else {
        return Snippet::Raw(RawSnippet { key: key.to_string(), value: value.to_string() });
    };

    let property = caps.get(1).unwrap().as_str().to_string();
    let alternatives: Vec<Vec<ValueGroup>> = match caps.get(2) {
        Some(rest) => rest.as_str().split('|').map(parse_value_text).collect(),
        None => Vec::new(),
    };
    let keywords = collect_keywords(&alternatives);

    Snippet::Property(PropertySnippet { key: key.to_string(), property, value: alternatives, keywords })
}

/// Derive keyword aliases from the literal tokens (and function names) of
/// each value alternative. First occurrence of a name wins.
fn collect_keywords(alternatives: &[Vec<ValueGroup>]) -> Vec<KeywordRef> {
    let mut keywords: Vec<KeywordRef> = Vec::new();
    for (index, alternative) in alternatives.iter().enumerate() {
        for group in alternative {
            for item in &group.items {
                let name = match item {
                    Value::Literal(text) => Some(text.clone()),
                    Value::FunctionCall { name, .. } => Some(name.clone()),
                    _ => None,
                };
                if let Some(keyword) = name {
                    if !keywords.iter().any(|k| k.keyword == keyword) {
                        keywords.push(KeywordRef { keyword, index });
                    }
                }
            }
        }
    }
    keywords
}

/// `key` extends `general` at a word boundary: `pos-a` specializes `pos`.
fn is_specialization(key: &str, general: &str) -> bool {
    key.len() > general.len() && key.starts_with(general) && key[general.len()..].starts_with('-')
}

/// Fold each specialization's alternatives and aliases into its nearest
/// general entry. Entries must already be in lexicographic key order.
fn nest(entries: &mut [Snippet]) {
    let mut stack: Vec<usize> = Vec::new();
    for current in 0..entries.len() {
        if !matches!(entries[current], Snippet::Property(_)) {
            continue;
        }
        loop {
            match stack.last() {
                Some(&general) if is_specialization(entries[current].key(), entries[general].key()) => {
                    merge_into(entries, general, current);
                    stack.push(current);
                    break;
                }
                Some(_) => {
                    stack.pop();
                }
                None => {
                    stack.push(current);
                    break;
                }
            }
        }
    }
}

fn merge_into(entries: &mut [Snippet], general: usize, specialized: usize) {
    let (alternatives, keywords) = match &entries[specialized] {
        Snippet::Property(property) => (property.value.clone(), property.keywords.clone()),
        Snippet::Raw(_) => return,
    };
    if let Snippet::Property(property) = &mut entries[general] {
        let base = property.value.len();
        property.value.extend(alternatives);
        for keyword in keywords {
            if !property.keywords.iter().any(|k| k.keyword == keyword.keyword) {
                property
                    .keywords
                    .push(KeywordRef { keyword: keyword.keyword, index: keyword.index + base });
            }
        }
    }
}
