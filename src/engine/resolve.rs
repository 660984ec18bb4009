//! Per-node resolution.
//!
//! Each top-level node moves through a small state machine:
//!
//! ```text
//! Unresolved ──┬─ context supplied ──▶ ResolvedAsValue (keyword lookup only)
//!              ├─ best match: Raw ──▶ ResolvedAsSnippet (literal text)
//!              ├─ best match: Property ──▶ ResolvedAsProperty
//!              │    - rename to canonical property
//!              │    - no value: remainder keyword, else field-wrapped default
//!              │    - bare literal value: snippet keywords, then global
//!              └─ no match ──▶ left untouched
//! ```
//!
//! Numeric-unit inference runs as the closing step of every branch. "No
//! match" is a normal, silent outcome: the node passes through unresolved.
//!
//! Set `STYLET_DEBUG_RESOLVE=1` to print match decisions.

use super::fields::{has_field, wrap_with_fields};
use super::score::{find_best_match_scored, unmatched_remainder};
use super::snippets::{PropertySnippet, RawSnippet, Snippet, SnippetTable};
use crate::{Config, MatchOutcome, MatchTrace, PropertyNode, StylesheetOptions, Value, ValueGroup};

/// Outcome of resolving one tree: per-node traces plus the next unused
/// tab-stop index (the renderer continues numbering from it).
#[derive(Debug, Clone)]
pub(crate) struct Resolution {
    pub traces: Vec<MatchTrace>,
    pub next_field: u32,
}

/// Resolve every node of a parsed abbreviation in place.
///
/// The table and config are read-only; the field counter is owned by this
/// call, so one built table can serve concurrent resolutions.
pub(crate) fn resolve_tree(root: &mut PropertyNode, table: &SnippetTable, config: &Config) -> Resolution {
    let mut counter = 1u32;
    let mut traces = Vec::new();
    for node in &mut root.children {
        resolve_node(node, table, config, &mut counter, &mut traces);
    }
    Resolution { traces, next_field: counter }
}

fn resolve_node(
    node: &mut PropertyNode,
    table: &SnippetTable,
    config: &Config,
    counter: &mut u32,
    traces: &mut Vec<MatchTrace>,
) {
    let debug = std::env::var_os("STYLET_DEBUG_RESOLVE").is_some();

    if let Some(context) = config.context.as_deref() {
        // An enclosing property name is known: the node is a bare value, so
        // property matching is skipped entirely.
        resolve_as_value(node, table, context, config, traces);
    } else if let Some(typed) = node.name.clone() {
        let min_score = config.options.fuzzy_search_min_score;
        match find_best_match_scored(&typed, table.entries(), min_score, |s| s.key()) {
            Some((Snippet::Property(snippet), matched_score)) => {
                if debug {
                    eprintln!(
                        "[resolve] \"{typed}\" -> property \"{}\" (key \"{}\", score {matched_score:.3})",
                        snippet.property, snippet.key
                    );
                }
                traces.push(MatchTrace {
                    input: typed,
                    matched: Some(snippet.key.clone()),
                    score: matched_score,
                    outcome: MatchOutcome::Property,
                });
                resolve_as_property(node, snippet, config, counter);
            }
            Some((Snippet::Raw(snippet), matched_score)) => {
                if debug {
                    eprintln!("[resolve] \"{typed}\" -> raw snippet \"{}\" (score {matched_score:.3})", snippet.key);
                }
                traces.push(MatchTrace {
                    input: typed,
                    matched: Some(snippet.key.clone()),
                    score: matched_score,
                    outcome: MatchOutcome::Snippet,
                });
                resolve_as_snippet(node, snippet);
            }
            None => {
                if debug {
                    eprintln!("[resolve] \"{typed}\" -> no match, passing through");
                }
                traces.push(MatchTrace { input: typed, matched: None, score: 0.0, outcome: MatchOutcome::Unmatched });
            }
        }
    }

    resolve_numeric_value(node, config);

    for child in &mut node.children {
        resolve_node(child, table, config, counter, traces);
    }
}

/// The matched entry is a property definition: rename the node and fill in
/// its value from the typed remainder, keyword aliases, or the default.
fn resolve_as_property(node: &mut PropertyNode, snippet: &PropertySnippet, config: &Config, counter: &mut u32) {
    let Some(typed) = node.name.replace(snippet.property.clone()) else { return };

    if node.value.is_empty() {
        // `poas` against key `pos` leaves remainder `as`, which resolves
        // against the entry's keyword aliases (`absolute`).
        let remainder = unmatched_remainder(&typed, &snippet.key);
        let resolved = if remainder.is_empty() { None } else { resolve_keyword(remainder, snippet, config) };
        match resolved {
            Some(groups) => node.value = groups,
            None => {
                if let Some(default) = snippet.value.first() {
                    node.value = if default.iter().any(has_field) {
                        default.clone()
                    } else {
                        default.iter().map(|group| wrap_with_fields(group, counter)).collect()
                    };
                }
            }
        }
    } else if let Some(word) = single_bare_literal(node) {
        if let Some(groups) = resolve_keyword(&word, snippet, config) {
            node.value = groups;
        } else if let Some(keyword) = global_keyword(&word, config) {
            node.value = vec![ValueGroup::single(Value::Literal(keyword))];
        }
        // Non-literal or multi-token values are assumed well-formed.
    }
}

/// The matched entry is raw output text: the node loses its name and carries
/// the snippet body as a single literal.
fn resolve_as_snippet(node: &mut PropertyNode, snippet: &RawSnippet) {
    node.name = None;
    node.value = vec![ValueGroup::single(Value::Literal(snippet.value.clone()))];
}

/// Context branch: the node is a bare value for a known property. Try the
/// property's keyword aliases, then the global keyword dictionary; leave the
/// node unchanged when neither matches.
fn resolve_as_value(
    node: &mut PropertyNode,
    table: &SnippetTable,
    context: &str,
    config: &Config,
    traces: &mut Vec<MatchTrace>,
) {
    let Some(word) = single_bare_literal(node) else { return };
    let min_score = config.options.fuzzy_search_min_score;

    if let Some(snippet) = table.property(context) {
        if let Some((keyword, matched_score)) =
            find_best_match_scored(&word, &snippet.keywords, min_score, |k| k.keyword.as_str())
        {
            if let Some(groups) = snippet.value.get(keyword.index).cloned() {
                traces.push(MatchTrace {
                    input: word,
                    matched: Some(keyword.keyword.clone()),
                    score: matched_score,
                    outcome: MatchOutcome::Keyword,
                });
                node.value = groups;
                return;
            }
        }
    }

    if let Some((keyword, matched_score)) =
        find_best_match_scored(&word, &config.options.keywords, min_score, |k| k.as_str())
    {
        traces.push(MatchTrace {
            input: word,
            matched: Some(keyword.clone()),
            score: matched_score,
            outcome: MatchOutcome::Keyword,
        });
        node.value = vec![ValueGroup::single(Value::Literal(keyword.clone()))];
    } else {
        traces.push(MatchTrace { input: word, matched: None, score: 0.0, outcome: MatchOutcome::Unmatched });
    }
}

fn resolve_keyword(word: &str, snippet: &PropertySnippet, config: &Config) -> Option<Vec<ValueGroup>> {
    let min_score = config.options.fuzzy_search_min_score;
    find_best_match_scored(word, &snippet.keywords, min_score, |k| k.keyword.as_str())
        .and_then(|(keyword, _)| snippet.value.get(keyword.index).cloned())
}

fn global_keyword(word: &str, config: &Config) -> Option<String> {
    let min_score = config.options.fuzzy_search_min_score;
    find_best_match_scored(word, &config.options.keywords, min_score, |k| k.as_str())
        .map(|(keyword, _)| keyword.clone())
}

fn single_bare_literal(node: &PropertyNode) -> Option<String> {
    match node.value.as_slice() {
        [group] => match group.items.as_slice() {
            [Value::Literal(text)] => Some(text.clone()),
            _ => None,
        },
        _ => None,
    }
}

/// Numeric-unit inference over a node's resolved value.
///
/// Explicit units only go through alias substitution (`p` → `%`); unitless
/// properties and zero values never receive a unit; everything else gets the
/// configured integer or float default. Running this twice is a no-op.
pub(crate) fn resolve_numeric_value(node: &mut PropertyNode, config: &Config) {
    let property = node.name.as_deref().or(config.context.as_deref()).unwrap_or("");
    let unitless = config.options.unitless.iter().any(|p| p == property);
    for group in &mut node.value {
        infer_units(group, unitless, &config.options);
    }
}

fn infer_units(group: &mut ValueGroup, unitless: bool, options: &StylesheetOptions) {
    for item in &mut group.items {
        match item {
            Value::Number { value, unit } => match unit {
                Some(existing) => {
                    if let Some(full) = options.unit_aliases.get(existing.as_str()) {
                        *existing = full.clone();
                    }
                }
                None if !unitless && *value != 0.0 => {
                    let default = if value.fract() == 0.0 { &options.int_unit } else { &options.float_unit };
                    *unit = Some(default.clone());
                }
                None => {}
            },
            Value::FunctionCall { args, .. } => {
                for arg in args {
                    infer_units(arg, unitless, options);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::parser::{parse_abbreviation, parse_value_only};

    fn table(items: &[(&str, &str)]) -> SnippetTable {
        SnippetTable::build(items.iter().map(|(k, v)| (k.to_string(), v.to_string())))
    }

    fn resolve_str(abbr: &str, items: &[(&str, &str)], config: &Config) -> (PropertyNode, Resolution) {
        let mut root =
            if config.context.is_some() { parse_value_only(abbr) } else { parse_abbreviation(abbr) };
        let resolution = resolve_tree(&mut root, &table(items), config);
        (root, resolution)
    }

    fn value_text(node: &PropertyNode) -> String {
        node.value.iter().map(|g| g.to_string()).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn property_shorthand_with_numeric_value() {
        let dict = [("p", "position"), ("pos-a", "position:absolute")];
        let (root, _) = resolve_str("p10", &dict, &Config::default());
        let node = &root.children[0];
        assert_eq!(node.name.as_deref(), Some("position"));
        assert_eq!(value_text(node), "10px");
    }

    #[test]
    fn remainder_resolves_against_keyword_aliases() {
        let dict = [("pos", "position:relative|absolute|fixed|static")];
        let (root, _) = resolve_str("poas", &dict, &Config::default());
        let node = &root.children[0];
        assert_eq!(node.name.as_deref(), Some("position"));
        assert_eq!(value_text(node), "absolute");
    }

    #[test]
    fn nested_specialization_feeds_general_aliases() {
        let dict = [("pos", "position:relative"), ("pos-a", "position:absolute")];
        let (root, _) = resolve_str("poa", &dict, &Config::default());
        let node = &root.children[0];
        assert_eq!(node.name.as_deref(), Some("position"));
        assert_eq!(value_text(node), "absolute");
    }

    #[test]
    fn mixed_case_input_still_reaches_keyword_aliases() {
        let dict = [("pos", "position:relative|absolute|fixed|static")];
        let (root, _) = resolve_str("Poas", &dict, &Config::default());
        let node = &root.children[0];
        assert_eq!(node.name.as_deref(), Some("position"));
        assert_eq!(value_text(node), "absolute");
    }

    #[test]
    fn nameless_segments_still_infer_units() {
        let (root, _) = resolve_str("10", &[], &Config::default());
        let node = &root.children[0];
        assert!(node.name.is_none());
        assert_eq!(value_text(node), "10px");
    }

    #[test]
    fn unmatched_node_passes_through_with_units() {
        let dict = [("p", "padding")];
        let (root, resolution) = resolve_str("zz9", &dict, &Config::default());
        let node = &root.children[0];
        assert_eq!(node.name.as_deref(), Some("zz"));
        assert_eq!(value_text(node), "9px");
        assert_eq!(resolution.traces[0].outcome, MatchOutcome::Unmatched);
    }

    #[test]
    fn raw_snippet_clears_name_and_substitutes_text() {
        let dict = [("@i", "@import url(${1});")];
        let (root, resolution) = resolve_str("@i", &dict, &Config::default());
        let node = &root.children[0];
        assert!(node.name.is_none());
        assert_eq!(node.value[0].items, vec![Value::Literal("@import url(${1});".to_string())]);
        assert_eq!(resolution.traces[0].outcome, MatchOutcome::Snippet);
    }

    #[test]
    fn missing_value_uses_field_wrapped_default() {
        let dict = [("fl", "float:left|right|none")];
        let (root, resolution) = resolve_str("fl", &dict, &Config::default());
        let node = &root.children[0];
        assert_eq!(node.value[0].items, vec![Value::Field { index: 1, name: "left".to_string() }]);
        assert_eq!(resolution.next_field, 2);
    }

    #[test]
    fn default_with_fields_is_used_verbatim() {
        let dict = [("bd", "border:${1:1px} ${2:solid} ${3:black}")];
        let (root, resolution) = resolve_str("bd", &dict, &Config::default());
        let node = &root.children[0];
        assert_eq!(node.value.len(), 3);
        assert_eq!(node.value[0].items, vec![Value::Field { index: 1, name: "1px".to_string() }]);
        // Pre-numbered fields do not consume the counter.
        assert_eq!(resolution.next_field, 1);
    }

    #[test]
    fn explicit_bare_literal_resolves_snippet_keywords_first() {
        let dict = [("d", "display:block|none|flex")];
        let mut root = PropertyNode::root();
        root.children.push(PropertyNode {
            name: Some("d".to_string()),
            value: vec![ValueGroup::single(Value::Literal("n".to_string()))],
            important: false,
            children: Vec::new(),
        });
        resolve_tree(&mut root, &table(&dict), &Config::default());
        assert_eq!(value_text(&root.children[0]), "none");
    }

    #[test]
    fn explicit_bare_literal_falls_back_to_global_keywords() {
        let dict = [("w", "width")];
        let mut root = PropertyNode::root();
        root.children.push(PropertyNode {
            name: Some("w".to_string()),
            value: vec![ValueGroup::single(Value::Literal("au".to_string()))],
            important: false,
            children: Vec::new(),
        });
        resolve_tree(&mut root, &table(&dict), &Config::default());
        assert_eq!(root.children[0].name.as_deref(), Some("width"));
        assert_eq!(value_text(&root.children[0]), "auto");
    }

    #[test]
    fn context_skips_property_matching() {
        let dict = [("pos", "position:relative|absolute|fixed|static")];
        let config = Config { context: Some("position".to_string()), ..Config::default() };
        let (root, resolution) = resolve_str("a", &dict, &config);
        let node = &root.children[0];
        assert!(node.name.is_none());
        assert_eq!(value_text(node), "absolute");
        assert_eq!(resolution.traces[0].outcome, MatchOutcome::Keyword);
    }

    #[test]
    fn context_without_snippet_uses_global_keywords() {
        let config = Config { context: Some("width".to_string()), ..Config::default() };
        let (root, _) = resolve_str("au", &[], &config);
        assert_eq!(value_text(&root.children[0]), "auto");
    }

    #[test]
    fn unit_aliases_expand_and_zero_stays_bare() {
        let dict = [("p", "padding"), ("m", "margin")];
        let config = Config::default();

        let (root, _) = resolve_str("p10e", &dict, &config);
        assert_eq!(value_text(&root.children[0]), "10em");

        let (root, _) = resolve_str("m0", &dict, &config);
        assert_eq!(value_text(&root.children[0]), "0");
    }

    #[test]
    fn float_values_take_the_float_unit() {
        let dict = [("fz", "font-size")];
        let (root, _) = resolve_str("fz1.5", &dict, &Config::default());
        assert_eq!(value_text(&root.children[0]), "1.5em");
    }

    #[test]
    fn unitless_properties_never_gain_units() {
        let dict = [("op", "opacity"), ("zi", "z-index")];
        let config = Config::default();
        let (root, _) = resolve_str("op5", &dict, &config);
        assert_eq!(value_text(&root.children[0]), "5");
        let (root, _) = resolve_str("zi100", &dict, &config);
        assert_eq!(value_text(&root.children[0]), "100");
    }

    #[test]
    fn unit_inference_is_idempotent() {
        let dict = [("p", "padding")];
        let config = Config::default();
        let (mut root, _) = resolve_str("p10-2.5-0-4p", &dict, &config);
        let before = root.children[0].clone();
        resolve_numeric_value(&mut root.children[0], &config);
        assert_eq!(root.children[0], before);
        assert_eq!(value_text(&root.children[0]), "10px 2.5em 0 4%");
    }
}
