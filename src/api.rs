//! Public expansion API.
//!
//! [`expand`] covers the common case with the built-in dictionary and
//! default options. [`expand_with`] takes a [`Config`]; [`resolve_with`]
//! additionally accepts a pre-built [`SnippetTable`] so callers expanding
//! many abbreviations against one dictionary can skip rebuilding it.
//! [`expand_verbose_with`] reports timings and per-node match traces for
//! diagnostics.

use crate::dictionary::CSS_SNIPPETS;
use crate::engine::output::render;
use crate::engine::parser::{parse_abbreviation, parse_value_only};
use crate::engine::resolve::resolve_tree;
use crate::engine::{FieldSyntax, SnippetTable};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::{Duration, Instant};
use thiserror::Error;

static DEFAULT_SNIPPETS: Lazy<SnippetTable> = Lazy::new(|| {
    SnippetTable::build(CSS_SNIPPETS.iter().map(|(k, v)| (k.to_string(), v.to_string())))
});

/// Expansion configuration. Deserializable from JSON with camelCase keys;
/// every field is optional and falls back to its default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Enclosing property name. When set, input is treated as a bare value
    /// (`"a"` inside a `position:` declaration) and property matching is
    /// skipped.
    pub context: Option<String>,
    pub options: StylesheetOptions,
    /// User snippets, merged over the built-in dictionary. Same-key entries
    /// shadow built-ins.
    pub snippets: BTreeMap<String, String>,
}

/// Tunable resolution options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StylesheetOptions {
    /// Unit attached to whole numbers that need one.
    pub int_unit: String,
    /// Unit attached to fractional numbers that need one.
    pub float_unit: String,
    /// Single-letter unit shorthands typed after a number (`10p` → `10%`).
    pub unit_aliases: BTreeMap<String, String>,
    /// Properties whose numeric values never receive a unit.
    pub unitless: Vec<String>,
    /// Scores below this threshold count as no match.
    pub fuzzy_search_min_score: f64,
    /// Global value keywords tried when a snippet has no matching alias.
    pub keywords: Vec<String>,
    pub field_syntax: FieldSyntax,
}

impl Default for StylesheetOptions {
    fn default() -> Self {
        let unit_aliases = [("e", "em"), ("p", "%"), ("x", "ex"), ("r", "rem")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let unitless = [
            "z-index",
            "line-height",
            "opacity",
            "font-weight",
            "zoom",
            "flex",
            "flex-grow",
            "flex-shrink",
            "order",
            "orphans",
            "widows",
            "columns",
        ];
        let keywords = ["auto", "inherit", "unset", "none", "initial", "revert"];
        StylesheetOptions {
            int_unit: "px".to_string(),
            float_unit: "em".to_string(),
            unit_aliases,
            unitless: unitless.iter().map(|s| s.to_string()).collect(),
            fuzzy_search_min_score: 0.0,
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            field_syntax: FieldSyntax::Tabstop,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Build the snippet table for this configuration: the built-in
    /// dictionary with user snippets merged on top.
    pub fn snippet_table(&self) -> SnippetTable {
        if self.snippets.is_empty() {
            return DEFAULT_SNIPPETS.clone();
        }
        SnippetTable::build(
            CSS_SNIPPETS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .chain(self.snippets.iter().map(|(k, v)| (k.clone(), v.clone()))),
        )
    }
}

/// How one typed token was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Matched a property entry.
    Property,
    /// Matched a raw snippet.
    Snippet,
    /// Matched a keyword alias (context mode).
    Keyword,
    /// Nothing matched; the token passed through unchanged.
    Unmatched,
}

/// One resolution decision, reported per typed token.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchTrace {
    /// The token as typed.
    pub input: String,
    /// The winning dictionary key or keyword, if any.
    pub matched: Option<String>,
    pub score: f64,
    pub outcome: MatchOutcome,
}

/// Expansion result with diagnostics attached.
#[derive(Debug, Clone)]
pub struct ExpandResult {
    pub text: String,
    pub elapsed: Duration,
    pub details: ExpandDetails,
}

/// Phase timings and per-token match traces.
#[derive(Debug, Clone)]
pub struct ExpandDetails {
    pub parse: Duration,
    pub resolve: Duration,
    pub render: Duration,
    pub traces: Vec<MatchTrace>,
}

/// Expand an abbreviation with the built-in dictionary and default options.
pub fn expand(abbreviation: &str) -> String {
    expand_with(abbreviation, &Config::default())
}

/// Expand an abbreviation with an explicit configuration.
pub fn expand_with(abbreviation: &str, config: &Config) -> String {
    resolve_with(abbreviation, &config.snippet_table(), config)
}

/// Expand against a pre-built snippet table. The table is read-only, so one
/// table can serve many calls (including concurrent ones).
pub fn resolve_with(abbreviation: &str, table: &SnippetTable, config: &Config) -> String {
    let mut root = parse_for(abbreviation, config);
    let resolution = resolve_tree(&mut root, table, config);
    render(&root, config, resolution.next_field)
}

/// Expand and report timings plus per-token resolution traces.
pub fn expand_verbose_with(abbreviation: &str, config: &Config) -> ExpandResult {
    let table = config.snippet_table();
    let start = Instant::now();

    let parse_start = Instant::now();
    let mut root = parse_for(abbreviation, config);
    let parse = parse_start.elapsed();

    let resolve_start = Instant::now();
    let resolution = resolve_tree(&mut root, &table, config);
    let resolve = resolve_start.elapsed();

    let render_start = Instant::now();
    let text = render(&root, config, resolution.next_field);
    let render_time = render_start.elapsed();

    ExpandResult {
        text,
        elapsed: start.elapsed(),
        details: ExpandDetails { parse, resolve, render: render_time, traces: resolution.traces },
    }
}

fn parse_for(abbreviation: &str, config: &Config) -> crate::PropertyNode {
    if config.context.is_some() {
        parse_value_only(abbreviation)
    } else {
        parse_abbreviation(abbreviation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_shorthand_with_inferred_units() {
        assert_eq!(expand("p10"), "padding: 10px;");
        assert_eq!(expand("w100p"), "width: 100%;");
        assert_eq!(expand("fz1.5"), "font-size: 1.5em;");
        assert_eq!(expand("m0"), "margin: 0;");
    }

    #[test]
    fn expands_fuzzy_keys_and_keyword_remainders() {
        assert_eq!(expand("poas"), "position: absolute;");
        assert_eq!(expand("tdn"), "text-decoration: none;");
    }

    #[test]
    fn expands_multi_segment_abbreviations() {
        assert_eq!(expand("p10+m0"), "padding: 10px;\nmargin: 0;");
    }

    #[test]
    fn keeps_explicit_colors_and_importance() {
        assert_eq!(expand("c#fff"), "color: #fff;");
        assert_eq!(expand("p10!"), "padding: 10px !important;");
    }

    #[test]
    fn defaults_become_tab_stop_fields() {
        assert_eq!(expand("bd"), "border: ${1:1px} ${2:solid} ${3:black};");
        assert_eq!(expand("fl"), "float: ${1:left};");
    }

    #[test]
    fn function_call_defaults_wrap_without_stray_spaces() {
        let mut config = Config::default();
        config
            .snippets
            .insert("bgg".to_string(), "background:linear-gradient(red, blue)".to_string());
        assert_eq!(
            expand_with("bgg", &config),
            "background: ${1:linear-gradient}(${2:red}, ${3:blue});"
        );
    }

    #[test]
    fn empty_input_expands_to_nothing() {
        assert_eq!(expand(""), "");
    }

    #[test]
    fn context_resolves_bare_values() {
        let config = Config { context: Some("position".to_string()), ..Config::default() };
        assert_eq!(expand_with("a", &config), "absolute");
        assert_eq!(expand_with("f", &config), "fixed");
    }

    #[test]
    fn user_snippets_shadow_builtins() {
        let mut config = Config::default();
        config.snippets.insert("p".to_string(), "page-break-after".to_string());
        assert_eq!(expand_with("p10", &config), "page-break-after: 10px;");
        // Built-ins outside the shadowed key still resolve.
        assert_eq!(expand_with("m0", &config), "margin: 0;");
    }

    #[test]
    fn min_score_gates_weak_matches() {
        let mut config = Config::default();
        config.options.fuzzy_search_min_score = 0.9;
        assert_eq!(expand_with("poas", &config), "poas: ${1};");
    }

    #[test]
    fn plain_field_syntax_strips_markers() {
        let mut config = Config::default();
        config.options.field_syntax = FieldSyntax::Plain;
        assert_eq!(expand_with("bd", &config), "border: 1px solid black;");
    }

    #[test]
    fn config_deserializes_from_camel_case_json() {
        let config = Config::from_json(
            r#"{
                "context": "position",
                "options": { "intUnit": "rem", "fuzzySearchMinScore": 0.3 },
                "snippets": { "gd": "grid" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.context.as_deref(), Some("position"));
        assert_eq!(config.options.int_unit, "rem");
        assert_eq!(config.options.fuzzy_search_min_score, 0.3);
        // Unspecified options keep their defaults.
        assert_eq!(config.options.float_unit, "em");
        assert_eq!(config.snippets["gd"], "grid");
    }

    #[test]
    fn malformed_config_reports_json_error() {
        match Config::from_json("{ not json") {
            Err(ConfigError::Json(_)) => {}
            other => panic!("expected a JSON error, got {other:?}"),
        }
    }

    #[test]
    fn verbose_expansion_reports_traces() {
        let result = expand_verbose_with("p10+qq", &Config::default());
        assert_eq!(result.text, "padding: 10px;\nqq: ${1};");
        assert_eq!(result.details.traces.len(), 2);
        assert_eq!(result.details.traces[0].outcome, MatchOutcome::Property);
        assert_eq!(result.details.traces[0].matched.as_deref(), Some("p"));
        assert_eq!(result.details.traces[1].outcome, MatchOutcome::Unmatched);
    }
}
