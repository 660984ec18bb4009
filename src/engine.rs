//! Abbreviation resolution engine.
//!
//! This module is the *public entry point* for the resolution machinery. The
//! pieces live in focused submodules under `src/engine/` while keeping stable
//! paths (for example `crate::engine::SnippetTable` and `crate::engine::walk`).
//!
//! ## How the parts work together
//!
//! Expanding an abbreviation is a pipeline:
//!
//! ```text
//! snippets (raw map) ──┐
//!                      │  SnippetTable::build          (snippets.rs)
//!                      └───────────────┬──────────────
//!                                      │
//! abbreviation ── parse_abbreviation ──┼─ node tree    (parser.rs)
//!                                      v
//!                          resolve_tree (resolve.rs)
//!                            - fuzzy-match node names  (score.rs)
//!                            - substitute keywords / defaults
//!                            - wrap defaults in fields (fields.rs)
//!                            - infer numeric units
//!                                      │
//!                                      v
//!                          render (output.rs, a walk.rs visitor)
//! ```
//!
//! ## Responsibilities by module
//!
//! - `score.rs`: pure string-similarity scoring, the unmatched-remainder
//!   helper, and the generic best-match lookup.
//! - `snippets.rs`: builds the ordered, nested dictionary from raw key/value
//!   pairs.
//! - `parser.rs`: tokenizes typed abbreviations and snippet value text into
//!   the node/value model.
//! - `resolve.rs`: the per-node decision procedure plus numeric-unit
//!   inference.
//! - `fields.rs`: converts literal value trees into tab-stop fields.
//! - `walk.rs`: the generic ordered tree walk with explicit continuation.
//! - `output.rs`: the CSS text renderer, implemented as a `walk` visitor.
//!
//! ## Debugging
//!
//! Set `STYLET_DEBUG_RESOLVE=1` to print per-node match decisions.

#[path = "engine/fields.rs"]
pub(crate) mod fields;
#[path = "engine/output.rs"]
pub(crate) mod output;
#[path = "engine/parser.rs"]
pub(crate) mod parser;
#[path = "engine/resolve.rs"]
pub(crate) mod resolve;
#[path = "engine/score.rs"]
pub(crate) mod score;
#[path = "engine/snippets.rs"]
pub(crate) mod snippets;
#[path = "engine/walk.rs"]
pub(crate) mod walk;

pub use output::FieldSyntax;
pub use score::{find_best_match, score};
pub use snippets::{PropertySnippet, RawSnippet, Snippet, SnippetTable};
pub use walk::{ChildNodes, Visit, WalkState, descend, walk};
