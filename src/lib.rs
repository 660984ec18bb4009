#[macro_use]
mod macros;
mod api;
mod dictionary;
mod engine;

pub use api::{
    Config, ConfigError, ExpandDetails, ExpandResult, MatchOutcome, MatchTrace, StylesheetOptions, expand,
    expand_verbose_with, expand_with, resolve_with,
};
pub use engine::{
    ChildNodes, FieldSyntax, PropertySnippet, RawSnippet, Snippet, SnippetTable, Visit, WalkState, descend,
    find_best_match, score, walk,
};

use std::fmt;

// --- Core data model ---------------------------------------------------------

/// Quote style recorded for string tokens so output can reproduce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
}

/// A typed leaf value inside a property declaration.
///
/// Tokens are immutable once parsed, with one exception: the resolver rewrites
/// `Number` units in place during unit inference.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A bare keyword or any text the tokenizer could not classify further.
    Literal(String),
    /// A numeric value with an optional unit (`10`, `1.5em`, `-20px`).
    Number { value: f64, unit: Option<String> },
    /// A color kept as raw text (`#fff`, `#1a2b3c`).
    Color { raw: String },
    /// A quoted string.
    Str { value: String, quote: Quote },
    /// A function call; each argument is one value group (`lg(#fff, #000)`).
    FunctionCall { name: String, args: Vec<ValueGroup> },
    /// A tab-stop placeholder the editor can jump to (`${1:10px}`).
    Field { index: u32, name: String },
}

/// An ordered sequence of tokens forming one value alternative.
///
/// Groups are joined with spaces on output: `p10-20` produces two groups that
/// render as `10px 20px`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueGroup {
    pub items: Vec<Value>,
}

impl ValueGroup {
    pub fn single(item: Value) -> Self {
        ValueGroup { items: vec![item] }
    }
}

/// One abbreviation segment: an optional property name plus its value groups.
///
/// Created by the abbreviation parser, mutated exactly once by the resolver,
/// and read-only afterwards (the tree walker never mutates).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyNode {
    pub name: Option<String>,
    pub value: Vec<ValueGroup>,
    /// Set when the abbreviation carried a `!` marker (`!important`).
    pub important: bool,
    pub children: Vec<PropertyNode>,
}

impl PropertyNode {
    /// A nameless container node holding top-level segments as children.
    pub fn root() -> Self {
        PropertyNode::default()
    }
}

impl ChildNodes for PropertyNode {
    fn child_nodes(&self) -> &[Self] {
        &self.children
    }
}

/// A lightweight alias referencing one alternative in a property snippet's
/// value list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRef {
    pub keyword: String,
    pub index: usize,
}

/// Format a float the way stylesheets write numbers: no trailing `.0` on
/// whole values.
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 { format!("{}", value as i64) } else { format!("{}", value) }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Literal(text) => f.write_str(text),
            Value::Number { value, unit } => {
                write!(f, "{}{}", format_number(*value), unit.as_deref().unwrap_or(""))
            }
            Value::Color { raw } => f.write_str(raw),
            Value::Str { value, quote } => {
                let q = match quote {
                    Quote::Single => '\'',
                    Quote::Double => '"',
                };
                write!(f, "{q}{value}{q}")
            }
            Value::FunctionCall { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Value::Field { name, .. } => f.write_str(name),
        }
    }
}

impl fmt::Display for ValueGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_display_drops_trailing_zero() {
        let whole = Value::Number { value: 10.0, unit: Some("px".to_string()) };
        let frac = Value::Number { value: 1.5, unit: Some("em".to_string()) };
        assert_eq!(whole.to_string(), "10px");
        assert_eq!(frac.to_string(), "1.5em");
    }

    #[test]
    fn function_call_display_joins_args() {
        let call = Value::FunctionCall {
            name: "lg".to_string(),
            args: vec![
                ValueGroup::single(Value::Color { raw: "#fff".to_string() }),
                ValueGroup::single(Value::Color { raw: "#000".to_string() }),
            ],
        };
        assert_eq!(call.to_string(), "lg(#fff, #000)");
    }
}
