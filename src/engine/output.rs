//! CSS text rendering.
//!
//! The renderer is a [`walk`](super::walk) visitor that serializes each
//! resolved node as a `name: value;` declaration, one per line. Tab-stop
//! fields render either as `${n:placeholder}` markers or as plain placeholder
//! text, depending on the configured [`FieldSyntax`].

use super::walk::{self, Visit, WalkState};
use crate::{Config, PropertyNode, Value, ValueGroup};
use serde::{Deserialize, Serialize};

/// How tab-stop fields appear in the rendered output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSyntax {
    /// `${1:placeholder}` markers for editors with tab-stop support.
    #[default]
    Tabstop,
    /// Placeholder text only, with markers stripped.
    Plain,
}

/// Render a resolved tree to CSS text.
///
/// `next_field` continues the tab-stop numbering started during resolution;
/// it is consumed by declarations that end up with no value at all.
pub(crate) fn render(root: &PropertyNode, config: &Config, next_field: u32) -> String {
    let mut writer = CssWriter { syntax: config.options.field_syntax };
    let mut state = WalkState::new(Scope { out: String::new(), next_field });
    walk::walk(root, &mut writer, &mut state);
    state.scope.out
}

struct Scope {
    out: String,
    next_field: u32,
}

struct CssWriter {
    syntax: FieldSyntax,
}

impl<'t> Visit<'t, PropertyNode, Scope> for CssWriter {
    fn visit(
        &mut self,
        node: &'t PropertyNode,
        _index: usize,
        _siblings: &'t [PropertyNode],
        state: &mut WalkState<'t, PropertyNode, Scope>,
    ) {
        if !state.scope.out.is_empty() {
            state.scope.out.push('\n');
        }
        self.write_node(node, &mut state.scope);
        walk::descend(node, self, state);
    }
}

impl CssWriter {
    fn write_node(&self, node: &PropertyNode, scope: &mut Scope) {
        match &node.name {
            Some(name) => {
                scope.out.push_str(name);
                scope.out.push_str(": ");
                if node.value.is_empty() {
                    // Leave a caret position where the value would go.
                    if self.syntax == FieldSyntax::Tabstop {
                        let index = scope.next_field;
                        scope.next_field += 1;
                        scope.out.push_str(&format!("${{{index}}}"));
                    }
                } else {
                    self.write_groups(&node.value, &mut scope.out);
                }
                if node.important {
                    scope.out.push_str(" !important");
                }
                scope.out.push(';');
            }
            None => {
                // Raw snippets and bare context values are emitted without a
                // property wrapper; their text may carry inline `${n}` markers.
                let start = scope.out.len();
                self.write_groups(&node.value, &mut scope.out);
                if self.syntax == FieldSyntax::Plain {
                    let stripped = strip_field_markers(&scope.out[start..]);
                    scope.out.truncate(start);
                    scope.out.push_str(&stripped);
                }
            }
        }
    }

    fn write_groups(&self, groups: &[ValueGroup], out: &mut String) {
        for (i, group) in groups.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            self.write_group(group, out);
        }
    }

    fn write_group(&self, group: &ValueGroup, out: &mut String) {
        for (i, token) in group.items.iter().enumerate() {
            if i > 0 && needs_space(&group.items[i - 1], token) {
                out.push(' ');
            }
            self.write_token(token, out);
        }
    }

    fn write_token(&self, token: &Value, out: &mut String) {
        match token {
            Value::Field { index, name } => match self.syntax {
                FieldSyntax::Tabstop if name.is_empty() => out.push_str(&format!("${{{index}}}")),
                FieldSyntax::Tabstop => out.push_str(&format!("${{{index}:{name}}}")),
                FieldSyntax::Plain => out.push_str(name),
            },
            Value::FunctionCall { name, args } => {
                out.push_str(name);
                out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_group(arg, out);
                }
                out.push(')');
            }
            other => out.push_str(&other.to_string()),
        }
    }
}

/// Field-wrapped function calls carry their own punctuation literals; no
/// space is inserted around those.
fn needs_space(prev: &Value, current: &Value) -> bool {
    let open = matches!(prev, Value::Literal(t) if t == "(" || t == ", ");
    let close = matches!(current, Value::Literal(t) if t == "(" || t == ")" || t == ", ");
    !open && !close
}

pub(crate) fn strip_field_markers(text: &str) -> String {
    let marker = regex!(r"\$\{\d+(?::([^}]*))?\}");
    marker.replace_all(text, "$1").into_owned()
}
