//! Tab-stop field wrapping.
//!
//! When a snippet default is substituted without an explicit value, every
//! leaf token becomes an editor field so the user can tab through and replace
//! each part. Indices are assigned depth-first in visual order from a counter
//! owned by the resolution pass, so numbering stays globally consecutive
//! across an entire expansion.

use crate::{Value, ValueGroup, format_number};

/// Wrap every leaf token of `group` in a numbered field.
///
/// Function calls are flattened: the name becomes a field, followed by
/// literal `(`, the wrapped arguments joined by literal `, `, and a literal
/// `)`. Existing fields are re-indexed but keep their placeholder text.
pub(crate) fn wrap_with_fields(group: &ValueGroup, counter: &mut u32) -> ValueGroup {
    let mut items = Vec::new();
    for token in &group.items {
        wrap_token(token, counter, &mut items);
    }
    ValueGroup { items }
}

fn wrap_token(token: &Value, counter: &mut u32, out: &mut Vec<Value>) {
    match token {
        Value::FunctionCall { name, args } => {
            out.push(next_field(counter, name.clone()));
            out.push(Value::Literal("(".to_string()));
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push(Value::Literal(", ".to_string()));
                }
                out.extend(wrap_with_fields(arg, counter).items);
            }
            out.push(Value::Literal(")".to_string()));
        }
        Value::Field { name, .. } => out.push(next_field(counter, name.clone())),
        Value::Number { value, unit } => {
            let mut text = format_number(*value);
            if let Some(unit) = unit {
                text.push_str(unit);
            }
            out.push(next_field(counter, text));
        }
        leaf => out.push(next_field(counter, leaf.to_string())),
    }
}

fn next_field(counter: &mut u32, name: String) -> Value {
    let index = *counter;
    *counter += 1;
    Value::Field { index, name }
}

/// True when the group already carries a field anywhere, including inside
/// function-call arguments.
pub(crate) fn has_field(group: &ValueGroup) -> bool {
    group.items.iter().any(|token| match token {
        Value::Field { .. } => true,
        Value::FunctionCall { args, .. } => args.iter().any(has_field),
        _ => false,
    })
}
