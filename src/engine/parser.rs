//! Abbreviation and value-text tokenizer.
//!
//! Two inputs share one lexer:
//!
//! - typed abbreviations (`p10-20+c#fff!`): segments split on `+`, a name
//!   phase followed by dash-separated values;
//! - snippet value text (`1px solid ${1:black}`): whitespace-separated
//!   values where dashes stay inside keywords (`flex-start`).
//!
//! The tokenizer is garbage-tolerant: characters it cannot classify are
//! skipped so that resolution never fails on odd input, it just sees fewer
//! tokens.
//!
//! ```text
//! "p10-20"  ──▶ PropertyNode { name: "p",  value: [[10], [20]] }
//! "m-10"    ──▶ PropertyNode { name: "m",  value: [[-10]] }
//! "pos-a"   ──▶ PropertyNode { name: "pos-a", value: [] }
//! "bg-lg(red,blue)" ──▶ name: "bg", value: [[lg(red, blue)]]
//! ```

use crate::{PropertyNode, Quote, Value, ValueGroup};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Typed shorthand: identifiers are plain letter runs, dashes separate
    /// values.
    Abbreviation,
    /// Snippet dictionary text: identifiers may contain digits and dashes.
    Text,
}

/// Parse a typed abbreviation into a nameless root whose children are the
/// `+`-separated segments.
pub(crate) fn parse_abbreviation(input: &str) -> PropertyNode {
    let mut root = PropertyNode::root();
    for segment in input.split('+') {
        let segment = segment.trim();
        if !segment.is_empty() {
            root.children.push(parse_segment(segment));
        }
    }
    root
}

/// Parse an abbreviation typed as a bare value (used when a resolution
/// context names the enclosing property): one nameless child node.
pub(crate) fn parse_value_only(input: &str) -> PropertyNode {
    let mut root = PropertyNode::root();
    let (value, important) = parse_segment_values(input.trim());
    root.children.push(PropertyNode { name: None, value, important, children: Vec::new() });
    root
}

/// Parse snippet value text into whitespace-separated value groups.
pub(crate) fn parse_value_text(text: &str) -> Vec<ValueGroup> {
    let text = text.trim();
    let mut groups: Vec<ValueGroup> = Vec::new();
    let mut current = ValueGroup::default();
    let mut pos = 0;
    while pos < text.len() {
        let rest = &text[pos..];
        let ch = rest.chars().next().unwrap();
        if ch.is_whitespace() {
            if !current.items.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
            pos += ch.len_utf8();
            continue;
        }
        match lex_token(rest, Mode::Text) {
            Some((token, len)) => {
                current.items.push(token);
                pos += len;
            }
            None => pos += ch.len_utf8(),
        }
    }
    if !current.items.is_empty() {
        groups.push(current);
    }
    groups
}

fn parse_segment(text: &str) -> PropertyNode {
    // Name phase: letters, `@`, and dashes leading into more letters. A dash
    // before a digit starts a negative value instead (`m-10`).
    let bytes = text.as_bytes();
    let mut end = 0;
    while end < bytes.len() {
        let ch = bytes[end] as char;
        if ch.is_ascii_alphabetic() || ch == '@' {
            end += 1;
        } else if ch == '-' && bytes.get(end + 1).is_some_and(|&b| b.is_ascii_alphabetic()) {
            end += 1;
        } else {
            break;
        }
    }

    let mut value_start = end;
    let mut name_end = end;
    if text[end..].starts_with('(') {
        // `bg-lg(...)`: the trailing word is a function-call value, not part
        // of the property name.
        let split = text[..end].rfind('-').map(|i| i + 1).unwrap_or(0);
        value_start = split;
        name_end = split.saturating_sub(1);
    }

    let name = if name_end == 0 { None } else { Some(text[..name_end].to_string()) };
    let (value, important) = parse_segment_values(&text[value_start..]);
    PropertyNode { name, value, important, children: Vec::new() }
}

fn parse_segment_values(text: &str) -> (Vec<ValueGroup>, bool) {
    let mut groups: Vec<ValueGroup> = Vec::new();
    let mut important = false;
    let mut pos = 0;
    while pos < text.len() {
        let rest = &text[pos..];
        let ch = rest.chars().next().unwrap();
        if ch == '!' {
            important = true;
            pos += 1;
            continue;
        }
        if ch == '-' {
            let after = &rest[1..];
            if after.starts_with('-') {
                // `--` separates a negative number: `m10--20` is `10px -20px`.
                pos += 1;
                match lex_number(&text[pos..]) {
                    Some((token, len)) => {
                        groups.push(ValueGroup::single(token));
                        pos += len;
                    }
                    None => pos += 1,
                }
                continue;
            }
            if groups.is_empty() && after.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
                // Leading dash: the first value is negative (`m-10`).
                if let Some((token, len)) = lex_number(rest) {
                    groups.push(ValueGroup::single(token));
                    pos += len;
                    continue;
                }
            }
            // Plain separator between values.
            pos += 1;
            continue;
        }
        match lex_token(rest, Mode::Abbreviation) {
            Some((token, len)) => {
                groups.push(ValueGroup::single(token));
                pos += len;
            }
            None => pos += ch.len_utf8(),
        }
    }
    (groups, important)
}

fn lex_token(rest: &str, mode: Mode) -> Option<(Value, usize)> {
    if let Some(caps) = regex!(r"^\$\{(\d+)(?::([^}]*))?\}").captures(rest) {
        let index = caps[1].parse().unwrap_or(0);
        let name = caps.get(2).map_or(String::new(), |m| m.as_str().to_string());
        return Some((Value::Field { index, name }, caps[0].len()));
    }
    if let Some(m) = regex!(r"^#[0-9a-fA-F]+").find(rest) {
        return Some((Value::Color { raw: m.as_str().to_string() }, m.end()));
    }
    if let Some(caps) = regex!(r#"^"([^"]*)""#).captures(rest) {
        return Some((Value::Str { value: caps[1].to_string(), quote: Quote::Double }, caps[0].len()));
    }
    if let Some(caps) = regex!(r"^'([^']*)'").captures(rest) {
        return Some((Value::Str { value: caps[1].to_string(), quote: Quote::Single }, caps[0].len()));
    }
    if let Some((token, len)) = lex_number(rest) {
        return Some((token, len));
    }

    let ident_re = match mode {
        Mode::Abbreviation => regex!(r"^[a-zA-Z]+"),
        Mode::Text => regex!(r"^[a-zA-Z][a-zA-Z0-9-]*"),
    };
    let m = ident_re.find(rest)?;
    if rest[m.end()..].starts_with('(') {
        if let Some((args, consumed)) = lex_function_args(&rest[m.end()..], mode) {
            let call = Value::FunctionCall { name: m.as_str().to_string(), args };
            return Some((call, m.end() + consumed));
        }
    }
    Some((Value::Literal(m.as_str().to_string()), m.end()))
}

fn lex_number(rest: &str) -> Option<(Value, usize)> {
    let caps = regex!(r"^(-?(?:\d*\.)?\d+)([a-zA-Z%]*)").captures(rest)?;
    let value: f64 = caps[1].parse().ok()?;
    let unit = caps.get(2).filter(|m| !m.as_str().is_empty()).map(|m| m.as_str().to_string());
    Some((Value::Number { value, unit }, caps[0].len()))
}

/// Consume a balanced `(...)` argument list; arguments split on top-level
/// commas, each argument forming one value group.
fn lex_function_args(rest: &str, mode: Mode) -> Option<(Vec<ValueGroup>, usize)> {
    let mut depth = 0usize;
    let mut close = None;
    for (i, ch) in rest.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }
    let close = close?;
    let inner = &rest[1..close];
    let args = split_top_level_commas(inner).into_iter().map(|arg| lex_group(arg.trim(), mode)).collect();
    Some((args, close + 1))
}

fn split_top_level_commas(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                pieces.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(&text[start..]);
    pieces.into_iter().filter(|p| !p.trim().is_empty()).collect()
}

/// Tokenize one function argument into a single group.
fn lex_group(text: &str, mode: Mode) -> ValueGroup {
    let mut group = ValueGroup::default();
    let mut pos = 0;
    while pos < text.len() {
        let rest = &text[pos..];
        let ch = rest.chars().next().unwrap();
        if ch.is_whitespace() {
            pos += ch.len_utf8();
            continue;
        }
        match lex_token(rest, mode) {
            Some((token, len)) => {
                group.items.push(token);
                pos += len;
            }
            None => pos += ch.len_utf8(),
        }
    }
    group
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_number(group: &ValueGroup) -> (f64, Option<&str>) {
        match group.items.as_slice() {
            [Value::Number { value, unit }] => (*value, unit.as_deref()),
            other => panic!("expected one number, got {other:?}"),
        }
    }

    #[test]
    fn splits_name_and_numeric_values() {
        let root = parse_abbreviation("p10");
        let node = &root.children[0];
        assert_eq!(node.name.as_deref(), Some("p"));
        assert_eq!(node.value.len(), 1);
        assert_eq!(single_number(&node.value[0]), (10.0, None));
    }

    #[test]
    fn dash_separates_values_once_started() {
        let root = parse_abbreviation("p10-20");
        let node = &root.children[0];
        assert_eq!(single_number(&node.value[0]), (10.0, None));
        assert_eq!(single_number(&node.value[1]), (20.0, None));
    }

    #[test]
    fn leading_dash_means_negative() {
        let root = parse_abbreviation("m-10");
        let node = &root.children[0];
        assert_eq!(node.name.as_deref(), Some("m"));
        assert_eq!(single_number(&node.value[0]), (-10.0, None));
    }

    #[test]
    fn double_dash_separates_a_negative_value() {
        let root = parse_abbreviation("m10--20");
        let node = &root.children[0];
        assert_eq!(single_number(&node.value[0]), (10.0, None));
        assert_eq!(single_number(&node.value[1]), (-20.0, None));
    }

    #[test]
    fn keeps_dashed_names_without_values_intact() {
        let root = parse_abbreviation("pos-a");
        let node = &root.children[0];
        assert_eq!(node.name.as_deref(), Some("pos-a"));
        assert!(node.value.is_empty());
    }

    #[test]
    fn parses_colors_units_and_importance() {
        let root = parse_abbreviation("c#fff+w100px!");
        let color = &root.children[0];
        assert_eq!(color.name.as_deref(), Some("c"));
        assert_eq!(color.value[0].items, vec![Value::Color { raw: "#fff".to_string() }]);

        let width = &root.children[1];
        assert_eq!(width.name.as_deref(), Some("w"));
        assert_eq!(single_number(&width.value[0]), (100.0, Some("px")));
        assert!(width.important);
    }

    #[test]
    fn plus_splits_segments() {
        let root = parse_abbreviation("p10+m0+");
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[1].name.as_deref(), Some("m"));
    }

    #[test]
    fn function_value_is_split_off_the_name() {
        let root = parse_abbreviation("bg-lg(#fff,#000)");
        let node = &root.children[0];
        assert_eq!(node.name.as_deref(), Some("bg"));
        match &node.value[0].items[0] {
            Value::FunctionCall { name, args } => {
                assert_eq!(name, "lg");
                assert_eq!(args.len(), 2);
            }
            other => panic!("expected function call, got {other:?}"),
        }
    }

    #[test]
    fn value_text_splits_groups_on_whitespace() {
        let groups = parse_value_text("1px solid #000");
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[1].items, vec![Value::Literal("solid".to_string())]);
    }

    #[test]
    fn value_text_keeps_dashed_keywords_whole() {
        let groups = parse_value_text("flex-start");
        assert_eq!(groups[0].items, vec![Value::Literal("flex-start".to_string())]);
    }

    #[test]
    fn value_text_parses_fields_and_functions() {
        let groups = parse_value_text("${1:1px} url(${2}) linear-gradient(to right, red)");
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].items, vec![Value::Field { index: 1, name: "1px".to_string() }]);
        match &groups[2].items[0] {
            Value::FunctionCall { name, args } => {
                assert_eq!(name, "linear-gradient");
                assert_eq!(args[0].items.len(), 2);
                assert_eq!(args[1].items, vec![Value::Literal("red".to_string())]);
            }
            other => panic!("expected function call, got {other:?}"),
        }
    }

    #[test]
    fn bare_value_parse_for_context_mode() {
        let root = parse_value_only("a");
        let node = &root.children[0];
        assert!(node.name.is_none());
        assert_eq!(node.value[0].items, vec![Value::Literal("a".to_string())]);
    }
}
