//! Built-in snippet dictionary.
//!
//! Keys are short mnemonic abbreviations; values are either a property name,
//! `property:alt|alt|...` alternatives (the first doubles as the default), or
//! raw output text for at-rule blocks. User-supplied snippets are merged on
//! top of this table and shadow entries with the same key.

pub(crate) const CSS_SNIPPETS: &[(&str, &str)] = &[
    // Box model
    ("p", "padding"),
    ("pt", "padding-top"),
    ("pr", "padding-right"),
    ("pb", "padding-bottom"),
    ("pl", "padding-left"),
    ("m", "margin"),
    ("mt", "margin-top"),
    ("mr", "margin-right"),
    ("mb", "margin-bottom"),
    ("ml", "margin-left"),
    ("w", "width"),
    ("h", "height"),
    ("maw", "max-width"),
    ("mah", "max-height"),
    ("miw", "min-width"),
    ("mih", "min-height"),
    ("bxz", "box-sizing:border-box|content-box"),
    // Positioning
    ("pos", "position:relative|absolute|fixed|static|sticky"),
    ("t", "top"),
    ("r", "right"),
    ("b", "bottom"),
    ("l", "left"),
    ("z", "z-index"),
    ("fl", "float:left|right|none"),
    ("cl", "clear:both|left|right|none"),
    // Display and visibility
    ("d", "display:block|none|flex|grid|inline|inline-block|inline-flex|table"),
    ("v", "visibility:hidden|visible|collapse"),
    ("ov", "overflow:hidden|visible|scroll|auto"),
    ("ovx", "overflow-x:hidden|visible|scroll|auto"),
    ("ovy", "overflow-y:hidden|visible|scroll|auto"),
    ("op", "opacity"),
    // Flexbox
    ("fx", "flex"),
    ("fxb", "flex-basis"),
    ("fxd", "flex-direction:row|row-reverse|column|column-reverse"),
    ("fxg", "flex-grow"),
    ("fxsh", "flex-shrink"),
    ("fxw", "flex-wrap:nowrap|wrap|wrap-reverse"),
    ("ac", "align-content:flex-start|flex-end|center|space-between|space-around|stretch"),
    ("ai", "align-items:flex-start|flex-end|center|baseline|stretch"),
    ("as", "align-self:auto|flex-start|flex-end|center|baseline|stretch"),
    ("jc", "justify-content:flex-start|flex-end|center|space-between|space-around"),
    ("ord", "order"),
    // Grid
    ("gtc", "grid-template-columns"),
    ("gtr", "grid-template-rows"),
    ("gap", "gap"),
    ("colg", "column-gap"),
    ("rowg", "row-gap"),
    // Color and background
    ("c", "color:${1:#000}"),
    ("bg", "background:${1:#000}"),
    ("bgc", "background-color:${1:#fff}"),
    ("bgi", "background-image:url(${1})"),
    ("bgp", "background-position:${1:0} ${2:0}"),
    ("bgr", "background-repeat:no-repeat|repeat|repeat-x|repeat-y"),
    ("bgs", "background-size:cover|contain"),
    // Border and outline
    ("bd", "border:${1:1px} ${2:solid} ${3:black}"),
    ("bdt", "border-top:${1:1px} ${2:solid} ${3:black}"),
    ("bdr", "border-right:${1:1px} ${2:solid} ${3:black}"),
    ("bdb", "border-bottom:${1:1px} ${2:solid} ${3:black}"),
    ("bdl", "border-left:${1:1px} ${2:solid} ${3:black}"),
    ("bdrs", "border-radius"),
    ("bdc", "border-color:${1:#000}"),
    ("bdw", "border-width"),
    ("bds", "border-style:none|hidden|dotted|dashed|solid|double"),
    ("ol", "outline"),
    ("bxsh", "box-shadow:${1:inset} ${2:hoff} ${3:voff} ${4:blur} ${5:#000}|none"),
    // Typography
    ("f", "font:${1:1em} ${2:sans-serif}"),
    ("ff", "font-family:serif|sans-serif|cursive|fantasy|monospace"),
    ("fs", "font-style:italic|normal|oblique"),
    ("fw", "font-weight:normal|bold|bolder|lighter"),
    ("fz", "font-size"),
    ("lh", "line-height"),
    ("lts", "letter-spacing"),
    ("ta", "text-align:left|center|right|justify"),
    ("td", "text-decoration:none|underline|overline|line-through"),
    ("tt", "text-transform:uppercase|lowercase|capitalize|none"),
    ("ti", "text-indent"),
    ("tsh", "text-shadow:${1:hoff} ${2:voff} ${3:blur} ${4:#000}"),
    ("whs", "white-space:nowrap|pre|pre-wrap|pre-line|normal"),
    ("wob", "word-break:normal|keep-all|break-all"),
    ("wow", "overflow-wrap:normal|break-word"),
    ("va", "vertical-align:top|super|text-top|middle|baseline|bottom|text-bottom|sub"),
    // Lists and tables
    ("lis", "list-style"),
    ("lisp", "list-style-position:inside|outside"),
    ("list", "list-style-type:disc|circle|square|decimal|none"),
    ("tbl", "table-layout:auto|fixed"),
    ("bdcl", "border-collapse:collapse|separate"),
    // Interaction
    ("cur", "cursor:pointer|auto|default|crosshair|move|text|wait|help"),
    ("pe", "pointer-events:none|auto"),
    ("us", "user-select:none|auto|text|all"),
    // Effects and motion
    ("trf", "transform"),
    ("trs", "transition:${1:prop} ${2:time}"),
    ("anim", "animation"),
    ("cnt", "content:''"),
    // At-rule blocks
    ("@f", "@font-face {\n\tfont-family: ${1};\n\tsrc: url(${2});\n}"),
    ("@i", "@import url(${1});"),
    ("@kf", "@keyframes ${1:identifier} {\n\t${2}\n}"),
    ("@m", "@media ${1:screen} {\n\t${2}\n}"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SnippetTable;
    use std::collections::BTreeSet;

    #[test]
    fn keys_are_unique() {
        let keys: BTreeSet<&str> = CSS_SNIPPETS.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys.len(), CSS_SNIPPETS.len());
    }

    #[test]
    fn builds_into_a_table_with_property_and_raw_entries() {
        let table = SnippetTable::build(
            CSS_SNIPPETS.iter().map(|(k, v)| (k.to_string(), v.to_string())),
        );
        assert_eq!(table.entries().len(), CSS_SNIPPETS.len());
        assert!(table.property("position").is_some());
        assert!(table.property("display").is_some());
        assert!(table.entries().iter().any(|s| s.key() == "@m"));
    }
}
