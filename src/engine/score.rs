//! Fuzzy scoring and best-match lookup.
//!
//! The scorer is a pure function with no state: it rates how well a typed
//! token matches a dictionary key or keyword. The exact formula is pinned
//! down here (and by the tests below) rather than inherited from anywhere:
//!
//! - greedy in-order subsequence match over lowercased input;
//! - a matched character contributes `1.0` when contiguous with the previous
//!   match (or sitting at the candidate start), otherwise `1/gap`;
//! - the weighted sum is normalized by pattern length and damped by the
//!   length ratio of the two strings, so `"p"` does not score a perfect hit
//!   against `"padding"`.
//!
//! `find_best_match` is the generic "pick the best dictionary entry" built on
//! top: first strictly-better score wins, perfect scores short-circuit.

/// Rate `pattern` against `candidate`, returning a score in `[0, 1]`.
///
/// `1.0` means an exact match (or an empty pattern, by convention). `0.0`
/// means not even the first pattern character could be matched in order.
pub fn score(pattern: &str, candidate: &str) -> f64 {
    let pattern = pattern.to_lowercase();
    let candidate = candidate.to_lowercase();
    if pattern.is_empty() {
        return 1.0;
    }
    if candidate.is_empty() {
        return 0.0;
    }
    if pattern == candidate {
        return 1.0;
    }

    let chars: Vec<char> = candidate.chars().collect();
    let pattern_len = pattern.chars().count() as f64;
    let candidate_len = chars.len() as f64;

    let mut total = 0.0;
    let mut matched = 0usize;
    let mut prev: Option<usize> = None;
    let mut cursor = 0usize;

    for ch in pattern.chars() {
        let Some(offset) = chars[cursor..].iter().position(|&c| c == ch) else {
            // Greedy: scoring stops at the first character that cannot be
            // matched, mirroring the unmatched-remainder computation.
            break;
        };
        let at = cursor + offset;
        let weight = match prev {
            None => 1.0 / (at as f64 + 1.0),
            Some(p) if at == p + 1 => 1.0,
            Some(p) => 1.0 / (at - p) as f64,
        };
        total += weight;
        matched += 1;
        prev = Some(at);
        cursor = at + 1;
    }

    if matched == 0 {
        return 0.0;
    }

    let length_ratio = pattern_len.min(candidate_len) / pattern_len.max(candidate_len);
    (total / pattern_len) * length_ratio
}

/// The suffix of `pattern` not consumed by a greedy in-order match against
/// `candidate`.
///
/// A cursor advances through `candidate` for each pattern character; the
/// remainder is everything from the first character that found no home:
/// `remainder("poas", "position") == "as"`.
pub(crate) fn unmatched_remainder<'p>(pattern: &'p str, candidate: &str) -> &'p str {
    // Case-insensitive, like the scorer, so both agree on what was consumed.
    let candidate = candidate.to_ascii_lowercase();
    let mut cursor = 0usize;
    for (i, ch) in pattern.char_indices() {
        let ch = ch.to_ascii_lowercase();
        match candidate[cursor..].find(ch) {
            Some(offset) => cursor += offset + ch.len_utf8(),
            None => return &pattern[i..],
        }
    }
    ""
}

/// Score `input` against every item and return the best one, or `None` when
/// the best score is below `min_score` or nothing scored above zero.
///
/// Ties keep the first item encountered; a perfect score returns immediately.
pub fn find_best_match<'a, T, I, K>(input: &str, items: I, min_score: f64, key_of: K) -> Option<&'a T>
where
    I: IntoIterator<Item = &'a T>,
    K: Fn(&T) -> &str,
{
    find_best_match_scored(input, items, min_score, key_of).map(|(item, _)| item)
}

/// Like [`find_best_match`] but also reports the winning score (used for
/// resolution traces).
pub(crate) fn find_best_match_scored<'a, T, I, K>(
    input: &str,
    items: I,
    min_score: f64,
    key_of: K,
) -> Option<(&'a T, f64)>
where
    I: IntoIterator<Item = &'a T>,
    K: Fn(&T) -> &str,
{
    let mut best: Option<(&'a T, f64)> = None;
    for item in items {
        let item_score = score(input, key_of(item));
        if item_score >= 1.0 {
            return Some((item, item_score));
        }
        if best.map_or(true, |(_, s)| item_score > s) {
            best = Some((item, item_score));
        }
    }
    best.filter(|&(_, s)| s > 0.0 && s >= min_score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_is_perfect() {
        for word in ["p", "pos", "position", "border-radius"] {
            assert_eq!(score(word, word), 1.0);
        }
    }

    #[test]
    fn empty_pattern_scores_one_by_convention() {
        assert_eq!(score("", "position"), 1.0);
        assert_eq!(score("x", ""), 0.0);
    }

    #[test]
    fn no_ordered_overlap_scores_zero() {
        assert_eq!(score("abc", "xyz"), 0.0);
        assert_eq!(score("q", "position"), 0.0);
    }

    #[test]
    fn scores_stay_within_unit_interval() {
        let patterns = ["p", "poas", "bd", "xyz", "pos-a", "m10"];
        let candidates = ["p", "position", "padding", "border", "pos-a"];
        for p in patterns {
            for c in candidates {
                let s = score(p, c);
                assert!((0.0..=1.0).contains(&s), "score({p:?}, {c:?}) = {s}");
            }
        }
    }

    #[test]
    fn prefers_contiguous_and_earlier_matches() {
        assert!(score("pos", "position") > score("pos", "pseudo"));
        assert!(score("bd", "border") > score("bd", "background-blend-mode"));
    }

    #[test]
    fn only_exact_matches_reach_one() {
        assert!(score("p", "padding") < 1.0);
        assert!(score("pos", "position") < 1.0);
    }

    #[test]
    fn remainder_examples() {
        assert_eq!(unmatched_remainder("poas", "position"), "as");
        assert_eq!(unmatched_remainder("abc", "xyz"), "abc");
        assert_eq!(unmatched_remainder("pos", "position"), "");
    }

    #[test]
    fn remainder_matches_case_insensitively() {
        assert_eq!(unmatched_remainder("Poas", "position"), "as");
        assert_eq!(unmatched_remainder("poas", "POSITION"), "as");
    }

    #[test]
    fn best_match_prefers_first_on_ties() {
        let items = vec![("first", "same"), ("second", "same")];
        let found = find_best_match("sam", &items, 0.0, |item| item.1).unwrap();
        assert_eq!(found.0, "first");
    }

    #[test]
    fn best_match_short_circuits_on_exact() {
        let items = vec![("a", "position"), ("b", "pos"), ("c", "p")];
        let found = find_best_match("pos", &items, 0.0, |item| item.1).unwrap();
        assert_eq!(found.0, "b");
    }

    #[test]
    fn best_match_respects_min_score() {
        let items = vec![("a", "padding")];
        assert!(find_best_match("pg", &items, 0.9, |item| item.1).is_none());
        assert!(find_best_match("qq", &items, 0.0, |item| item.1).is_none());
    }
}
