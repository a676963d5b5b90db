//! Locating `Contract.Result<T>()` and `Contract.OldValue[<T>](x)` in
//! condition text.
//!
//! Type arguments are closed with a balanced scan rather than a character
//! class, so tuple, array, nullable, nested generic and `global::` types are
//! all accepted.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

static RESULT_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bContract\.Result<").unwrap());
static OLD_VALUE_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bContract\.OldValue\b").unwrap());
static EMPTY_ARGUMENTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\(\s*\)").unwrap());
static IDENTIFIER_ARGUMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\(\s*([A-Za-z_]\w*)\s*\)").unwrap());

/// Index of the `>` closing the `<` at the start of `text`.
///
/// Parentheses inside the type argument must balance; a `;` or a string
/// literal ends the search.
pub(crate) fn matching_angle(text: &str) -> Option<usize> {
    let mut angles = 0usize;
    let mut parens = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '<' => angles += 1,
            '>' => {
                angles = angles.checked_sub(1)?;
                if angles == 0 {
                    return (parens == 0).then_some(i);
                }
            }
            '(' => parens += 1,
            ')' => parens = parens.checked_sub(1)?,
            ';' | '"' => return None,
            _ => {}
        }
    }
    None
}

/// Spans of every `Contract.Result<T>()` in `text`, left to right.
pub(crate) fn result_placeholders(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut from = 0;

    while let Some(start) = RESULT_START.find_at(text, from) {
        // the match ends just past `<`
        let angle = start.end() - 1;
        let closed = matching_angle(&text[angle..]).and_then(|close| {
            let after = angle + close + 1;
            EMPTY_ARGUMENTS.find(&text[after..]).map(|m| after + m.end())
        });

        match closed {
            Some(end) => {
                spans.push(start.start()..end);
                from = end;
            }
            None => from = start.end(),
        }
    }
    spans
}

/// An old-value reference: the whole span and the span of its identifier.
pub(crate) struct OldValueSpan {
    pub whole: Range<usize>,
    pub identifier: Range<usize>,
}

/// Every `Contract.OldValue(x)` / `Contract.OldValue<T>(x)` with a bare
/// identifier argument, left to right. Compound arguments are skipped.
pub(crate) fn old_value_references(text: &str) -> Vec<OldValueSpan> {
    let mut spans = Vec::new();
    let mut from = 0;

    while let Some(start) = OLD_VALUE_START.find_at(text, from) {
        let mut cursor = start.end();
        if text[cursor..].starts_with('<') {
            match matching_angle(&text[cursor..]) {
                Some(close) => cursor += close + 1,
                None => {
                    from = start.end();
                    continue;
                }
            }
        }

        match IDENTIFIER_ARGUMENT.captures(&text[cursor..]) {
            Some(caps) => {
                let (Some(whole), Some(identifier)) = (caps.get(0), caps.get(1)) else {
                    from = start.end();
                    continue;
                };
                spans.push(OldValueSpan {
                    whole: start.start()..cursor + whole.end(),
                    identifier: cursor + identifier.start()..cursor + identifier.end(),
                });
                from = cursor + whole.end();
            }
            None => from = start.end(),
        }
    }
    spans
}

/// Rebuild `text` with each (ordered, non-overlapping) span replaced.
pub(crate) fn replace_spans<F>(text: &str, spans: &[Range<usize>], mut replacement: F) -> String
where
    F: FnMut(&Range<usize>) -> String,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for span in spans {
        out.push_str(&text[last..span.start]);
        out.push_str(&replacement(span));
        last = span.end;
    }
    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholders(text: &str) -> Vec<&str> {
        result_placeholders(text).into_iter().map(|r| &text[r]).collect()
    }

    #[test]
    fn test_matching_angle() {
        assert_eq!(matching_angle("<int>()"), Some(4));
        assert_eq!(matching_angle("<List<int>>()"), Some(10));
        assert_eq!(matching_angle("<(int, string)>()"), Some(14));
        assert_eq!(matching_angle("<(int, List<int>)>"), Some(17));
        assert_eq!(matching_angle("<int)>"), None);
        assert_eq!(matching_angle("<int"), None);
        assert_eq!(matching_angle("<int; x>"), None);
    }

    #[test]
    fn test_result_simple_and_generic() {
        assert_eq!(
            placeholders("Contract.Result<int>() > 0 && Contract.Result<List<User>>() != null"),
            vec!["Contract.Result<int>()", "Contract.Result<List<User>>()"]
        );
    }

    #[test]
    fn test_result_tuple_type() {
        assert_eq!(
            placeholders("Contract.Result<(int, string)>().Item1 != x"),
            vec!["Contract.Result<(int, string)>()"]
        );
    }

    #[test]
    fn test_result_alias_qualified_and_array_types() {
        assert_eq!(
            placeholders("Contract.Result<global::Sample.User>() != null"),
            vec!["Contract.Result<global::Sample.User>()"]
        );
        assert_eq!(
            placeholders("Contract.Result<int?[]>( ) != null"),
            vec!["Contract.Result<int?[]>( )"]
        );
    }

    #[test]
    fn test_result_requires_word_boundary() {
        assert!(placeholders("ICodeContract.Result<int>() > 0").is_empty());
        assert_eq!(
            placeholders("System.Diagnostics.Contracts.Contract.Result<int>() > 0"),
            vec!["Contract.Result<int>()"]
        );
    }

    #[test]
    fn test_result_without_empty_call_is_ignored() {
        assert!(placeholders("Contract.Result<int>").is_empty());
        assert!(placeholders("Contract.Result<int>(x)").is_empty());
    }

    #[test]
    fn test_old_value_type_hints() {
        let text = "Contract.OldValue<List<int>>(items) + Contract.OldValue<int[]>(arr) + Contract.OldValue<(int, int)>(pair) + Contract.OldValue(n)";
        let identifiers: Vec<&str> = old_value_references(text)
            .into_iter()
            .map(|s| &text[s.identifier])
            .collect();
        assert_eq!(identifiers, vec!["items", "arr", "pair", "n"]);
    }

    #[test]
    fn test_old_value_skips_compound_and_foreign() {
        assert!(old_value_references("Contract.OldValue(a.b) + MyContract.OldValue(x)").is_empty());
        assert!(old_value_references("Contract.OldValues(x)").is_empty());
    }

    #[test]
    fn test_replace_spans() {
        let text = "a + b + c";
        assert_eq!(replace_spans(text, &[0..1, 8..9], |_| "z".to_string()), "z + b + z");
        assert_eq!(replace_spans(text, &[], |_| String::new()), text);
    }
}
