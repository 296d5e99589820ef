//! Token precedence between the fallback and a language parser.
//!
//! - identical ranges: the language token replaces the fallback token
//! - partial overlaps: both kept; the hover UI picks the innermost
//! - errors: separate channel, taken from the language parser only
//! - order: `start` ascending, ties broken by the longer token first

use std::collections::HashSet;

use crate::parsing::{ParserResult, TokenLocation};

pub fn merge_tokens(
    fallback: Vec<TokenLocation>,
    language: Vec<TokenLocation>,
) -> Vec<TokenLocation> {
    let claimed: HashSet<(usize, usize)> = language.iter().map(|t| (t.start, t.end)).collect();

    let mut merged: Vec<TokenLocation> = language
        .into_iter()
        .chain(
            fallback
                .into_iter()
                .filter(|t| !claimed.contains(&(t.start, t.end))),
        )
        .collect();
    sort_tokens(&mut merged);
    merged
}

pub fn sort_tokens(tokens: &mut [TokenLocation]) {
    tokens.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
}

/// Combines a fallback result with a language result into the block's result.
pub(crate) fn merge_results(fallback: ParserResult, language: ParserResult) -> ParserResult {
    let fallback = fallback.into_parts();
    let mut language = language.into_parts();

    let mut parsers = fallback.parsers;
    parsers.append(&mut language.parsers);
    let mut warnings = fallback.warnings;
    warnings.append(&mut language.warnings);
    let mut errors = language.errors;
    sort_tokens(&mut errors);

    ParserResult::from_parts(crate::parsing::types::ResultParts {
        tokens: merge_tokens(fallback.tokens, language.tokens),
        errors,
        uses_fallback: language.uses_fallback,
        parsers,
        capabilities: language.capabilities,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{IdentifierInfo, TokenType};
    use pretty_assertions::assert_eq;

    fn token(source: &str, start: usize, end: usize) -> TokenLocation {
        TokenLocation::new(source, start..end, TokenType::Identifier).unwrap()
    }

    #[test]
    fn language_token_wins_identical_range() {
        let source = "Promise.all(xs)";
        let fallback = vec![token(source, 0, 7)];
        let language = vec![
            token(source, 0, 7).with_info(Some(IdentifierInfo::contextual("(variable) Promise"))),
        ];

        let merged = merge_tokens(fallback, language);
        assert_eq!(merged.len(), 1);
        assert_eq!(
            merged[0].info.as_ref().map(|i| i.type_label()),
            Some("(variable) Promise")
        );
    }

    #[test]
    fn partial_overlaps_are_kept() {
        let source = "PromiseLike";
        let fallback = vec![token(source, 0, 7)];
        let language = vec![token(source, 0, 11)];

        let merged = merge_tokens(fallback, language);
        let ranges: Vec<_> = merged.iter().map(|t| t.range()).collect();
        assert_eq!(ranges, vec![0..11, 0..7]);
    }

    #[test]
    fn sorted_by_start_then_longest_first() {
        let source = "abcdefghij";
        let merged = merge_tokens(
            vec![token(source, 5, 6), token(source, 0, 2)],
            vec![token(source, 0, 4), token(source, 3, 5)],
        );
        let ranges: Vec<_> = merged.iter().map(|t| t.range()).collect();
        assert_eq!(ranges, vec![0..4, 0..2, 3..5, 5..6]);
    }

    #[test]
    fn merged_result_keeps_language_errors_and_flags() {
        use crate::parsing::Capabilities;

        let source = "x";
        let fallback = ParserResult::fallback(vec![token(source, 0, 1)]);
        let language = ParserResult::language(
            "typescript",
            Capabilities { jsx: false, type_checking: true },
            vec![],
            vec![TokenLocation::error(source, 0..1, "bad").unwrap()],
        );

        let merged = merge_results(fallback, language);
        assert_eq!(merged.parsers(), &["fallback", "typescript"]);
        assert_eq!(merged.tokens().len(), 1);
        assert_eq!(merged.errors().len(), 1);
        assert!(!merged.is_valid());
        assert!(!merged.uses_fallback());
        assert!(merged.capabilities().type_checking);
    }
}
