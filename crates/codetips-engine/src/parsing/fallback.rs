use crate::parsing::{ParserResult, TokenLocation, TokenType};
use crate::registry::DefinitionRegistry;

/// Language-agnostic pass: one identifier token per whole-word occurrence of
/// a registry name. Never fails and never reports errors.
pub struct FallbackParser<'r> {
    registry: &'r DefinitionRegistry,
}

impl<'r> FallbackParser<'r> {
    pub fn new(registry: &'r DefinitionRegistry) -> Self {
        Self { registry }
    }

    pub fn parse(&self, source: &str) -> ParserResult {
        let tokens = match self.registry.matcher() {
            Some(matcher) => matcher
                .find_iter(source)
                .filter_map(|m| TokenLocation::new(source, m.range(), TokenType::Identifier))
                .collect(),
            None => Vec::new(),
        };
        ParserResult::fallback(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_registry_names_as_whole_words() {
        let registry = DefinitionRegistry::load();
        let result = FallbackParser::new(&registry).parse("Promise.all(xs); Promises; fetchData()");

        let texts: Vec<&str> = result.tokens().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Promise", "all"]);
        assert!(result.tokens().iter().all(|t| t.info.is_none()));
        assert!(result.is_valid());
        assert!(result.uses_fallback());
    }

    #[test]
    fn empty_source_has_no_tokens() {
        let registry = DefinitionRegistry::load();
        let result = FallbackParser::new(&registry).parse("");
        assert!(result.tokens().is_empty());
        assert!(result.errors().is_empty());
    }

    #[test]
    fn syntactically_broken_code_still_gets_tokens() {
        let registry = DefinitionRegistry::load();
        let result = FallbackParser::new(&registry).parse("const {{ = fetch(((");

        let texts: Vec<&str> = result.tokens().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["const", "fetch"]);
    }

    #[test]
    fn empty_registry_yields_nothing() {
        let registry = DefinitionRegistry::builder().build();
        let result = FallbackParser::new(&registry).parse("Promise.all(xs)");
        assert!(result.tokens().is_empty());
    }
}
