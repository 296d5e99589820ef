use crate::parsing::fallback::FallbackParser;
use crate::parsing::merge::merge_results;
use crate::parsing::typescript::{Flavor, TypeScriptParser};
use crate::parsing::{IdentifierInfo, ParserError, ParserResult};
use crate::registry::DefinitionRegistry;

/// A parser for one family of fence languages.
pub trait LanguageParser {
    fn name(&self) -> &'static str;

    fn capabilities(&self) -> crate::parsing::Capabilities;

    /// Parses one block. `Err` means the parser could not run at all; syntax
    /// problems in the block are reported inside the `ParserResult`.
    fn parse(
        &self,
        source: &str,
        registry: &DefinitionRegistry,
    ) -> Result<ParserResult, ParserError>;
}

/// Normalizes a fence info string to a language tag: first word, lowercase,
/// `:preview` suffix removed.
pub fn normalize_language(info: &str) -> String {
    let tag = info.split_whitespace().next().unwrap_or("");
    let tag = tag.strip_suffix(":preview").unwrap_or(tag);
    tag.to_ascii_lowercase()
}

/// Maps a normalized language tag to a parser flavor. `None` routes the block
/// to the fallback only.
pub fn flavor_for(language: &str) -> Option<Flavor> {
    match language {
        "typescript" | "ts" | "mts" | "cts" => Some(Flavor::TypeScript),
        "tsx" => Some(Flavor::Tsx),
        "jsx" => Some(Flavor::Jsx),
        "javascript" | "js" | "mjs" | "cjs" => Some(Flavor::JavaScript),
        _ => None,
    }
}

/// Selects and runs parsers for a block. Always runs the fallback first.
pub struct ParserDispatch<'r> {
    registry: &'r DefinitionRegistry,
}

impl<'r> ParserDispatch<'r> {
    pub fn new(registry: &'r DefinitionRegistry) -> Self {
        Self { registry }
    }

    pub fn parser_for(&self, language: &str) -> Option<Box<dyn LanguageParser>> {
        flavor_for(&normalize_language(language))
            .map(|flavor| Box::new(TypeScriptParser::new(flavor)) as Box<dyn LanguageParser>)
    }

    pub fn parse_code(&self, source: &str, language: &str) -> ParserResult {
        let parser = self.parser_for(language);
        if parser.is_none() {
            log::debug!("dispatch: no parser for `{language}`, fallback only");
        }
        self.parse_with(source, parser.as_deref())
    }

    /// Runs the fallback, then `parser` if there is one, and merges the two.
    /// A parser that fails to run is downgraded: its block gets one error
    /// spanning the source and only the fallback tokens.
    pub fn parse_with(&self, source: &str, parser: Option<&dyn LanguageParser>) -> ParserResult {
        let fallback = FallbackParser::new(self.registry).parse(source);
        let Some(parser) = parser else {
            return self.hydrate(fallback);
        };

        let result = match parser.parse(source, self.registry) {
            Ok(result) => {
                if result.uses_fallback() {
                    log::warn!("dispatch: {} parser downgraded to fallback", parser.name());
                }
                result
            }
            Err(e) => {
                log::warn!("dispatch: {} parser failed: {e}", parser.name());
                ParserResult::downgraded(parser.name(), parser.capabilities(), source, &e)
            }
        };
        self.hydrate(merge_results(fallback, result))
    }

    /// Fills in registry content for tokens that reached the end of the
    /// pipeline without any.
    fn hydrate(&self, mut result: ParserResult) -> ParserResult {
        for token in result.tokens_mut().iter_mut().filter(|t| t.info.is_none()) {
            token.info = self
                .registry
                .lookup(&token.text)
                .map(IdentifierInfo::from_definition);
        }
        result
    }
}
