//! # TypeScript parser
//!
//! Parses a block as one isolated file with tree-sitter's TypeScript (or TSX)
//! grammar and walks the tree.
//!
//! The block is wrapped in an IIFE first (see [`wrap`]), so every position
//! the tree reports is shifted by the wrapper offset. Anything that does not
//! land fully inside the original source is dropped.
//!
//! Identifiers get, in order of preference:
//! 1. a [`TypeSignature`] when they name an interface, class or type alias
//! 2. a contextual label from the variable, parameter, property, function or
//!    method they declare
//! 3. the info of an earlier declaration of the same name in the block
//! 4. the definition registry

mod contextual;
mod diagnostics;
mod signature;
mod syntax;
mod walk;
pub mod wrap;

use tree_sitter::Parser;

pub use signature::{SignatureKind, TypeSignature};
pub use wrap::{WRAPPER_PREFIX, WRAPPER_SUFFIX, Wrapped};

use crate::parsing::{Capabilities, LanguageParser, ParserError, ParserResult};
use crate::registry::DefinitionRegistry;
use walk::Walker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    TypeScript,
    Tsx,
    JavaScript,
    Jsx,
}

impl Flavor {
    pub fn name(self) -> &'static str {
        match self {
            Flavor::TypeScript => "typescript",
            Flavor::Tsx => "tsx",
            Flavor::JavaScript => "javascript",
            Flavor::Jsx => "jsx",
        }
    }

    pub fn jsx(self) -> bool {
        matches!(self, Flavor::Tsx | Flavor::Jsx)
    }

    pub fn type_checking(self) -> bool {
        matches!(self, Flavor::TypeScript | Flavor::Tsx)
    }

    fn grammar(self) -> tree_sitter::Language {
        if self.jsx() {
            tree_sitter_typescript::LANGUAGE_TSX.into()
        } else {
            tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
        }
    }
}

/// A walk over a parsed block could not complete.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    #[error("the parser produced no syntax tree")]
    NoTree,
    #[error("node text is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("token range {start}..{end} does not map onto the source")]
    Range { start: usize, end: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct TypeScriptParser {
    flavor: Flavor,
}

impl TypeScriptParser {
    pub fn new(flavor: Flavor) -> Self {
        Self { flavor }
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }
}

impl LanguageParser for TypeScriptParser {
    fn name(&self) -> &'static str {
        self.flavor.name()
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            jsx: self.flavor.jsx(),
            type_checking: self.flavor.type_checking(),
        }
    }

    fn parse(
        &self,
        source: &str,
        registry: &DefinitionRegistry,
    ) -> Result<ParserResult, ParserError> {
        if source.trim().is_empty() {
            return Ok(ParserResult::language(
                self.name(),
                self.capabilities(),
                Vec::new(),
                Vec::new(),
            ));
        }

        // A fresh parser per block: nothing is shared between calls.
        let mut parser = Parser::new();
        parser
            .set_language(&self.flavor.grammar())
            .map_err(|source| ParserError::Grammar {
                grammar: self.name(),
                source,
            })?;

        let wrapped = Wrapped::new(source);
        let walked = parser
            .parse(wrapped.text(), None)
            .ok_or(WalkError::NoTree)
            .and_then(|tree| Walker::new(&wrapped, registry, self.flavor).walk(&tree));

        Ok(match walked {
            Ok(output) => ParserResult::language(
                self.name(),
                self.capabilities(),
                output.tokens,
                output.errors,
            ),
            Err(e) => {
                log::warn!("{} parser: walk failed: {e}", self.name());
                ParserResult::downgraded(self.name(), self.capabilities(), source, &e)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{IdentifierInfo, TokenLocation, TokenType};
    use pretty_assertions::assert_eq;

    fn parse(source: &str, flavor: Flavor) -> ParserResult {
        let registry = DefinitionRegistry::load();
        TypeScriptParser::new(flavor)
            .parse(source, &registry)
            .expect("grammar loads")
    }

    fn token<'r>(result: &'r ParserResult, text: &str) -> &'r TokenLocation {
        result
            .tokens()
            .iter()
            .find(|t| t.text == text)
            .unwrap_or_else(|| panic!("no token `{text}` in {:?}", result.tokens()))
    }

    #[test]
    fn annotated_const() {
        let result = parse("const x: number = 1;", Flavor::TypeScript);

        assert!(result.is_valid());
        assert!(!result.uses_fallback());
        let x = token(&result, "x");
        assert_eq!(x.range(), 6..7);
        assert_eq!(
            x.info.as_ref().map(|i| i.type_label()),
            Some("(const variable) x: number")
        );
        let keyword = token(&result, "const");
        assert_eq!(keyword.token_type, TokenType::Keyword);
        assert_eq!(keyword.range(), 0..5);
    }

    #[test]
    fn literal_not_assignable_to_annotation() {
        let source = "const x: number = 'a';";
        let result = parse(source, Flavor::TypeScript);

        assert!(!result.is_valid());
        let error = &result.errors()[0];
        assert_eq!(error.range(), 18..21);
        assert_eq!(&source[error.range()], "'a'");
        assert_eq!(
            error.error.as_deref(),
            Some("Type 'string' is not assignable to type 'number'.")
        );
    }

    #[test]
    fn literal_union_target_uses_double_quotes() {
        let result = parse("let mode: 'a' | 'b' = 'c';", Flavor::TypeScript);

        assert_eq!(
            result.errors()[0].error.as_deref(),
            Some("Type '\"c\"' is not assignable to type '\"a\" | \"b\"'.")
        );
    }

    #[test]
    fn javascript_skips_assignability() {
        let result = parse("let x = 'a';", Flavor::JavaScript);
        assert!(result.is_valid());
        assert!(!result.capabilities().type_checking);
    }

    #[test]
    fn null_is_assignable_in_non_strict_mode() {
        assert!(parse("const x: number = null;", Flavor::TypeScript).is_valid());
        assert!(parse("let id: string | number = 3;", Flavor::TypeScript).is_valid());
    }

    #[test]
    fn interface_signature() {
        let result = parse("interface P<T> extends Q { y?: T; }", Flavor::TypeScript);

        let p = token(&result, "P");
        let Some(IdentifierInfo::TypeSignature {
            title,
            documentation,
            ..
        }) = &p.info
        else {
            panic!("expected a type signature, got {:?}", p.info);
        };
        assert_eq!(title, "interface P<T> extends Q");
        assert!(documentation.starts_with("```typescript\n"));
        assert!(documentation.contains("interface P<T> extends Q"));
        assert!(documentation.contains("y?: T;"));
    }

    #[test]
    fn class_signature_lists_members() {
        let source = "export class Store<T> implements Iterable<T> {\n  \
                      private readonly items: T[] = [];\n  \
                      add(item: T): void {}\n}";
        let result = parse(source, Flavor::TypeScript);

        let store = token(&result, "Store");
        let documentation = store.info.as_ref().and_then(|i| i.documentation()).unwrap_or("");
        insta::assert_snapshot!(documentation, @r"
        ```typescript
        export class Store<T> implements Iterable<T> {
          private readonly items: T[];
          add(item: T): void;
        }
        ```
        ");
        assert_eq!(
            token(&result, "items").info.as_ref().map(|i| i.type_label()),
            Some("(private readonly property) items: T[]")
        );
    }

    #[test]
    fn parameter_labels() {
        let result = parse(
            "function greet(name?: string, times = 2) { return name; }",
            Flavor::TypeScript,
        );

        let labels: Vec<&str> = result
            .tokens()
            .iter()
            .filter_map(|t| t.info.as_ref().map(|i| i.type_label()))
            .collect();
        assert!(labels.contains(&"(function) greet(name?: string, times?: number): any"));
        assert!(labels.contains(&"(parameter) name?: string"));
        assert!(labels.contains(&"(parameter) times: number = 2"));
    }

    #[rstest::rstest]
    #[case::no_return("function log(a) { console.log(a); }", "(function) log(a: any): void")]
    #[case::nested_return(
        "function run() { [1].map(x => { return x; }); }",
        "(function) run(): void"
    )]
    #[case::returns_value(
        "function id(a: number) { if (a) { return a; } }",
        "(function) id(a: number): any"
    )]
    #[case::async_void("async function tick() {}", "(function) tick(): Promise<void>")]
    #[case::annotated("function n(): number { return 1; }", "(function) n(): number")]
    #[case::arrow("const f = (a) => a;", "(const variable) f: (a: any) => any")]
    #[case::arrow_block(
        "const g = (a: string) => { a; };",
        "(const variable) g: (a: string) => void"
    )]
    fn callable_labels(#[case] source: &str, #[case] label: &str) {
        let result = parse(source, Flavor::TypeScript);

        let labels: Vec<&str> = result
            .tokens()
            .iter()
            .filter_map(|t| t.info.as_ref().map(|i| i.type_label()))
            .collect();
        assert!(labels.contains(&label), "{label:?} not in {labels:?}");
    }

    #[test]
    fn uses_borrow_declaration_info() {
        let result = parse("let count = 0;\ncount += 1;", Flavor::TypeScript);

        let uses: Vec<&TokenLocation> =
            result.tokens().iter().filter(|t| t.text == "count").collect();
        assert_eq!(uses.len(), 2);
        assert_eq!(uses[0].info, uses[1].info);
        assert_eq!(
            uses[1].info.as_ref().map(|i| i.type_label()),
            Some("(let variable) count: number")
        );
    }

    #[test]
    fn jsx_flavor_parses_elements() {
        let result = parse("const App = () => <div>{title}</div>;", Flavor::Tsx);
        assert!(result.is_valid());
        assert!(result.capabilities().jsx);
        assert!(result.tokens().iter().any(|t| t.text == "App"));
    }

    #[test]
    fn syntax_errors_stay_inside_the_block() {
        let source = "const = ;";
        let result = parse(source, Flavor::TypeScript);

        assert!(!result.is_valid());
        for error in result.errors() {
            assert!(error.end <= source.len());
            assert_eq!(&source[error.range()], error.text);
        }
    }

    #[test]
    fn unbalanced_block_never_leaks_wrapper_ranges() {
        let source = "function f() {";
        let result = parse(source, Flavor::TypeScript);

        for token in result.tokens().iter().chain(result.errors()) {
            assert!(token.start < token.end);
            assert!(token.end <= source.len());
            assert_eq!(&source[token.range()], token.text);
        }
    }

    #[test]
    fn empty_block_is_empty_and_valid() {
        let result = parse("  \n\t", Flavor::TypeScript);
        assert!(result.is_valid());
        assert!(result.tokens().is_empty());
        assert!(!result.uses_fallback());
    }
}
