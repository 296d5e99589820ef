//! Cross-module tests for parsing: every block goes through
//! [`ParserDispatch`] and its output is checked against the invariants in
//! [`invariants`].

mod normalize;

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::parsing::{FallbackParser, Flavor, LanguageParser, ParserDispatch, TypeScriptParser};
use crate::registry::DefinitionRegistry;
use normalize::{TokenSnap, normalize};

#[rstest]
#[case::fallback_only("ruby", "Promise.all(xs)")]
#[case::clean_ts("ts", "const x: number = 1;")]
#[case::type_error("ts", "const x: number = 'a';")]
#[case::interface("typescript", "interface P<T> extends Q { y?: T; }")]
#[case::unterminated("ts", "function f(a: string {")]
#[case::stray_closer("ts", "}\nconst a = 1;")]
#[case::jsx("tsx", "export const App = () => <main className=\"x\">{fetch}</main>;")]
#[case::javascript("js", "async function load() { const r = await fetch(url); return r.json(); }")]
#[case::css("css", ".card { display: grid; }")]
#[case::multibyte("ts", "const naïve = 'héllo'; // ✓ Promise")]
#[case::only_comment("ts", "// nothing here")]
#[case::empty("ts", "")]
fn output_invariants(#[case] language: &str, #[case] source: &str) {
    let registry = DefinitionRegistry::load();
    let result = ParserDispatch::new(&registry).parse_code(source, language);
    invariants::check(source, &result);
}

#[rstest]
#[case::clean_ts(Flavor::TypeScript, "const x: number = 1;")]
#[case::class(
    Flavor::TypeScript,
    "class Store<T> { private items: T[] = []; add(item: T) { this.items.push(item); } }"
)]
#[case::destructuring(Flavor::TypeScript, "const { a, b: [c, ...d] } = load(); a + c;")]
#[case::stray_closer(Flavor::TypeScript, "}\nconst a = 1;")]
#[case::jsx(Flavor::Tsx, "const App = () => <List items={items} onPick={(i) => pick(i)} />;")]
#[case::javascript(
    Flavor::JavaScript,
    "async function load() { return (await fetch(url)).json(); }"
)]
fn single_parser_identifiers_do_not_overlap(#[case] flavor: Flavor, #[case] source: &str) {
    let registry = DefinitionRegistry::load();

    let language = TypeScriptParser::new(flavor)
        .parse(source, &registry)
        .expect("grammar loads");
    invariants::check(source, &language);
    invariants::check_single_parser(&language);

    let fallback = FallbackParser::new(&registry).parse(source);
    invariants::check_single_parser(&fallback);
}

#[rstest]
#[case::stray_closer("}\nconst a = 1;")]
#[case::unterminated("function f(a: string {")]
#[case::missing_name("const = ;")]
fn broken_blocks_report_errors(#[case] source: &str) {
    let registry = DefinitionRegistry::load();
    let result = ParserDispatch::new(&registry).parse_code(source, "ts");

    invariants::check(source, &result);
    assert!(!result.is_valid(), "no errors for {source:?}");
    assert!(!result.uses_fallback());
}

#[test]
fn stray_closer_error_stays_in_the_source() {
    let registry = DefinitionRegistry::load();
    let source = "}\nconst a = 1;";
    let result = ParserDispatch::new(&registry).parse_code(source, "ts");

    let first = &result.errors()[0];
    assert_eq!(first.start, 0);
    assert!(first.end <= source.len());
    assert!(!first.text.starts_with(char::is_whitespace));
}

#[test]
fn fallback_only_block() {
    let registry = DefinitionRegistry::load();
    let result = ParserDispatch::new(&registry).parse_code("Promise.all(xs)", "ruby");

    assert!(result.uses_fallback());
    assert!(result.errors().is_empty());
    let texts: Vec<&str> = result.tokens().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["Promise", "all"]);
    assert!(result.tokens().iter().all(|t| t.info.is_some()));
}

#[test]
fn clean_typescript_block() {
    let registry = DefinitionRegistry::load();
    let result = ParserDispatch::new(&registry).parse_code("const x: number = 1;", "ts");

    assert!(result.is_valid());
    assert!(!result.uses_fallback());
    assert_eq!(
        normalize(&result),
        vec![
            TokenSnap::new("keyword", (0, 5), "const", Some("keyword")),
            TokenSnap::new("identifier", (6, 7), "x", Some("(const variable) x: number")),
            TokenSnap::new("keyword", (9, 15), "number", Some("type")),
        ]
    );
}

#[test]
fn diagnostic_lands_on_the_initializer() {
    let registry = DefinitionRegistry::load();
    let source = "const x: number = 'a';";
    let result = ParserDispatch::new(&registry).parse_code(source, "ts");

    assert!(!result.is_valid());
    let errors: Vec<TokenSnap> = normalize(&result)
        .into_iter()
        .filter(|t| t.kind == "error")
        .collect();
    assert_eq!(
        errors,
        vec![TokenSnap::new(
            "error",
            (18, 21),
            "'a'",
            Some("Type 'string' is not assignable to type 'number'.")
        )]
    );
}

#[test]
fn identical_ranges_collapse_to_language_token() {
    let registry = DefinitionRegistry::load();
    let result = ParserDispatch::new(&registry).parse_code("class Promise {}", "ts");

    let promise: Vec<_> = result.tokens().iter().filter(|t| t.text == "Promise").collect();
    assert_eq!(promise.len(), 1);
    assert!(matches!(
        promise[0].info,
        Some(crate::parsing::IdentifierInfo::TypeSignature { .. })
    ));
}
