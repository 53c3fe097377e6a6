use std::path::Path;

use cfgtrace::parser;
use cfgtrace::{check, CheckError, Grammar, GrammarDefinition, Session};
use rstest::rstest;

fn definition(json: &str) -> Grammar {
    serde_json::from_str::<GrammarDefinition>(json).unwrap().into()
}

fn anbn() -> Grammar {
    definition(r#"{
        "terminals": ["a", "b"],
        "non_terminals": ["S"],
        "start_symbol": "S",
        "productions": { "S": ["a S b", "a b"] }
    }"#)
}

fn bundled(name: &str) -> Grammar {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("grammars").join(name);
    parser::load_file(&path).unwrap()
}

#[rstest]
#[case("aabb", true)]
#[case("ab", true)]
#[case("aab", false)]
#[case("", false)]
#[case("ba", false)]
#[case("aaabbb", true)]
fn nested_pairs(#[case] word: &str, #[case] belongs: bool) {
    let mut session = Session::default();
    session.set_grammar(anbn());

    assert_eq!(session.check_word(word).unwrap().belongs, belongs);
}

#[rstest]
#[case("")]
#[case("a")]
#[case("abc")]
fn undefined_nonterminal_never_accepts(#[case] word: &str) {
    let grammar = definition(r#"{
        "terminals": [],
        "non_terminals": ["S", "A"],
        "start_symbol": "S",
        "productions": { "S": ["A"] }
    }"#);

    assert!(!check(&grammar, word).unwrap().belongs);
}

#[test]
fn general_graph_lists_productions_in_order() {
    let grammar = definition(r#"{
        "terminals": ["a"],
        "non_terminals": ["S"],
        "start_symbol": "S",
        "productions": { "S": ["a S", "a"] }
    }"#);
    let mut session = Session::default();
    session.set_grammar(grammar);

    for word in ["a", "aaa", "b"] {
        assert_eq!(
            session.check_word(word).unwrap().derivation_tree_general,
            "digraph {\n    S -> a S\n    S -> a\n}"
        );
    }
}

#[test]
fn checking_before_setting_a_grammar_fails() {
    assert_eq!(Session::default().check_word("ab"), Err(CheckError::NoGrammar));
}

#[test]
fn setting_the_same_grammar_twice_changes_nothing() {
    let mut session = Session::default();
    session.set_grammar(anbn());
    let first: Vec<_> = ["ab", "aabb", "abb"].iter().map(|w| session.check_word(w).unwrap()).collect();

    session.set_grammar(anbn());
    let second: Vec<_> = ["ab", "aabb", "abb"].iter().map(|w| session.check_word(w).unwrap()).collect();

    assert_eq!(first, second);
}

#[test]
fn reordering_alternatives_changes_the_trace_only() {
    let forward = definition(r#"{
        "terminals": ["a"],
        "non_terminals": ["S", "A", "B"],
        "start_symbol": "S",
        "productions": { "S": ["A", "B"], "A": ["a"], "B": ["a"] }
    }"#);
    let backward = definition(r#"{
        "terminals": ["a"],
        "non_terminals": ["S", "A", "B"],
        "start_symbol": "S",
        "productions": { "S": ["B", "A"], "A": ["a"], "B": ["a"] }
    }"#);

    let forward = check(&forward, "a").unwrap();
    let backward = check(&backward, "a").unwrap();

    assert!(forward.belongs && backward.belongs);
    assert_eq!(forward.trace.to_string(), "A -> a\nS -> A\n");
    assert_eq!(backward.trace.to_string(), "B -> a\nS -> B\n");
}

#[rstest]
#[case("", true)]
#[case("()", true)]
#[case("(())()", true)]
#[case("(()", false)]
#[case(")(", false)]
fn balanced_parentheses(#[case] word: &str, #[case] belongs: bool) {
    assert_eq!(check(&bundled("parens.bnf"), word).unwrap().belongs, belongs);
}

#[rstest]
#[case("1+2*3", true)]
#[case("(1+2)*3", true)]
#[case("7", true)]
#[case("1+", false)]
#[case("(1", false)]
#[case("12", false)]
fn arithmetic_expressions(#[case] word: &str, #[case] belongs: bool) {
    assert_eq!(check(&bundled("arithmetic.bnf"), word).unwrap().belongs, belongs);
}

#[test]
fn accepted_words_get_a_full_tree() {
    let mut session = Session::default();
    session.set_grammar(bundled("arithmetic.bnf"));
    let report = session.check_word("(1+2)*3").unwrap();

    let tree = report.derivation_tree.unwrap();
    assert!(tree.starts_with("digraph {\n    n0 [label=\"E\"]\n"));
    assert!(tree.ends_with('}'));
    assert_eq!(tree.matches("[label=").count(), tree.matches(" -> ").count() + 1);
}

#[test]
fn json_and_text_grammars_agree() {
    let text = parser::parse_str("S = \"a\" S \"b\" | \"a\" \"b\"", Path::new("inline.bnf")).unwrap();

    assert_eq!(text.definition(), bundled("anbn.json").definition());
}

#[test]
fn grammar_files_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("g.json");
    let text = dir.path().join("g.bnf");
    std::fs::write(&json, serde_json::to_string(&anbn().definition()).unwrap()).unwrap();
    std::fs::write(&text, "S = \"a\" S \"b\"\nS = \"a\" \"b\"\n").unwrap();

    assert_eq!(parser::load_file(&json).unwrap(), anbn());
    assert_eq!(parser::load_file(&text).unwrap().definition(), anbn().definition());
}

#[test]
fn broken_grammar_file_reports_every_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.bnf");
    std::fs::write(&path, "S = \"a\n\nS\n").unwrap();

    let lines: Vec<_> = parser::load_file(&path).unwrap_err().iter().map(|e| e.location.line).collect();
    assert_eq!(lines, vec![1, 3]);
}
