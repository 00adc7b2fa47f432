use triadc::ide::{self, Position};

fn pos(line: usize, character: usize) -> Position {
    Position { line, character }
}

#[test]
fn balanced_braces() {
    assert!(ide::brace_diagnostics("triad P { x: int; }").is_empty());
}

#[test]
fn unmatched_closing_brace() {
    let d = ide::brace_diagnostics("triad P { }\n}");
    assert_eq!(d.len(), 1);
    assert_eq!(d[0].message, "unmatched closing brace");
    assert_eq!(d[0].start, pos(1, 0));
    assert_eq!(d[0].end, pos(1, 1));
}

#[test]
fn counter_resets_after_unmatched_close() {
    // Both stray closers are reported; the later `{` is then left open.
    let d = ide::brace_diagnostics("} } {");
    let messages: Vec<_> = d.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "unmatched closing brace",
            "unmatched closing brace",
            "unmatched opening brace"
        ]
    );
    assert_eq!(d[1].start, pos(0, 2));
}

#[test]
fn unclosed_brace_reported_on_last_line() {
    let d = ide::brace_diagnostics("triad P {\n x: int;\n");
    assert_eq!(d.len(), 1);
    assert_eq!(d[0].message, "unmatched opening brace");
    assert_eq!(d[0].start, pos(2, 0));
}

#[test]
fn compile_diagnostics_fall_back_to_compiler() {
    let d = ide::compile_diagnostics("function f() {\n  immutable a = b;\n}");
    assert_eq!(d.len(), 1);
    assert_eq!(d[0].message, "symbol `b` is not defined");
    assert_eq!(d[0].start, pos(1, 16));
    assert_eq!(d[0].end, pos(1, 17));
}

#[test]
fn compile_diagnostics_clean_source() {
    assert!(ide::compile_diagnostics("triad P { x: int; }").is_empty());
}

#[test]
fn keyword_completions() {
    let labels: Vec<_> = ide::completions().into_iter().map(|c| c.label).collect();
    assert_eq!(labels.len(), 11);
    assert_eq!(labels[0], "triad");
    assert!(labels.contains(&"uncertain"));
    assert!(!labels.contains(&"TriadHash"));
}

#[test]
fn hover_on_keyword() {
    let src = "triad P { }\nfractal function f() { }";
    assert_eq!(ide::hover(src, pos(0, 2)).as_deref(), Some("keyword: triad"));
    assert_eq!(ide::hover(src, pos(1, 7)).as_deref(), Some("keyword: fractal"));
    assert_eq!(ide::hover(src, pos(1, 10)), None);
    assert_eq!(ide::hover(src, pos(5, 0)), None);
}

#[test]
fn hover_on_builtin_type() {
    let src = "immutable h: TriadHash;";
    assert_eq!(
        ide::hover(src, pos(0, 15)).as_deref(),
        Some("built-in type: TriadHash")
    );
}

#[test]
fn word_under_cursor() {
    assert_eq!(ide::word_at("  mutable x", pos(0, 4)), Some("mutable"));
    assert_eq!(ide::word_at("  mutable x", pos(0, 0)), None);
}

#[test]
fn deeply_nested_calls_become_a_diagnostic() {
    let depth = 100_000;
    let src = format!("function f() {{ {}1{}; }}", "f(".repeat(depth), ")".repeat(depth));
    let d = ide::compile_diagnostics(&src);
    assert_eq!(d.len(), 1);
    assert_eq!(d[0].message, "calls nested more than 256 deep");
}
