//! Driver behavior: options, diagnostic ordering and source locations.

use ns_diagnostic::{ErrorCode, ErrorFamily, Severity};
use nsc::{compile, CompileOptions, SourceId};
use pretty_assertions::assert_eq;

use crate::common::{array_len, codes, compile_any, global, kinds};

const THREE_PHASES: &str = "var b : int16 := q;
var c : int16 := ;
var _Bad : int16 := 1;
";

#[test]
fn test_reserved_names_need_opt_in() {
    let source = "var _Limit : int16 := 1;";

    let strict = compile_any(source);
    assert_eq!(codes(&strict), vec![ErrorCode::E0008]);

    let lenient = compile(source, &CompileOptions::new().allow_reserved(true));
    assert!(lenient.diagnostics.is_empty());
    assert_eq!(lenient.typed.symbols.globals().count(), 1);
}

#[test]
fn test_every_phase_runs_and_diagnostics_are_ordered() {
    let out = compile_any(THREE_PHASES);
    // Reported lex, then parse, then check; flushed in source order.
    assert_eq!(
        codes(&out),
        vec![ErrorCode::E2004, ErrorCode::E1001, ErrorCode::E0008]
    );
    let families: Vec<_> = kinds(&out).into_iter().map(|k| k.family()).collect();
    assert_eq!(
        families,
        vec![ErrorFamily::Symbol, ErrorFamily::Parse, ErrorFamily::Lex]
    );
    // The declaration after the parse error is still checked.
    assert!(global(&out, "_Bad").defined);
}

#[test]
fn test_located_diagnostics_carry_source_id() {
    let options = CompileOptions::new().source_id(SourceId(7));
    let out = compile(THREE_PHASES, &options);
    assert_eq!(out.source_id, SourceId(7));

    let located = out.located(THREE_PHASES);
    assert_eq!(located.len(), 3);
    assert!(located.iter().all(|l| l.source_id == SourceId(7)));

    let lines: Vec<_> = located
        .iter()
        .map(|l| l.location.map(|at| (at.line, at.col)))
        .collect();
    assert_eq!(lines, vec![Some((1, 18)), Some((2, 18)), Some((3, 5))]);
    assert!(located[0]
        .to_string()
        .starts_with("#7:1:18: error [E2004]: "));
}

#[test]
fn test_unknown_escape_is_a_warning() {
    let out = compile_any(r#"var s : []typeof("x"[0]) := "a\qb";"#);
    assert_eq!(codes(&out), vec![ErrorCode::W0001]);
    assert!(!out.has_errors());
    assert_eq!(out.warnings().count(), 1);
    assert_eq!(out.errors().count(), 0);
    assert_eq!(out.diagnostics[0].severity, Severity::Warning);
    // `\q` degrades to `q`: three characters plus the terminator.
    assert_eq!(array_len(&out, global(&out, "s").ty), Some(4));
}

#[test]
fn test_parse_recovery_reports_every_error() {
    let out = compile_any(
        "fun f() -> int16 { x := ; return 1; }
         var a : := 1;
         fun g() -> int16 { return h; }",
    );
    assert_eq!(
        codes(&out),
        vec![ErrorCode::E1001, ErrorCode::E1001, ErrorCode::E2004]
    );
    assert!(global(&out, "f").defined);
    assert!(global(&out, "g").defined);
}

#[test]
fn test_compiles_are_independent() {
    let sources = ["var a : int16 := 1;", "var a : int32 := 1l;"];
    let clean = std::thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|source| scope.spawn(move || !compile_any(source).has_errors()))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>()
    });
    assert_eq!(clean, vec![true, true]);
}

#[test]
fn test_init_tracing_is_idempotent() {
    nsc::init_tracing();
    nsc::init_tracing();
}
