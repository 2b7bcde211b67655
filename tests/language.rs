use std::{collections::HashMap, fs, io, path::Path};

use kode::{
    error::{Error, RuntimeErrorKind},
    interpreter::evaluator::core::{Config, Interpreter, SourceLoader},
    run,
};
use walkdir::WalkDir;

#[test]
fn demo_scripts_work() {
    let mut count = 0;
    let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");

    for entry in WalkDir::new(&demos).into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "kode"))
    {
        let path = entry.path();
        let content = fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = run(&path.display().to_string(), &content) {
            panic!("Demo {path:?} failed:\n{e}");
        }
    }

    assert!(count > 0, "No demo scripts found in {demos:?}");
}

fn eval(src: &str) -> String {
    match run("<test>", src) {
        Ok(value) => value.to_string(),
        Err(e) => panic!("Script failed:\n{e}"),
    }
}

fn assert_success(src: &str) {
    if let Err(e) = run("<test>", src) {
        panic!("Script failed:\n{e}");
    }
}

fn assert_failure(src: &str) -> Error {
    match run("<test>", src) {
        Ok(value) => panic!("Script succeeded with {value} but was expected to fail"),
        Err(e) => e,
    }
}

fn runtime_kind(src: &str) -> RuntimeErrorKind {
    match assert_failure(src) {
        Error::Runtime(error) => error.kind,
        other => panic!("Expected a runtime error, got:\n{other}"),
    }
}

/// Serves scripts from memory instead of the file system.
struct MemoryLoader(HashMap<String, String>);

impl MemoryLoader {
    fn new(files: &[(&str, &str)]) -> Self {
        Self(files.iter()
                  .map(|(path, text)| ((*path).to_string(), (*text).to_string()))
                  .collect())
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, path: &str) -> io::Result<String> {
        self.0
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no such file: {path}")))
    }
}

#[test]
fn empty_program() {
    assert_eq!(eval(""), "[]");
    assert_eq!(eval("\n\n# only a comment\n"), "[]");
}

#[test]
fn arithmetic_precedence_and_associativity() {
    assert_eq!(eval("1 + 2 * 3"), "[7]");
    assert_eq!(eval("(1 + 2) * 3"), "[9]");
    assert_eq!(eval("2 ^ 3 ^ 2"), "[512]");
    assert_eq!(eval("10 - 4 - 3"), "[3]");
    assert_eq!(eval("-2 ^ 2"), "[-4]");
    assert_eq!(eval("7 / 2; 6 / 3"), "[3.5, 2.0]");
    assert_eq!(eval("-7 // 2; -7 % 3"), "[-4, 2]");
}

#[test]
fn comparisons_and_logic_yield_numbers() {
    assert_eq!(eval("1 < 2; 2 <= 1; 1 == 1.0; 3 != 3"), "[1, 0, 1, 0]");
    assert_eq!(eval("1 and 2; 0 or 5; not 0; not 3"), "[2, 5, 1, 0]");
    assert_eq!(eval("1 + 1 == 2 and not 1 > 2"), "[1]");
    assert_eq!(eval("True; False; None"), "[1, 0, 0]");
}

#[test]
fn variables_and_name_errors() {
    assert_eq!(eval("var x = 5\nvar y = x * 2\ny"), "[5, 10, 10]");
    assert_eq!(eval("var a = var b = 3\na + b"), "[3, 6]");
    assert_eq!(runtime_kind("x + 1"), RuntimeErrorKind::UnknownVariable { name: "x".to_string() });
}

#[test]
fn strings() {
    assert_eq!(eval("\"ab\" + \"cd\"; \"ab\" * 3; \"a\\tb\""), "[abcd, ababab, a\tb]");
    assert_eq!(eval("-\"ab\""), "[]");
    assert_eq!(runtime_kind("\"a\" - 1"), RuntimeErrorKind::IllegalOperation);
    assert_eq!(runtime_kind("\"a\" == \"a\""), RuntimeErrorKind::IllegalOperation);
}

#[test]
fn division_by_zero() {
    assert_eq!(runtime_kind("1 / 0"), RuntimeErrorKind::DivisionByZero);
    assert_eq!(runtime_kind("1 // 0"), RuntimeErrorKind::DivisionByZero);
    assert_eq!(runtime_kind("1 % 0.0"), RuntimeErrorKind::DivisionByZero);
}

#[test]
fn integer_overflow_is_an_error() {
    assert_eq!(runtime_kind("9223372036854775807 + 1"), RuntimeErrorKind::Overflow);
    assert_eq!(runtime_kind("2 ^ 64"), RuntimeErrorKind::Overflow);
}

#[test]
fn lists_index_by_division_and_alias() {
    assert_eq!(eval("var l = [10, 20, 30]\nl / 0; l / -1"), "[[10, 20, 30], 10, 30]");
    assert!(matches!(runtime_kind("[1, 2] / 2"), RuntimeErrorKind::IndexOutOfBounds { .. }));
    assert_eq!(eval("var a = [1]\nvar b = a\nappend(b, 2)\nlen(a)"), "[[1, 2], [1, 2], 0, 2]");
}

#[test]
fn self_containing_containers_print_and_compare() {
    assert!(eval("var a = [1]\nappend(a, a)\nto_str(a)").ends_with(", [1, [...]]]"));
    assert_eq!(eval("var d = {}\nset(d, \"self\", d)\nd"),
               "[{\"self\": {...}}, 0, {\"self\": {...}}]");

    let value = run("<test>", "var a = [1]\nappend(a, a)\nvar b = [1]\nappend(b, b)\na; b").unwrap();
    let results = value.as_list().unwrap().borrow().clone();
    let count = results.len();
    assert_eq!(results[count - 2], results[count - 1]);
}

#[test]
fn dictionaries() {
    assert_eq!(eval("{\"a\": 1, \"b\": \"x\"}"), "[{\"a\": 1, \"b\": \"x\"}]");
    assert_eq!(eval("{\"a\": 1, \"a\": 2}"), "[{\"a\": 2}]");
    assert_eq!(eval("var d = {}\nset(d, \"k\", 4)\nget(d, \"k\"); has_key(d, \"k\"); has_key(d, \"z\")"),
               "[{\"k\": 4}, 0, 4, 1, 0]");
    assert_eq!(eval("var d = {}\nvar e = d\nset(e, \"k\", 1)\nget(d, \"k\")"),
               "[{\"k\": 1}, {\"k\": 1}, 0, 1]");
}

#[test]
fn if_chains() {
    assert_eq!(eval("if 0: 1 elif 2: 2 else: 3"), "[2]");
    assert_eq!(eval("if 0: 1"), "[0]");
    assert_eq!(eval("var x = 0\nif 1:\n  var x = 7\nelse:\n  var x = 8\nend\nx"), "[0, 0, 7]");
}

#[test]
fn counting_loops() {
    assert_eq!(eval("for i = 0 to 5: i"), "[[0, 1, 2, 3, 4]]");
    assert_eq!(eval("for i = 5 to 5: i"), "[[]]");
    assert_eq!(eval("for i = 5 to 0 step -2: i"), "[[5, 3, 1]]");
    assert_eq!(eval("var n = 0\nfor i = 0 to 4:\n  var n = n + i\nend\nn"), "[0, 0, 6]");
}

#[test]
fn for_each_and_while_loops() {
    assert_eq!(eval("for x in [1, 2, 3]: x * x"), "[[1, 4, 9]]");
    assert_eq!(eval("var i = 0\nwhile i < 3: var i = i + 1"), "[0, [1, 2, 3]]");
    assert!(matches!(runtime_kind("for x in 5: x"), RuntimeErrorKind::TypeError { .. }));
}

#[test]
fn break_and_continue() {
    assert_eq!(eval("for i = 0 to 6: if i % 2: continue else: i"), "[[0, 2, 4]]");
    assert_eq!(eval("for i = 0 to 100: if i == 3: break else: i"), "[[0, 1, 2]]");
    assert_eq!(eval("var i = 0\nwhile 1:\n  var i = i + 1\n  if i > 4: break\nend\ni"), "[0, 0, 5]");
}

#[test]
fn functions_and_calls() {
    assert_eq!(eval("func add(a, b) -> a + b\nadd(2, 3)").split(", ").last(), Some("5]"));
    assert_eq!(eval("var sq = func (x) -> x * x\nsq(9)").split(", ").last(), Some("81]"));
    assert_eq!(eval("func fib(n) -> if n < 2: n else: fib(n - 1) + fib(n - 2)\nfib(15)").split(", ").last(),
               Some("610]"));
    assert_eq!(eval("func f() {\n  var x = 1\n}\nf()").split(", ").last(), Some("0]"));
    assert_eq!(eval("func f(n) {\n  if n > 0: return n\n  return -1\n}\n[f(3), f(0)]").split(", ").last(),
               Some("-1]]"));
}

#[test]
fn default_and_keyword_arguments() {
    let src = "func greet(name, greeting=\"Hi\") -> greeting + \" \" + name\n\
               [greet(\"Ada\"), greet(\"Bob\", greeting=\"Yo\"), greet(\"Cy\")]";
    assert!(eval(src).ends_with("[Hi Ada, Yo Bob, Hi Cy]]"));

    assert_eq!(runtime_kind("func f(a, b=1) -> a + b\nf(1, c=2)"),
               RuntimeErrorKind::NoSuchArgument { name: "c".to_string() });
    assert_eq!(runtime_kind("func f(a, b=1) -> a + b\nf(1, 2)"),
               RuntimeErrorKind::TooManyArguments { name:  "f".to_string(),
                                                    count: 1, });
    assert_eq!(runtime_kind("func f(a, b) -> a\nf(1)"),
               RuntimeErrorKind::TooFewArguments { name:  "f".to_string(),
                                                   count: 1, });
}

#[test]
fn functions_close_over_their_scope() {
    let src = "func outer(x) {\n  return func (y) -> x + y\n}\nvar add5 = outer(5)\nadd5(1)";
    assert!(eval(src).ends_with(", 6]"));
}

#[test]
fn function_names_are_unique_globally() {
    assert_eq!(runtime_kind("func f() -> 1\nfunc f() -> 2"),
               RuntimeErrorKind::FunctionAlreadyDefined { name: "f".to_string() });
    assert_eq!(runtime_kind("func len(x) -> x"),
               RuntimeErrorKind::FunctionAlreadyDefined { name: "len".to_string() });
}

#[test]
fn calling_a_non_function_is_illegal() {
    assert_eq!(runtime_kind("var x = 3\nx(1)"), RuntimeErrorKind::IllegalOperation);
    assert_eq!(runtime_kind("var x = 3\nx(1, y=2)"), RuntimeErrorKind::IllegalOperation);
}

#[test]
fn top_level_return() {
    assert_eq!(eval("var x = 1\nreturn x + 1\nvar y = 5"), "2");
}

#[test]
fn value_display() {
    assert_eq!(eval("5; 5.0; 0.25; [1, [2, \"s\"]]"), "[5, 5.0, 0.25, [1, [2, s]]]");
    assert_eq!(eval("func f() -> 1\nf; len"), "[<function f>, <function f>, <built-in function len>]");
    assert_eq!(eval("func () -> 1"), "[<function <anonymous>>]");
}

#[test]
fn number_and_string_conversions() {
    assert_eq!(eval("to_int(to_str(42)); to_float(\"2.5\"); to_int(3.9); to_str(1.5)"), "[42, 2.5, 3, 1.5]");
    assert!(matches!(runtime_kind("to_int(\"abc\")"), RuntimeErrorKind::TypeError { .. }));
    assert!(matches!(runtime_kind("to_str(len)"), RuntimeErrorKind::TypeError { .. }));
}

#[test]
fn printed_numbers_and_strings_evaluate_to_themselves() {
    for literal in ["42",
                    "-7",
                    "2.5",
                    "0.125",
                    "3.0",
                    "100000000000000000.0",
                    "0.00001",
                    "1.5e-7",
                    "\"text\"",
                    r#""say \"hi\"""#,
                    r#""a\\b""#,
                    r#""two\nlines""#]
    {
        let first = run("<test>", literal).unwrap();
        let printed = first.as_list().unwrap().borrow()[0].repr();
        let second = run("<test>", &printed).unwrap();
        assert_eq!(first, second, "{literal} printed as {printed}");
    }
}

#[test]
fn type_predicates() {
    assert_eq!(eval("is_number(1); is_string(\"s\"); is_list([]); is_function(len); is_function(1)"),
               "[1, 1, 1, 1, 0]");
}

#[test]
fn list_builtins() {
    assert_eq!(eval("var l = [1, 2, 3]\ninsert(l, 1, 9)\npop(l, -1)\nl"), "[[1, 9, 2], 0, 3, [1, 9, 2]]");
    assert_eq!(eval("var l = [1]\nextend(l, l)\nl"), "[[1, 1], 0, [1, 1]]");
    assert_eq!(eval("var l = [3, 1, 2]\nsort(l); l"), "[[3, 1, 2], [1, 2, 3], [3, 1, 2]]");
    assert_eq!(runtime_kind("insert([1], 5, 0)"),
               RuntimeErrorKind::IndexOutOfBounds { details: "Second argument must be less than length of list".to_string() });
    assert_eq!(runtime_kind("len(\"abc\")"),
               RuntimeErrorKind::TypeError { details: "Argument must be a list".to_string() });
    assert_eq!(runtime_kind("append(1, 2)"),
               RuntimeErrorKind::TypeError { details: "First argument must be a list".to_string() });
}

#[test]
fn string_builtins() {
    assert_eq!(eval("concat(\"a\", \"b\"); split_char(\"x-y\", \"-\"); slice(\"hello\", 1, 3)"),
               "[ab, [x, y], el]");
    assert_eq!(eval("frequency(\"banana\", \"a\"); findIndex(\"banana\", \"n\")"), "[3, 2]");
    assert!(matches!(runtime_kind("slice(\"abc\", 0, 9)"), RuntimeErrorKind::IndexOutOfBounds { .. }));
    assert_eq!(runtime_kind("split_char(\"abc\", \"bc\")"),
               RuntimeErrorKind::TypeError { details: "Second argument must be a single character string".to_string() });
}

#[test]
fn math_builtins() {
    assert_eq!(eval("abs(-3); abs(2.5); min(4, 2); max(4, 2)"), "[3, 2.5, 2, 4]");
    assert_eq!(eval("range(1, 4); fact(5); oct(8)"), "[[1, 2, 3], 120, 0o10]");
    assert_eq!(eval("is_prime(97); is_prime(91); is_prime(2)"), "[1, 0, 1]");
    assert!(matches!(runtime_kind("fact(1.5)"), RuntimeErrorKind::DomainError { .. }));
    assert!(matches!(runtime_kind("range(0, 1.5)"), RuntimeErrorKind::DomainError { .. }));
}

#[test]
fn builtin_arity_is_checked() {
    assert_eq!(runtime_kind("len()"),
               RuntimeErrorKind::TooFewArguments { name:  "len".to_string(),
                                                   count: 1, });
    assert_eq!(runtime_kind("print(1, 2)"),
               RuntimeErrorKind::TooManyArguments { name:  "print".to_string(),
                                                    count: 1, });
    assert_eq!(runtime_kind("len(list=[1])"), RuntimeErrorKind::NoSuchArgument { name: "list".to_string() });
}

#[test]
fn lexical_errors() {
    let error = assert_failure("var $ = 1");
    assert_eq!(error.to_string(), "Illegal Character: '$'\nFile <test>, line 1\n\nvar $ = 1\n    ^");

    assert!(matches!(assert_failure("1 ! 2"), Error::Lex(_)));
    assert!(matches!(assert_failure("1.2.3"), Error::Lex(_)));
    assert!(matches!(assert_failure("\"open"), Error::Lex(_)));
}

#[test]
fn syntax_errors() {
    let error = assert_failure("if 1 2");
    assert_eq!(error.to_string(), "Invalid Syntax: Expected ':'\nFile <test>, line 1\n\nif 1 2\n     ^");

    assert!(matches!(assert_failure("1 +"), Error::Parse(_)));
    assert!(matches!(assert_failure("(1"), Error::Parse(_)));
    assert!(matches!(assert_failure("for i = 0 to 3:\n  i\n"), Error::Parse(_)));
    assert!(matches!(assert_failure("if 1:\n  2\n"), Error::Parse(_)));
}

#[test]
fn runtime_error_report() {
    let error = run("main.kode", "var x = 1 / 0").unwrap_err();
    assert_eq!(error.to_string(),
               "Traceback (most recent call last):\n  File main.kode, line 1, in <program>\nRuntime Error: \
                Division by zero\n\nvar x = 1 / 0\n            ^");
}

#[test]
fn runtime_error_traceback_lists_calls() {
    let error = run("main.kode", "func inner() -> 1 / 0\nfunc outer() -> inner()\nouter()").unwrap_err();
    let report = error.to_string();
    assert!(report.starts_with("Traceback (most recent call last):\n  File main.kode, line 3, in <program>\n  \
                                File main.kode, line 2, in outer\n  File main.kode, line 1, in inner\n"),
            "{report}");
    assert!(report.contains("Runtime Error: Division by zero"));
}

#[test]
fn call_depth_is_limited() {
    let mut session = Interpreter::with_config(Config { max_call_depth: Some(32) });
    assert_eq!(session.config().max_call_depth, Some(32));
    let error = session.run("<test>", "func down(n) -> down(n + 1)\ndown(0)", "")
                       .unwrap_err();
    assert_eq!(error.runtime_kind(), Some(&RuntimeErrorKind::CallDepthExceeded { limit: 32 }));
    assert_eq!(session.depth(), 0);

    let value = session.run("<test>", "func count(n) -> if n == 0: 0 else: 1 + count(n - 1)\ncount(20)", "")
                       .unwrap();
    assert!(value.to_string().ends_with(", 20]"));
}

#[test]
fn deep_recursion_hits_the_depth_limit_on_a_default_thread() {
    let handle = std::thread::spawn(|| {
        let within = run("<test>", "func count(n) -> if n == 0: 0 else: 1 + count(n - 1)\ncount(200)").map(|value| value.to_string())
                                                                                                 .map_err(|e| e.to_string());
        let beyond = match run("<test>", "func count(n) -> if n == 0: 0 else: 1 + count(n - 1)\ncount(100000)") {
            Err(Error::Runtime(error)) => Some(error.kind),
            _ => None,
        };
        (within, beyond)
    });

    let (within, beyond) = handle.join().unwrap();
    assert_eq!(within.as_deref(), Ok("[<function count>, 200]"));
    assert_eq!(beyond, Some(RuntimeErrorKind::CallDepthExceeded { limit: 256 }));
}

#[test]
fn sessions_keep_globals_between_executions() {
    let mut session = Interpreter::new();
    session.execute("<stdin>", "var n = 2").unwrap();
    session.execute("<stdin>", "func twice(x) -> x * 2").unwrap();
    assert_eq!(session.execute("<stdin>", "twice(n)").unwrap().to_string(), "[4]");

    session.run("<stdin>", "1", "").unwrap();
    assert!(session.execute("<stdin>", "n").is_err());
}

#[test]
fn import_as_registers_a_module() {
    let loader = MemoryLoader::new(&[("geometry.kode", "var unit = 1\nfunc square(x) -> x * x")]);
    let mut session = Interpreter::new().with_loader(loader);

    let value = session.run("main.kode", "importAs(\"geometry.kode\", \"geo\")\ngeo.square(4) + geo.unit", "")
                       .unwrap();
    assert_eq!(value.to_string(), "[0, 17]");
    assert_eq!(session.modules().len(), 1);

    let error = session.run("main.kode", "nope.square(4)", "").unwrap_err();
    assert_eq!(error.runtime_kind(),
               Some(&RuntimeErrorKind::ModuleNotDefined { module: "nope".to_string() }));
}

#[test]
fn latest_import_wins() {
    let loader = MemoryLoader::new(&[("a.kode", "var v = 1"), ("b.kode", "var v = 2")]);
    let mut session = Interpreter::new().with_loader(loader);

    let value = session.run("main.kode", "importAs(\"a.kode\", \"m\")\nimportAs(\"b.kode\", \"m\")\nm.v", "")
                       .unwrap();
    assert_eq!(value.to_string(), "[0, 0, 2]");
}

#[test]
fn host_run_in_unknown_module_fails() {
    let error = Interpreter::new().run("<test>", "1", "missing").unwrap_err();
    assert_eq!(error.runtime_kind(),
               Some(&RuntimeErrorKind::ModuleNotDefined { module: "missing".to_string() }));
}

#[test]
fn module_failures_are_wrapped() {
    let loader = MemoryLoader::new(&[("bad.kode", "var x = 1 / 0")]);
    let mut session = Interpreter::new().with_loader(loader);

    let error = session.run("main.kode", "importAs(\"bad.kode\", \"bad\")", "").unwrap_err();
    let Some(RuntimeErrorKind::ScriptFailed { path, details }) = error.runtime_kind() else {
        panic!("unexpected error:\n{error}");
    };
    assert_eq!(path, "bad.kode");
    assert!(details.contains("Division by zero"));

    let error = session.run("main.kode", "run(\"missing.kode\")", "").unwrap_err();
    assert!(matches!(error.runtime_kind(), Some(RuntimeErrorKind::IoError { .. })));

    let error = session.run("main.kode", "run(\"notes.txt\")", "").unwrap_err();
    assert_eq!(error.runtime_kind(), Some(&RuntimeErrorKind::ExtensionError));
}

#[test]
fn run_builtin_replaces_globals() {
    let loader = MemoryLoader::new(&[("setup.kode", "var b = 5")]);
    let mut session = Interpreter::new().with_loader(loader);

    session.execute("<stdin>", "var a = 1").unwrap();
    session.execute("<stdin>", "run(\"setup.kode\")").unwrap();
    assert_eq!(session.execute("<stdin>", "b").unwrap().to_string(), "[5]");
    assert!(session.execute("<stdin>", "a").is_err());
}

#[test]
fn fixtures_run_from_disk() {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures");
    let geometry = fixtures.join("geometry.kode").display().to_string();

    let src = format!("importAs(\"{geometry}\", \"geo\")\ngeo.area(3, 4)");
    assert!(eval(&src).ends_with(", 12]"));

    let src = format!("run(\"{}\")", fixtures.join("failing.kode").display());
    assert!(matches!(runtime_kind(&src), RuntimeErrorKind::ScriptFailed { .. }));
}

#[test]
fn fixtures_report_their_own_errors() {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures");
    let path = fixtures.join("failing.kode");
    let text = fs::read_to_string(&path).unwrap();

    let error = run(&path.display().to_string(), &text).unwrap_err();
    assert!(matches!(error.runtime_kind(), Some(RuntimeErrorKind::IndexOutOfBounds { .. })));
    assert!(error.to_string().contains("in pick"));
}

#[test]
fn stray_signals() {
    assert_success("break");
    assert_success("continue");
    assert_success("func f() {\n  break\n}\nf()");
}
