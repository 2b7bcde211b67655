use std::fmt::Write;

use crate::interpreter::{position::Span, scope::Context};

/// Renders the report for a lexical or syntax error.
///
/// ```text
/// Invalid Syntax: Expected ':'
/// File main.kode, line 3
///
/// if x 1
///      ^
/// ```
#[must_use]
pub fn describe(headline: &str, span: Option<&Span>) -> String {
    match span {
        Some(span) => format!("{headline}\nFile {}, line {}\n\n{}",
                              span.start.filename(),
                              span.start.line + 1,
                              string_with_arrows(span)),
        None => headline.to_string(),
    }
}

/// Renders the `Traceback` block of a runtime error, outermost call first.
#[must_use]
pub fn traceback(span: Option<&Span>, context: Option<&Context>) -> String {
    let mut frames = Vec::new();
    let mut position = span.map(|span| &span.start);
    let mut current = context;

    while let Some(ctx) = current {
        frames.push(match position {
                        Some(pos) => format!("  File {}, line {}, in {}\n",
                                             pos.filename(),
                                             pos.line + 1,
                                             ctx.display_name),
                        None => format!("  In {}\n", ctx.display_name),
                    });
        position = ctx.parent_entry_pos.as_ref();
        current = ctx.parent.as_deref();
    }

    let mut text = String::from("Traceback (most recent call last):\n");
    for frame in frames.iter().rev() {
        text.push_str(frame);
    }
    text
}

/// Quotes the source lines covered by `span` and underlines the covered
/// columns with `^`.
///
/// # Example
/// ```
/// use kode::{error::report::string_with_arrows, interpreter::lexer::tokenize};
///
/// let tokens = tokenize("<stdin>", "var x = 1 + y").unwrap();
/// let y = &tokens[5];
/// assert_eq!(string_with_arrows(&y.span), "var x = 1 + y\n            ^");
/// ```
#[must_use]
pub fn string_with_arrows(span: &Span) -> String {
    let lines: Vec<&str> = span.start.file.text.split('\n').collect();
    let first = span.start.line;
    let last = span.end.line.max(first);

    let mut text = String::new();
    for line_no in first..=last {
        let Some(line) = lines.get(line_no) else {
            break;
        };
        let line = line.replace('\t', "");
        let width = line.chars().count();
        let col_start = if line_no == first { span.start.column } else { 0 };
        let col_end = if line_no == last { span.end.column } else { width };
        let carets = col_end.saturating_sub(col_start).max(1);

        if !text.is_empty() {
            text.push('\n');
        }
        let _ = write!(text, "{line}\n{}{}", " ".repeat(col_start), "^".repeat(carets));
    }
    text
}
