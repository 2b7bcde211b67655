use std::io::{BufRead, Write};

use crate::{
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::{core::EvalResult, core::Interpreter, utils::CallSite},
        value::core::Value,
    },
};

/// Prints a value to standard output followed by a newline.
///
/// Strings print without quotes; every other value prints the way it
/// displays.
///
/// # Returns
/// Null.
pub fn print(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    println!("{}", args[0]);
    Ok(site.value(Value::null()))
}

/// Reads one line from standard input, without its line terminator.
pub fn input(_: &mut Interpreter, _: &[Value], site: &CallSite) -> EvalResult<Value> {
    let mut line = String::new();
    std::io::stdin().lock()
                    .read_line(&mut line)
                    .map_err(|error| {
                        site.error(RuntimeErrorKind::IoError { path:    "<stdin>".to_string(),
                                                               details: error.to_string(), })
                    })?;

    let text = line.trim_end_matches(['\n', '\r']);
    Ok(site.value(Value::string(text)))
}

/// Clears the terminal with an ANSI escape sequence.
pub fn clear(_: &mut Interpreter, _: &[Value], site: &CallSite) -> EvalResult<Value> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "\x1B[2J\x1B[1;1H").and_then(|()| stdout.flush())
                                      .map_err(|error| {
                                          site.error(RuntimeErrorKind::IoError { path:    "<stdout>".to_string(),
                                                                                 details: error.to_string(), })
                                      })?;
    Ok(site.value(Value::null()))
}
