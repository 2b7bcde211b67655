use tracing::debug;

use crate::{
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::{CallSite, expect_string},
        },
        value::core::Value,
    },
};

/// Runs another script as a fresh program.
///
/// The global table is reset before the script runs, so the script sees
/// only the built-ins, and definitions it makes replace the caller's
/// globals for the rest of the session.
///
/// # Errors
/// - `TypeError` if the argument is not a string.
/// - `ExtensionError` if the path does not end in `.kode`.
/// - `IoError` if the file cannot be read.
/// - `ScriptFailed` wrapping the report of any error inside the script.
pub fn run(interpreter: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    let path = expect_string(&args[0], site, "Argument must be a string")?;
    let text = load_script(interpreter, path, site)?;

    interpreter.run(path, &text, "")
               .map_err(|error| {
                   site.error(RuntimeErrorKind::ScriptFailed { path:    path.to_string(),
                                                               details: error.to_string(), })
               })?;
    Ok(site.value(Value::null()))
}

/// Runs a script in a new module table registered under `name`.
///
/// Top-level definitions of the script are then reachable as `name.symbol`
/// from anywhere in the session. Importing under a name that is already
/// registered shadows the earlier module.
///
/// # Errors
/// The errors of [`run`], with the argument checks applied to both
/// arguments.
pub fn import_as(interpreter: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    let path = expect_string(&args[0], site, "First argument must be a string")?;
    let name = expect_string(&args[1], site, "Second argument must be a string")?;
    let text = load_script(interpreter, path, site)?;

    debug!(path, module = name, "importing module");
    interpreter.register_module(name);
    interpreter.run(path, &text, name)
               .map_err(|error| {
                   site.error(RuntimeErrorKind::ScriptFailed { path:    path.to_string(),
                                                               details: error.to_string(), })
               })?;
    Ok(site.value(Value::null()))
}

/// Checks the extension of a script path and reads the script.
fn load_script(interpreter: &Interpreter, path: &str, site: &CallSite) -> EvalResult<String> {
    if !path.ends_with(".kode") {
        return Err(site.error(RuntimeErrorKind::ExtensionError));
    }

    interpreter.load_source(path).map_err(|error| {
                                     site.error(RuntimeErrorKind::IoError { path:    path.to_string(),
                                                                            details: error.to_string(), })
                                 })
}
