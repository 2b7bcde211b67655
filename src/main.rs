use std::{
    fs,
    io::{self, BufRead, Write},
};

use clap::Parser;
use kode::interpreter::{
    evaluator::core::{Config, DEFAULT_MAX_CALL_DEPTH, Interpreter},
    value::core::Value,
};
use tracing_subscriber::EnvFilter;

/// kode runs KodeScript, a small imperative scripting language with
/// first-class functions, lists, dictionaries and modules.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells kode to treat the contents as the path of a `.kode` file.
    #[arg(short, long)]
    file: bool,

    /// Maximum number of nested function calls. Zero disables the limit.
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_depth: usize,

    /// The script to run. Without it an interactive session starts.
    contents: Option<String>,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_env("KODE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
                             .with_writer(io::stderr)
                             .init();

    let config = Config { max_call_depth: (args.max_depth > 0).then_some(args.max_depth) };
    let mut session = Interpreter::with_config(config);

    let Some(contents) = args.contents else {
        if let Err(e) = run_prompt(&mut session) {
            eprintln!("{e}");
            std::process::exit(1);
        }
        return;
    };

    let (filename, script) = if args.file {
        let script = fs::read_to_string(&contents).unwrap_or_else(|_| {
                                                      eprintln!("Failed to read the input file '{contents}'. Perhaps this file does not exist?");
                                                      std::process::exit(1);
                                                  });
        (contents, script)
    } else {
        ("<stdin>".to_string(), contents)
    };

    if let Err(e) = session.run(&filename, &script, "") {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Reads lines from stdin and executes each one in the same session, so
/// variables and functions survive between lines.
fn run_prompt(session: &mut Interpreter) -> io::Result<()> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        {
            let mut stdout = io::stdout().lock();
            stdout.write_all(b"kode > ")?;
            stdout.flush()?;
        }

        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        match session.execute("<stdin>", line.trim_end()) {
            Ok(value) => print_result(&value),
            Err(e) => eprintln!("{e}"),
        }
    }
    Ok(())
}

/// Prints the value of a line. A single statement prints its own value
/// rather than a one-element list.
fn print_result(value: &Value) {
    match value.as_list() {
        Some(elements) if elements.borrow().len() == 1 => {
            let element = elements.borrow()[0].clone();
            println!("{element}");
        },
        _ => println!("{value}"),
    }
}
