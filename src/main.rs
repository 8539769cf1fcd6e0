//! Kaleidoscope compiler CLI entry point

use std::{
    fs::read_to_string,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use inkwell::context::Context;
use kaleidoscope::{
    driver::Driver,
    parser::precedence::{parse_precedence_override, PrecedenceTable},
    render_error,
};

#[derive(Parser, Debug)]
#[command(name = "kaleidoscope")]
#[command(about = "Compiles Kaleidoscope source to LLVM IR", long_about = None)]
struct Cli {
    /// Source file to compile (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Install or override a binary operator, e.g. `--precedence /=40`
    #[arg(long, value_name = "OP=PREC", value_parser = parse_precedence_override)]
    precedence: Vec<(char, i32)>,

    /// Also write the whole module to this `.ll` file
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout carries only IR
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();

    let cli = Cli::parse();

    let (source, file_name) = match read_source(cli.file.as_ref()) {
        Ok(read) => read,
        Err(error) => {
            eprintln!("Error: could not read input: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let mut precedence = PrecedenceTable::default();
    for (operator, value) in cli.precedence {
        precedence.install(operator, value);
    }

    let context = Context::create();
    let mut driver = Driver::new(&context, source.clone(), file_name, precedence);

    let mut failed = false;
    for result in driver.run() {
        match result {
            Ok(outcome) => println!("{}", outcome.get_ir()),
            Err(error) => {
                failed = true;
                eprint!("{}", render_error(&error, &source));
            }
        }
    }

    if let Some(output) = cli.output {
        if let Err(error) = driver.get_compiler().save_module_to_file(&output) {
            eprintln!("Error: could not write {}: {}", output.display(), error);
            return ExitCode::FAILURE;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn read_source(file: Option<&PathBuf>) -> io::Result<(String, Option<String>)> {
    match file {
        Some(path) => {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned());

            Ok((read_to_string(path)?, file_name))
        }
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;

            Ok((source, Some(String::from("<stdin>"))))
        }
    }
}
