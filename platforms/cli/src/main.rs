mod render;

use clap::Parser;
use std::process::ExitCode;
use tape_machine::{Machine, ProgramManager, Symbol, BLANK_DISPLAY, PROGRAMS};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The predefined program to execute
    #[clap(short, long)]
    program: Option<String>,

    /// The input word; defaults to the program's sample input.
    /// Separate symbols with spaces to enter primed or multi-character symbols
    #[clap(short, long)]
    input: Option<String>,

    /// Print the machine before each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,

    /// Print the command table before running
    #[clap(short, long)]
    table: bool,

    /// Stop with an error after this many steps
    #[clap(short, long)]
    max_steps: Option<usize>,

    /// List the predefined programs
    #[clap(short, long)]
    list: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list {
        for program in PROGRAMS {
            println!("{:<18} {}", program.name, program.description);
        }
        return ExitCode::SUCCESS;
    }

    let Some(name) = cli.program.as_deref() else {
        eprintln!("No program given, use --list to see the available ones");
        return ExitCode::FAILURE;
    };
    let Some(program) = ProgramManager::get_program_by_name(name) else {
        eprintln!("Unknown program: {}", name);
        return ExitCode::FAILURE;
    };

    let mut machine: Machine = match (program.build)() {
        Ok(machine) => machine,
        Err(e) => {
            error!(program = name, "failed to build machine: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(limit) = cli.max_steps {
        machine = machine.with_step_limit(limit);
    }

    let word = cli.input.as_deref().unwrap_or(program.input).to_string();
    println!("Input word: {}", word);

    if cli.table {
        println!("\n{}\n", render::table(machine.table()));
    }

    let width = render::cell_width(machine.alphabet());
    let debug = cli.debug;
    let result = machine.run_traced(parse_word(&word), |snapshot| {
        if debug {
            println!("{}", render::snapshot(snapshot, width));
        }
    });

    match result {
        Ok(tape) => {
            println!("\nResult: {}", tape);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("\nMachine error: {}", e);
            println!("Tape: {}", machine.tape());
            ExitCode::FAILURE
        }
    }
}

/// Splits an input word into symbols.
///
/// A word containing whitespace is split on it, so tokens such as `1'` can be entered;
/// otherwise every character is one symbol. `_` stands for the blank.
fn parse_word(input: &str) -> Vec<Symbol> {
    let token = |t: &str| {
        if t == BLANK_DISPLAY {
            Symbol::Blank
        } else {
            Symbol::from(t)
        }
    };

    if input.contains(char::is_whitespace) {
        input.split_whitespace().map(token).collect()
    } else {
        input
            .chars()
            .map(|c| token(&c.to_string()))
            .collect()
    }
}
