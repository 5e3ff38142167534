mod console;
mod display;

use clap::Parser;
use console::Console;
use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};
use tmsim::session::{DEFAULT_WINDOW, MAX_WINDOW};
use tmsim::types::MAX_EXECUTION_STEPS;
use tmsim::{MachineDefinition, ProgramLoader, ProgramManager, Session};
use tracing_subscriber::EnvFilter;

/// A single-tape Turing machine simulator for the console.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  tmsim-cli --builtin div3 --input 1001 --run 2
  tmsim-cli --program machines/palindrome.tm
  cat machine.tm | tmsim-cli --program - --run 0
  tmsim-cli --dir machines")]
struct Cli {
    /// The machine description file to execute, or `-` to read it from stdin
    #[clap(short, long, conflicts_with = "builtin")]
    program: Option<PathBuf>,

    /// Name of a built-in machine (see --list)
    #[clap(short, long)]
    builtin: Option<String>,

    /// Replace the tape input; characters outside the alphabet are dropped
    #[clap(short, long)]
    input: Option<String>,

    /// Run to completion, pausing K x 0.1s between steps, instead of opening the console
    #[clap(short, long, value_name = "K")]
    run: Option<u32>,

    /// Stop auto-runs after this many transitions
    #[clap(short, long, default_value_t = MAX_EXECUTION_STEPS)]
    max_steps: usize,

    /// Number of cells shown on each side of the head
    #[clap(short, long, default_value_t = DEFAULT_WINDOW, value_parser = parse_window)]
    window: usize,

    /// List the built-in machines
    #[clap(short, long)]
    list: bool,

    /// List the machine descriptions (`*.tm`) found in a directory
    #[clap(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Print the transition table
    #[clap(short, long)]
    dump: bool,

    /// Print the machine definition as JSON
    #[clap(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr so they never mix with the tape display
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list {
        list_programs();
        return Ok(());
    }

    if let Some(dir) = &cli.dir {
        list_directory(dir);
        return Ok(());
    }

    let definition = match load_definition(&cli) {
        Ok(definition) => definition,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!(
        start = definition.start_state(),
        transitions = definition.transition_count(),
        "definition loaded"
    );

    if cli.dump {
        print!("{definition}");
        return Ok(());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&definition)?);
        return Ok(());
    }

    let mut session = Session::new(definition);
    if let Some(input) = &cli.input {
        session.change_input(input);
    }

    let interactive = atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout);
    let mut console = Console::new(
        session,
        io::stdout(),
        cli.window,
        cli.max_steps,
        interactive,
    );

    match cli.run {
        Some(factor) => {
            console.auto_run(factor)?;
            console.show_tape()?;
        }
        None => console.run(io::stdin().lock())?,
    }

    Ok(())
}

/// Loads the machine named on the command line, from a file or the built-in catalog.
fn load_definition(cli: &Cli) -> Result<MachineDefinition, String> {
    if let Some(path) = &cli.program {
        if path.as_os_str() == "-" {
            let content = io::read_to_string(io::stdin())
                .map_err(|e| format!("Failed to read description from stdin: {e}"))?;
            ProgramLoader::load_program_from_string(&content).map_err(|e| e.to_string())
        } else {
            ProgramLoader::load_program(path).map_err(|e| e.to_string())
        }
    } else if let Some(name) = &cli.builtin {
        ProgramManager::get_program_by_name(name).map_err(|e| {
            format!(
                "{e}. Available: {}",
                ProgramManager::list_program_names().join(", ")
            )
        })
    } else {
        Err("Either --program or --builtin is required".to_string())
    }
}

fn parse_window(value: &str) -> Result<usize, String> {
    let window: usize = value.parse().map_err(|e| format!("{e}"))?;
    if window > MAX_WINDOW {
        return Err(format!("window must be at most {MAX_WINDOW}"));
    }
    Ok(window)
}

/// Prints a summary line for every loadable description in `dir`; failures go to stderr.
fn list_directory(dir: &Path) {
    for result in ProgramLoader::load_programs(dir) {
        match result {
            Ok((path, definition)) => println!(
                "{} - start: {}, states: {}, transitions: {}",
                path.display(),
                definition.start_state(),
                definition.states().len(),
                definition.transition_count()
            ),
            Err(e) => eprintln!("Error: {}", e),
        }
    }
}

fn list_programs() {
    for index in 0..ProgramManager::get_program_count() {
        if let Ok(info) = ProgramManager::get_program_info(index) {
            println!(
                "{}. {} - start: {}, states: {}, transitions: {}, tape: {}",
                info.index + 1,
                info.name,
                info.start_state,
                info.state_count,
                info.transition_count,
                info.initial_tape
            );
        }
    }
}
