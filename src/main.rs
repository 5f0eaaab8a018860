//! A Simple Machine Language interpreter.
//!
//! Translates an SML source file and executes it on a fresh machine.
//!
//! # Usage
//! ```text
//! sml <program-file> [OPTIONS]
//! ```
//!
//! # Arguments
//! - `program-file`: Path to the SML source to translate and run
//!
//! # Options
//! - `--show-program`: Print the translated program and label table before
//!   running

use sml::machine::Machine;
use sml::registry::OpcodeRegistry;
use sml::translator::Translator;
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage(&args[0]);
        process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    let path = &args[1];
    let mut show_program = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--show-program" => {
                show_program = true;
                i += 1;
            }
            other => {
                eprintln!("Unexpected argument: {}\n", other);
                print_usage(&args[0]);
                process::exit(1);
            }
        }
    }

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Cannot read {}: {}", path, e);
            process::exit(1);
        }
    };

    let registry = OpcodeRegistry::with_default_instruction_set();
    let (program, labels) = match Translator::new(&registry).translate(&source) {
        Ok(translated) => translated,
        Err(e) => {
            eprintln!("{}: translation failed\n{}", path, e);
            process::exit(1);
        }
    };

    if show_program {
        println!("{program}");
        println!("{labels}");
    }

    let mut machine = Machine::new(program, labels);
    machine.run();
    println!("{}", machine.registers());
}

const USAGE: &str = "\
Simple Machine Language interpreter

USAGE:
    {program} <program-file> [OPTIONS]

ARGS:
    <program-file>    Path to the SML source to translate and run

OPTIONS:
    --show-program    Print the translated program and label table before running
    -h, --help        Print this help message

EXAMPLES:
    # Run a program
    {program} countdown.sml

    # Inspect the translation first
    {program} countdown.sml --show-program
";

/// Prints usage information to stderr.
fn print_usage(program: &str) {
    eprintln!("{}", USAGE.replace("{program}", program));
}
