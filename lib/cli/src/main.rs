use clap::{Args, Parser, Subcommand};
use elapsed::measure_time;
use itertools::Itertools;
use log::info;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use prop_nexus_core::cnf::Cnf;
use prop_nexus_core::{Engine, Form, Options, SolveResult};

mod parsing;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Normal forms, satisfiability and equivalence of propositional formulas")]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    #[clap(flatten)]
    budget: Budget,

    /// Treat upper- and lower-case letters as the same variable
    #[clap(long, global = true)]
    fold_case: bool,

    /// Log level
    #[clap(long, global = true, default_value = "warn", parse(try_from_str = parsing::parse_level))]
    log: LevelFilter,
}

#[derive(Args, Debug)]
struct Budget {
    /// Abort after this many seconds
    #[clap(long, global = true, value_name = "SECS", parse(try_from_str = parsing::parse_seconds))]
    timeout: Option<std::time::Duration>,

    /// Abort once normalization creates more clauses
    #[clap(long, global = true, value_name = "N")]
    max_clauses: Option<u64>,

    /// Abort after this many distribution steps
    #[clap(long, global = true, value_name = "N")]
    max_distributions: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a formula and print it back
    Parse {
        /// Formula, or `-` to read standard input
        formula: String,

        /// Print the syntax tree instead
        #[clap(long)]
        tree: bool,
    },
    /// Conjunctive normal form
    Cnf {
        formula: String,

        /// Print DIMACS instead
        #[clap(long)]
        dimacs: bool,

        /// Print the applied rewrite rules
        #[clap(long)]
        trace: bool,
    },
    /// Disjunctive normal form
    Dnf {
        formula: String,

        /// Print the applied rewrite rules
        #[clap(long)]
        trace: bool,
    },
    /// Satisfiability, with a witness
    Sat { formula: String },
    /// Logical equivalence of two formulas
    Equiv {
        lhs: String,
        rhs: String,

        /// Print the laws that rewrite both formulas to the same CNF
        #[clap(long)]
        trace: bool,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();
    TermLogger::init(args.log, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;
    info!("args = {:?}", args);

    let options = Options {
        fold_case: args.fold_case,
        max_distributions: args.budget.max_distributions,
        max_clauses: args.budget.max_clauses,
        timeout: args.budget.timeout,
    };
    let engine = Engine::new(options);

    let (elapsed, result) = measure_time(|| run(&engine, &args.command));
    info!("{:?} done in {}", args.command, elapsed);
    result
}

fn run(engine: &Engine, command: &Command) -> color_eyre::Result<()> {
    match command {
        Command::Parse { formula, tree } => {
            let expr = engine.parse(parsing::read_formula(formula)?)?;
            if *tree {
                println!("{:#}", expr);
            } else {
                println!("{}", expr);
            }
        }
        Command::Cnf { formula, dimacs, trace } => {
            let normalized = engine.normalize(parsing::read_formula(formula)?, Form::Cnf)?;
            if *dimacs {
                let (cnf, table) = Cnf::from_normal_form(&normalized.form);
                print!("{}", cnf.to_dimacs(&table));
            } else {
                println!("{}", normalized.form);
            }
            if *trace {
                print_trace(&normalized.trace);
            }
        }
        Command::Dnf { formula, trace } => {
            let normalized = engine.normalize(parsing::read_formula(formula)?, Form::Dnf)?;
            println!("{}", normalized.form);
            if *trace {
                print_trace(&normalized.trace);
            }
        }
        Command::Sat { formula } => match engine.solve(parsing::read_formula(formula)?)? {
            SolveResult::Sat(model) => {
                println!("SAT");
                println!("{}", model);
            }
            SolveResult::Unsat => println!("UNSAT"),
        },
        Command::Equiv { lhs, rhs, trace } => {
            let result = engine.check_equivalence(parsing::read_formula(lhs)?, parsing::read_formula(rhs)?)?;
            match result.counterexample {
                None => {
                    println!("EQUIVALENT");
                    if *trace {
                        print_trace(&result.trace);
                    }
                }
                Some(model) => {
                    println!("NOT EQUIVALENT");
                    println!("counterexample: {}", model);
                }
            }
        }
    }
    Ok(())
}

fn print_trace(trace: &prop_nexus_core::formula::trace::Trace) {
    if trace.is_empty() {
        println!("rules: none");
    } else {
        println!("rules: {}", trace.rules().map(|rule| format!("{:#}", rule)).join("; "));
    }
}
