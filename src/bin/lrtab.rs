//! Command-line front end: builds the tables for a grammar and reports,
//! for each input string, whether the grammar accepts it.

use std::fs;
use std::path::PathBuf;
use anyhow::Context;
use clap::Parser as _;
use lrtab::{Grammar, Parser};

#[derive(clap::Parser)]
#[command(about = "Check strings against a grammar with an LR automaton")]
struct Args {
  /// Production rule such as `S->AB`; may be repeated
  #[arg(short = 'r', long = "rule")]
  rules: Vec<String>,

  /// File with one rule per line; blank lines and `#` comments are skipped
  #[arg(short = 'g', long)]
  grammar: Option<PathBuf>,

  /// Start nonterminal
  #[arg(long, default_value_t = lrtab::grammar::DEFAULT_START)]
  start: char,

  /// Print the item sets and their transitions
  #[arg(long)]
  automaton: bool,

  /// Print the action and goto tables
  #[arg(long)]
  tables: bool,

  /// Print table cells that were written more than once
  #[arg(long)]
  conflicts: bool,

  /// Enable debug logging
  #[arg(short = 'v', long)]
  verbose: bool,

  /// Strings to check
  inputs: Vec<String>,
}

fn read_rules(args: &Args) -> anyhow::Result<Vec<String>> {
  let mut rules = Vec::new();
  if let Some(path) = &args.grammar {
    let text = fs::read_to_string(path)
      .with_context(|| format!("cannot read grammar file {}", path.display()))?;
    rules.extend(text.lines()
      .map(str::trim)
      .filter(|line| !line.is_empty() && !line.starts_with('#'))
      .map(str::to_owned));
  }
  rules.extend(args.rules.iter().cloned());
  Ok(rules)
}

fn main() -> anyhow::Result<()> {
  let args = Args::parse();

  let level = if args.verbose { "debug" } else { "warn" };
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

  let rules = read_rules(&args)?;
  let grammar = Grammar::with_start(&rules, args.start)?;
  let parser = Parser::new(grammar);

  if args.automaton {
    print!("{}", parser.automaton());
  }
  if args.tables {
    print!("{}", parser);
  }
  if args.conflicts {
    for conflict in parser.conflicts() {
      println!("{}", conflict);
    }
  }

  for input in &args.inputs {
    let verdict = if parser.recognize(input) { "accept" } else { "reject" };
    println!("{:?}\t{}", input, verdict);
  }

  Ok(())
}
