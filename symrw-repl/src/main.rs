mod error;
mod options;

use clap::Parser;
use error::Error;
use options::{Args, Strategy};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, io::{self, IsTerminal, Read}, process::ExitCode};
use symrw_engine::{
    catalog,
    parse_expr,
    simplify_with,
    transform::{fold_constants, Transformation},
    Expr,
    Measure,
    MiniMax,
    RuleSet,
    Step,
};
use tracing_subscriber::EnvFilter;

/// Everything needed to simplify an expression.
struct Session {
    args: Args,
    rules: RuleSet,
    measure: Box<dyn Measure>,
}

impl Session {
    /// Builds the rule set and measure selected by the arguments.
    fn new(args: Args) -> Result<Self, Error> {
        let all = catalog::all_rules()?;
        let rules = if args.tags.is_empty() {
            all
        } else {
            all.filter_rules(&args.tags)
        };
        tracing::debug!(rules = rules.len(), "rules loaded");

        let measure = args.measure_kind().build();
        Ok(Self { args, rules, measure })
    }

    /// Parses and simplifies the given input, returning the result and the steps taken.
    fn evaluate(&self, input: &str) -> Result<(Expr, Vec<Step>), Error> {
        let expr = parse_expr(input)?;
        let transformations: [&dyn Transformation; 1] = [&fold_constants];
        let mut steps = Vec::new();

        let result = match self.args.strategy {
            Strategy::Greedy => simplify_with(
                &expr,
                &self.rules,
                &transformations,
                self.measure.as_ref(),
                &self.args.simplify_options(),
                &mut steps,
            ),
            Strategy::Minimax => {
                let mut search = MiniMax::new(
                    expr,
                    &self.rules,
                    &transformations,
                    self.measure.as_ref(),
                    self.args.minimax_options(),
                );
                search.run_with(&mut steps);
                search.into_root()
            },
        };

        Ok((result, steps))
    }

    /// Simplifies a single line of input, printing the result or the error.
    fn read_eval(&self, input: &str) {
        if input.trim().is_empty() {
            return;
        }

        match self.evaluate(input) {
            Ok((result, steps)) => {
                if self.args.steps {
                    for step in &steps {
                        println!("  {}", step);
                    }
                }
                println!("{}", result);
            },
            Err(err) => err.report_to_stderr(input),
        }
    }
}

/// Reads the whole input from the given file, or from stdin.
fn read_input(args: &Args) -> Result<Option<String>, Error> {
    if let Some(path) = &args.file {
        return Ok(Some(fs::read_to_string(path)?));
    }

    if !io::stdin().is_terminal() {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        return Ok(Some(input));
    }

    Ok(None)
}

/// Runs the interactive mode.
fn repl(session: &Session) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;

    fn process_line(rl: &mut DefaultEditor, session: &Session) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;
        session.read_eval(&input);
        Ok(())
    }

    loop {
        if let Err(err) = process_line(&mut rl, session) {
            return match err {
                ReadlineError::Eof | ReadlineError::Interrupted => Ok(()),
                err => Err(err),
            };
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let input = match read_input(&args) {
        Ok(input) => input,
        Err(err) => {
            err.report_to_stderr("");
            return ExitCode::FAILURE;
        },
    };

    let session = match Session::new(args) {
        Ok(session) => session,
        Err(err) => {
            err.report_to_stderr("");
            return ExitCode::FAILURE;
        },
    };

    match input {
        Some(input) => input.lines().for_each(|line| session.read_eval(line)),
        None => {
            if let Err(err) = repl(&session) {
                eprintln!("{}", err);
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session(args: &[&str]) -> Session {
        let args = Args::try_parse_from(std::iter::once("symrw").chain(args.iter().copied())).unwrap();
        Session::new(args).unwrap()
    }

    #[test]
    fn greedy_pythagorean() {
        let session = session(&[]);
        let (result, steps) = session.evaluate("sin(y)^2 + cos(y)^2").unwrap();
        assert_eq!(result, Expr::from(1));
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn folding() {
        let session = session(&["--tags", "pow"]);
        let (result, _) = session.evaluate("(2 + 2) * (2 + 2)").unwrap();
        assert_eq!(result, Expr::from(16));
    }

    #[test]
    fn tag_filter() {
        assert_eq!(session(&["--tags", "pow"]).rules.len(), 6);
        assert_eq!(session(&["--tags", "trig"]).rules.len(), 12);
        assert_eq!(session(&[]).rules.len(), 18);
    }

    #[test]
    fn parse_errors_propagate() {
        let session = session(&[]);
        assert!(matches!(session.evaluate("sin(x"), Err(Error::Engine(_))));
    }
}
