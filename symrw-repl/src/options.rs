use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use symrw_engine::{
    measure::{length, neg_length, Measure, Weighted},
    MiniMaxOptions,
    MiniMaxOptionsBuilder,
    SimplifyOptions,
};

/// Simplifies expressions with the built-in rewrite rules.
///
/// Expressions are read one per line from FILE, from stdin if it is not a terminal, or
/// interactively otherwise. Set `RUST_LOG=symrw_engine=debug` to watch the search.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// File to read expressions from, one per line.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// The search strategy.
    #[arg(short, long, value_enum, default_value_t = Strategy::Greedy)]
    pub strategy: Strategy,

    /// The measure driving the search. Defaults to `length` for the greedy strategy, and
    /// `neg-length` for minimax, which maximizes its measure.
    #[arg(short, long, value_enum)]
    pub measure: Option<MeasureKind>,

    /// Only use the rules carrying at least one of these tags (such as `trig` or `pow`).
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Maximum number of minimax moves.
    #[arg(long, default_value_t = 5)]
    pub iterations: usize,

    /// Minimax stops once the measure reaches this value.
    #[arg(long, default_value_t = 100.0)]
    pub eps: f64,

    /// Number of rewrites minimax looks ahead.
    #[arg(long, default_value_t = 3)]
    pub depth: usize,

    /// Maximum number of greedy passes. Unbounded if not given.
    #[arg(long)]
    pub max_passes: Option<usize>,

    /// Print every rewrite taken, not only the result.
    #[arg(long)]
    pub steps: bool,
}

/// The available search strategies.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Keep any rewrite that lowers the measure, until no rule helps.
    Greedy,

    /// Look ahead and commit to the rewrite with the best worst-case measure.
    Minimax,
}

/// The available measures.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureKind {
    /// Length of the rendered expression.
    Length,

    /// Negated length of the rendered expression.
    NegLength,

    /// Weighted sum of argument count, tree height and rendered length.
    Weighted,
}

impl MeasureKind {
    /// Creates the measure.
    pub fn build(self) -> Box<dyn Measure> {
        match self {
            Self::Length => Box::new(length),
            Self::NegLength => Box::new(neg_length),
            Self::Weighted => Box::new(Weighted::default()),
        }
    }
}

impl Args {
    /// The measure to use, taking the strategy into account if none was given.
    pub fn measure_kind(&self) -> MeasureKind {
        self.measure.unwrap_or(match self.strategy {
            Strategy::Greedy => MeasureKind::Length,
            Strategy::Minimax => MeasureKind::NegLength,
        })
    }

    /// Options for the minimax strategy.
    pub fn minimax_options(&self) -> MiniMaxOptions {
        MiniMaxOptionsBuilder::new()
            .iterations(self.iterations)
            .eps(self.eps)
            .depth(self.depth)
            .build()
    }

    /// Options for the greedy strategy.
    pub fn simplify_options(&self) -> SimplifyOptions {
        SimplifyOptions { max_passes: self.max_passes }
    }
}
