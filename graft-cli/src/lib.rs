//! Standard command line tools, used by the graft binary.

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use graft_core::{ApplyError, GraphError, RuleError};
use thiserror::Error;

pub mod apply;
pub mod derive;
pub mod graph_io;
pub mod matches;

/// CLI arguments.
#[derive(Parser, Debug)]
#[clap(version, long_about = None)]
#[clap(about = "Double-pushout graph rewriting tools.")]
#[group(id = "graft")]
#[non_exhaustive]
pub enum CliArgs {
    /// Derive a rule from an annotated rule graph.
    Derive(derive::DeriveArgs),
    /// List the matches of a rule or pattern in a graph.
    Match(matches::MatchArgs),
    /// Rewrite a graph with a rule.
    Apply(apply::ApplyArgs),
}

impl CliArgs {
    /// The verbosity requested for the subcommand.
    pub fn verbosity(&self) -> &Verbosity<InfoLevel> {
        match self {
            CliArgs::Derive(args) => &args.output_args.verbose,
            CliArgs::Match(args) => &args.output_args.verbose,
            CliArgs::Apply(args) => &args.output_args.verbose,
        }
    }

    /// Run the subcommand.
    pub fn run(self) -> anyhow::Result<()> {
        match self {
            CliArgs::Derive(mut args) => args.run(),
            CliArgs::Match(mut args) => args.run(),
            CliArgs::Apply(mut args) => args.run(),
        }
    }
}

/// Error type for the CLI.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliError {
    /// Error reading input.
    #[error("Error reading from path: {0}")]
    InputFile(#[from] std::io::Error),
    /// Error parsing input.
    #[error("Error parsing input: {0}")]
    Parse(#[from] serde_json::Error),
    /// The input graph is malformed.
    #[error("Invalid graph: {0}")]
    Graph(#[from] GraphError),
    /// The rule graph does not describe a rule.
    #[error("Invalid rule: {0}")]
    Rule(#[from] RuleError),
    /// The chosen match cannot be rewritten.
    #[error("Cannot apply rule: {0}")]
    Apply(#[from] ApplyError),
    /// Fewer matches were found than requested.
    #[error("No match with index {index}, found {found} matches")]
    NoMatch {
        /// The requested match index.
        index: usize,
        /// The number of matches found.
        found: usize,
    },
    /// Matching requires a pattern with nodes.
    #[error("The pattern has no nodes")]
    EmptyPattern,
}
