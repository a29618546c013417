//! The `match` subcommand.

use anyhow::Result;
use clap::Parser;
use clio::Input;
use graft_core::{Graph, Matcher};
use tracing::info;

use crate::CliError;
use crate::graph_io::{OutputArgs, read_graph, read_rule};

/// Where the pattern to search for comes from.
#[derive(Debug, clap::Args)]
#[group(required = true, multiple = false)]
pub struct PatternArgs {
    /// Rule graph whose left-hand side is searched for.
    #[arg(long, value_parser, help_heading = "Input")]
    pub rule: Option<Input>,
    /// Plain graph to search for.
    #[arg(long, value_parser, help_heading = "Input")]
    pub pattern: Option<Input>,
}

impl PatternArgs {
    /// Read the pattern graph.
    pub fn get_pattern(&mut self) -> Result<Graph, CliError> {
        match (&mut self.rule, &mut self.pattern) {
            (Some(rule), _) => Ok(read_rule(rule)?.lhs),
            (None, Some(pattern)) => read_graph(pattern),
            (None, None) => unreachable!("clap requires one pattern source"),
        }
    }
}

/// List the matches of a pattern in a target graph.
#[derive(Parser, Debug)]
#[clap(about = "List the matches of a rule or pattern in a graph.")]
#[non_exhaustive]
pub struct MatchArgs {
    /// Pattern input.
    #[command(flatten)]
    pub pattern_args: PatternArgs,
    /// Target graph file, use '-' for stdin
    #[arg(value_parser, default_value = "-", help_heading = "Input")]
    pub target: Input,
    /// Stop after this many matches.
    #[arg(long)]
    pub limit: Option<usize>,
    /// Require distinct pattern nodes to match distinct target nodes.
    #[arg(long)]
    pub injective: bool,
    /// Output arguments.
    #[command(flatten)]
    pub output_args: OutputArgs,
}

impl MatchArgs {
    /// Find the matches and write them out as a JSON list.
    pub fn run(&mut self) -> Result<()> {
        let pattern = self.pattern_args.get_pattern()?;
        let target = read_graph(&mut self.target)?;
        if pattern.node_count() == 0 {
            return Err(CliError::EmptyPattern.into());
        }

        let matches: Vec<_> = Matcher::new(&pattern, &target)
            .injective(self.injective)
            .iter()
            .take(self.limit.unwrap_or(usize::MAX))
            .collect();
        info!("Found {} matches", matches.len());
        self.output_args.write_json(&matches)?;
        Ok(())
    }
}
