//! The `apply` subcommand.

use anyhow::Result;
use clap::Parser;
use clio::Input;
use tracing::info;

use crate::CliError;
use crate::graph_io::{OutputArgs, read_graph, read_rule};

/// Rewrite a graph with one match of a rule.
#[derive(Parser, Debug)]
#[clap(about = "Rewrite a graph with a rule.")]
#[non_exhaustive]
pub struct ApplyArgs {
    /// Rule graph file.
    #[arg(long, value_parser, help_heading = "Input")]
    pub rule: Input,
    /// Target graph file, use '-' for stdin
    #[arg(value_parser, default_value = "-", help_heading = "Input")]
    pub target: Input,
    /// Which match to rewrite, in enumeration order.
    #[arg(long, default_value_t = 0)]
    pub index: usize,
    /// Only count matches mapping distinct LHS nodes to distinct target
    /// nodes.
    #[arg(long)]
    pub injective: bool,
    /// Output arguments.
    #[command(flatten)]
    pub output_args: OutputArgs,
}

impl ApplyArgs {
    /// Rewrite the target and write the result out as JSON.
    pub fn run(&mut self) -> Result<()> {
        let rule = read_rule(&mut self.rule)?;
        let target = read_graph(&mut self.target)?;
        if rule.lhs.node_count() == 0 {
            return Err(CliError::EmptyPattern.into());
        }

        let mut found = 0;
        let lhs_match = rule
            .matcher(&target)
            .injective(self.injective)
            .into_iter()
            .inspect(|_| found += 1)
            .nth(self.index);
        let Some(lhs_match) = lhs_match else {
            return Err(CliError::NoMatch {
                index: self.index,
                found,
            }
            .into());
        };
        let result = rule.apply(&target, &lhs_match).map_err(CliError::from)?;
        info!(
            "Rewrote match {} into a graph of {} nodes and {} edges",
            self.index,
            result.node_count(),
            result.edge_count()
        );
        self.output_args.write_json(&result)?;
        Ok(())
    }
}
