//! The `derive` subcommand.

use anyhow::Result;
use clap::Parser;
use clio::Input;
use tracing::info;

use crate::graph_io::{OutputArgs, read_rule};

/// Derive a rule from a graph annotated with "L" and "R" subgraphs.
#[derive(Parser, Debug)]
#[clap(about = "Derive a rule from an annotated rule graph.")]
#[non_exhaustive]
pub struct DeriveArgs {
    /// Rule graph file, use '-' for stdin
    #[arg(value_parser, default_value = "-", help_heading = "Input")]
    pub input: Input,
    /// Output arguments.
    #[command(flatten)]
    pub output_args: OutputArgs,
}

impl DeriveArgs {
    /// Derive the rule and write it out as JSON.
    pub fn run(&mut self) -> Result<()> {
        let rule = read_rule(&mut self.input)?;
        info!(
            "Derived a rule deleting {} nodes and {} edges, creating {} nodes and {} edges",
            rule.deleted_nodes().count(),
            rule.deleted_edges().count(),
            rule.created_nodes().count(),
            rule.created_edges().count()
        );
        self.output_args.write_json(&rule)?;
        Ok(())
    }
}
