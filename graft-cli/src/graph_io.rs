//! Input/output arguments for the graft CLI.

use std::io::Write;

use clap_verbosity_flag::{InfoLevel, Verbosity};
use clio::{Input, Output};
use graft_core::{Graph, Rule};
use serde::Serialize;

use crate::CliError;

/// Output and logging arguments shared by the subcommands.
#[derive(Debug, clap::Args)]
pub struct OutputArgs {
    /// Output file '-' for stdout
    #[clap(long, short, value_parser, default_value = "-", help_heading = "Output")]
    pub output: Output,
    /// Verbosity.
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

impl OutputArgs {
    /// Write `value` to the output as pretty-printed JSON.
    pub fn write_json<T: Serialize>(&mut self, value: &T) -> Result<(), CliError> {
        serde_json::to_writer_pretty(&mut self.output, value)?;
        writeln!(self.output)?;
        Ok(())
    }
}

/// Read a JSON graph and check its references.
pub fn read_graph(input: &mut Input) -> Result<Graph, CliError> {
    let graph: Graph = serde_json::from_reader(input)?;
    graph.validate()?;
    Ok(graph)
}

/// Read a JSON rule graph and derive its rule.
pub fn read_rule(input: &mut Input) -> Result<Rule, CliError> {
    let graph = read_graph(input)?;
    Ok(Rule::from_graph(&graph)?)
}
