use color_eyre::eyre::Result;
use colored::Colorize;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use tracing::info;

use crate::{
    agents::{AgentKind, Analysis},
    maze::Direction,
};

use super::AgentArgs;

#[derive(clap::Args, Debug)]
pub(crate) struct Choose {
    #[clap(flatten)]
    agent: AgentArgs,

    /// Print the searched game tree
    #[clap(long, action, default_value = "false")]
    tree: bool,

    /// Print the decision as JSON instead of text
    #[clap(long, action, default_value = "false")]
    json: bool,

    /// Seed for breaking ties between equally good reflex moves
    #[clap(long, value_parser)]
    seed: Option<u64>,
}

#[derive(Serialize, Debug)]
struct ChooseReport {
    agent: AgentKind,
    depth: usize,
    evaluation: String,
    action: Direction,
    value: f64,
    nodes_expanded: Option<usize>,
    leaves_evaluated: Option<usize>,
    successors_generated: Option<usize>,
    cutoffs: Option<usize>,
}

impl ChooseReport {
    fn new(args: &AgentArgs, analysis: &Analysis) -> Self {
        Self {
            agent: args.agent,
            depth: args.depth,
            evaluation: args.evaluation.clone(),
            action: analysis.action,
            value: analysis.value,
            nodes_expanded: analysis.stats.map(|s| s.nodes_expanded),
            leaves_evaluated: analysis.stats.map(|s| s.leaves_evaluated),
            successors_generated: analysis.stats.map(|s| s.successors_generated),
            cutoffs: analysis.stats.map(|s| s.cutoffs),
        }
    }
}

impl Choose {
    pub(crate) fn run(self) -> Result<()> {
        let maze = self.agent.load_maze()?;
        let agent = self.agent.build_agent()?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let analysis = agent.analyze(&maze, &mut rng, self.tree)?;
        info!(action = %analysis.action, value = analysis.value, "decided");

        let report = ChooseReport::new(&self.agent, &analysis);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{maze}");
            println!();
            println!(
                "{} chooses {} (value {})",
                format!("{:?}", report.agent).yellow(),
                report.action.to_string().green(),
                report.value
            );

            if let Some(stats) = analysis.stats {
                println!(
                    "{} ghosts, {} nodes expanded, {} leaves evaluated, {} successors, {} cutoffs",
                    maze.ghost_count(),
                    stats.nodes_expanded,
                    stats.leaves_evaluated,
                    stats.successors_generated,
                    stats.cutoffs
                );
            }
        }

        if let Some(tree) = analysis.tree {
            println!("{tree}");
        }

        Ok(())
    }
}
