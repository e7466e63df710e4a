pub mod choose;
pub mod play;

use std::path::{Path, PathBuf};

use choose::Choose;
use play::Play;

use clap::Subcommand;
use color_eyre::eyre::{Result, WrapErr};
use multiagent_minimax::{score::NamedEvaluation, search::DEFAULT_DEPTH};

use crate::{
    agents::{Agent, AgentKind},
    maze::Maze,
};

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Print the move pacman would make from a layout
    Choose(Choose),
    /// Play a whole game against ghosts that move at random
    Play(Play),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Choose(c) => c.run()?,
            Command::Play(p) => p.run()?,
        }

        Ok(())
    }
}

#[derive(clap::Args, Debug, Clone)]
pub(crate) struct AgentArgs {
    /// Layout file to load
    #[clap(short, long, value_parser)]
    layout: PathBuf,

    /// How pacman picks its moves
    #[clap(short, long, value_enum, default_value_t = AgentKind::AlphaBeta)]
    agent: AgentKind,

    /// Number of full rounds to search
    #[clap(short, long, value_parser, default_value_t = DEFAULT_DEPTH)]
    depth: usize,

    /// Evaluation function used at the search horizon
    #[clap(short, long, value_parser, default_value = "score")]
    evaluation: String,
}

impl AgentArgs {
    pub(crate) fn load_maze(&self) -> Result<Maze> {
        read_layout(&self.layout)
    }

    pub(crate) fn build_agent(&self) -> Result<Agent> {
        let evaluation = NamedEvaluation::from_name(&self.evaluation)?;

        Agent::new(self.agent, self.depth, evaluation).wrap_err_with(|| {
            format!(
                "Could not configure a {:?} agent at depth {}",
                self.agent, self.depth
            )
        })
    }
}

fn read_layout(path: &Path) -> Result<Maze> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Could not read layout {}", path.display()))?;

    text.parse::<Maze>()
        .wrap_err_with(|| format!("Invalid layout {}", path.display()))
}
