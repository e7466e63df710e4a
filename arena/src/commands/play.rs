use color_eyre::eyre::{eyre, Result};
use colored::Colorize;
use multiagent_minimax::oracle::{
    AgentIndex, ScoreGettableGame, StateOracle, TerminalDeterminableGame,
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::{debug, info};

use super::AgentArgs;

#[derive(clap::Args, Debug)]
pub(crate) struct Play {
    #[clap(flatten)]
    agent: AgentArgs,

    /// Seed for the ghosts, and for pacman's tie breaks when it is a reflex agent
    #[clap(long, value_parser)]
    seed: Option<u64>,

    /// Stop the game after this many pacman moves
    #[clap(short, long, value_parser, default_value_t = 500)]
    max_turns: usize,

    /// Only print the result
    #[clap(short, long, action, default_value = "false")]
    quiet: bool,
}

impl Play {
    pub(crate) fn run(self) -> Result<()> {
        let mut maze = self.agent.load_maze()?;
        let agent = self.agent.build_agent()?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        if !self.quiet {
            println!("{maze}\n");
        }

        let mut turn = 0;
        while !maze.is_over() && turn < self.max_turns {
            let action = agent.choose_action(&maze, &mut rng)?;
            maze = maze.successor(AgentIndex::MAXIMIZER, &action);

            for ghost in (1..maze.num_agents()).map(AgentIndex) {
                if maze.is_over() {
                    break;
                }

                let ghost_action = *maze
                    .legal_actions(ghost)
                    .choose(&mut rng)
                    .ok_or_else(|| eyre!("{ghost} has no legal moves"))?;
                debug!(%ghost, action = %ghost_action, "ghost moved");
                maze = maze.successor(ghost, &ghost_action);
            }

            turn += 1;

            if !self.quiet {
                println!("Turn {turn}: pacman moved {action}, score {}", maze.get_score());
                println!("{maze}\n");
            }
        }

        let score = maze.get_score();
        info!(turns = turn, score, "game over");

        if maze.is_win() {
            println!("{}", format!("Pacman won in {turn} turns with {score}").green());
        } else if maze.is_lose() {
            println!("{}", format!("Pacman lost in {turn} turns with {score}").red());
        } else {
            println!(
                "{}",
                format!("Out of turns after {turn} turns with {score}").yellow()
            );
        }

        Ok(())
    }
}
