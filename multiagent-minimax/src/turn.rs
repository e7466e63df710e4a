//! Round robin turn order.
//!
//! One unit of search depth is a full round: the maximizer moves, then every adversary moves once
//! in index order. Depth only advances after the last adversary of the round has moved, so the
//! depth bound means the same thing no matter how many adversaries are in the game.

use crate::oracle::AgentIndex;

/// Whose move it is, and how many complete rounds have been played to get here
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Turn {
    /// The agent about to move
    pub agent: AgentIndex,
    /// Completed rounds since the root
    pub depth: usize,
}

impl Turn {
    /// The maximizer to move with no rounds played
    pub fn root() -> Self {
        Turn {
            agent: AgentIndex::MAXIMIZER,
            depth: 0,
        }
    }

    /// Is this agent the one that closes out the round
    pub fn is_last_in_round(&self, num_agents: usize) -> bool {
        self.agent.0 + 1 == num_agents
    }

    /// The turn after this agent has moved
    pub fn next(self, num_agents: usize) -> Self {
        debug_assert!(num_agents > 0, "a game needs at least one agent");

        let depth = if self.is_last_in_round(num_agents) {
            self.depth + 1
        } else {
            self.depth
        };

        Turn {
            agent: AgentIndex((self.agent.0 + 1) % num_agents),
            depth,
        }
    }
}

impl Default for Turn {
    fn default() -> Self {
        Self::root()
    }
}
