//! The traits a game has to implement before it can be searched.
//!
//! The search never owns or mutates a game. It only asks the game for the moves an agent can make
//! and for the state that follows one of those moves, so every implementor is expected to behave
//! like a value: `successor` hands back a brand new state and leaves `self` untouched.

use std::fmt::{self, Debug, Display};

/// The position of an agent in the turn order
///
/// Index 0 is always the maximizing agent. Every other index is an adversary, and adversaries
/// move in increasing index order after the maximizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AgentIndex(pub usize);

impl AgentIndex {
    /// The agent whose action the search is choosing
    pub const MAXIMIZER: AgentIndex = AgentIndex(0);

    /// Returns true for index 0
    pub fn is_maximizer(&self) -> bool {
        self.0 == 0
    }

    #[allow(missing_docs)]
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl Display for AgentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_maximizer() {
            write!(f, "max#0")
        } else {
            write!(f, "adv#{}", self.0)
        }
    }
}

/// A move an agent can make
///
/// Every move vocabulary has exactly one idle move (standing still). Evaluation heuristics are
/// allowed to treat it as the worst possible choice for the maximizer.
pub trait GameAction: Clone + PartialEq + Debug {
    /// Is this the reserved idle move
    fn is_idle(&self) -> bool;
}

/// A game that knows whether it has been won or lost by the maximizing agent
pub trait TerminalDeterminableGame {
    /// The maximizer has won
    fn is_win(&self) -> bool;

    /// The maximizer has lost
    fn is_lose(&self) -> bool;

    /// Either outcome has been reached and no more moves are possible
    fn is_over(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

/// Everything the adversarial search needs to walk a game tree
///
/// Implementors promise that [StateOracle::legal_actions] is non-empty for every state that is
/// not over. The search treats an empty action list on such a state as a broken oracle and panics.
pub trait StateOracle: TerminalDeterminableGame + Sized {
    /// The move vocabulary of the game
    type Action: GameAction;

    /// How many agents take turns in this game, including the maximizer
    fn num_agents(&self) -> usize;

    /// The moves `agent` may make from this state, in a stable order
    ///
    /// The order matters: when two moves are equally good the search keeps the one listed first.
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action>;

    /// The state after `agent` makes `action`
    fn successor(&self, agent: AgentIndex, action: &Self::Action) -> Self;
}

/// A game that keeps its own running score, the baseline thing to maximize
pub trait ScoreGettableGame {
    /// The game's built-in score
    fn get_score(&self) -> f64;
}
