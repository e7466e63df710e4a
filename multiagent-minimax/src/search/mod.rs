//! Depth limited adversarial search for one maximizing agent against any number of adversaries.
//!
//! The maximizer is always agent 0. Adversaries move after it in index order, and a full round of
//! moves is one unit of depth. When a state is won, lost, or at the depth bound it is scored with
//! the evaluation function and the values are folded back up the tree: the maximizer takes the
//! highest value, and adversaries fold their children according to the [OpponentModel]:
//!
//! - [Minimax] assumes every adversary works to minimize the maximizer's score
//! - [AlphaBeta] assumes the same and skips subtrees that cannot change the decision
//! - [Expectimax] assumes every adversary picks uniformly at random, and averages
//!
//! When two moves are equally good the one listed first by the oracle wins.
//!
//! ```rust
//! use multiagent_minimax::{
//!     oracle::{AgentIndex, GameAction, StateOracle, TerminalDeterminableGame},
//!     search::{AlphaBetaSearch, ExpectimaxSearch},
//! };
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! enum Pick {
//!     Left,
//!     Right,
//! }
//!
//! impl GameAction for Pick {
//!     fn is_idle(&self) -> bool {
//!         false
//!     }
//! }
//!
//! // The maximizer picks a side, then the adversary picks a side. The leaf is scored by the
//! // table below, indexed by both picks
//! #[derive(Debug, Clone)]
//! struct Duel {
//!     picks: Vec<Pick>,
//! }
//!
//! impl TerminalDeterminableGame for Duel {
//!     fn is_win(&self) -> bool {
//!         false
//!     }
//!
//!     fn is_lose(&self) -> bool {
//!         false
//!     }
//! }
//!
//! impl StateOracle for Duel {
//!     type Action = Pick;
//!
//!     fn num_agents(&self) -> usize {
//!         2
//!     }
//!
//!     fn legal_actions(&self, _agent: AgentIndex) -> Vec<Pick> {
//!         vec![Pick::Left, Pick::Right]
//!     }
//!
//!     fn successor(&self, _agent: AgentIndex, action: &Pick) -> Self {
//!         let mut picks = self.picks.clone();
//!         picks.push(*action);
//!         Duel { picks }
//!     }
//! }
//!
//! fn payoff(duel: &Duel) -> f64 {
//!     match duel.picks.as_slice() {
//!         [Pick::Left, Pick::Left] => 2.0,
//!         [Pick::Left, Pick::Right] => 8.0,
//!         [Pick::Right, Pick::Left] => 3.0,
//!         [Pick::Right, Pick::Right] => 4.0,
//!         _ => 0.0,
//!     }
//! }
//!
//! let start = Duel { picks: vec![] };
//!
//! // Against a worst-case adversary Left is only worth 2, Right is worth 3
//! let cautious = AlphaBetaSearch::with_depth(payoff, 1).unwrap();
//! assert_eq!(cautious.choose_action(&start), Ok(Pick::Right));
//!
//! // Against a random adversary Left is worth 5 on average, Right 3.5
//! let hopeful = ExpectimaxSearch::with_depth(payoff, 1).unwrap();
//! assert_eq!(hopeful.choose_action(&start), Ok(Pick::Left));
//! ```

mod fold;
pub use fold::{Fold, NodeKind};

mod model;
pub use model::{AlphaBeta, Expectimax, Minimax, OpponentModel, Window};

mod search_return;
pub use search_return::{LeafReason, SearchResult, SearchReturn};

mod eval;
pub use eval::{
    AdversarialSearch, AlphaBetaSearch, ExpectimaxSearch, MinimaxSearch, SearchConfig,
    SearchStats, DEFAULT_DEPTH,
};
