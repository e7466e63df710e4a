use std::fmt::Debug;

use super::{Fold, NodeKind};

/// The bounds alpha-beta threads down the tree
///
/// `alpha` is the value the maximizer is already guaranteed somewhere on the current path and
/// `beta` the value the adversaries are already guaranteed. Models that do not prune carry the
/// unbounded window around untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    #[allow(missing_docs)]
    pub alpha: f64,
    #[allow(missing_docs)]
    pub beta: f64,
}

impl Window {
    /// `(-inf, +inf)`, the window at the root
    pub fn unbounded() -> Self {
        Self {
            alpha: f64::NEG_INFINITY,
            beta: f64::INFINITY,
        }
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// How adversaries are assumed to play
///
/// The tree walk is the same for every model. The model decides how an adversary node folds its
/// children, and whether siblings can be skipped once a child's value is known.
pub trait OpponentModel: Debug + Clone + Copy + Send + Sync + 'static {
    /// Short name used in traces
    fn name(&self) -> &'static str;

    /// The accumulator for an adversary node
    fn adversary_fold<A: Clone>(&self) -> Fold<A>;

    /// After a child of a `kind` node came back with `value`, can the remaining siblings be skipped
    fn cuts_off(&self, _kind: NodeKind, _value: f64, _window: &Window) -> bool {
        false
    }

    /// Narrow the window after a `kind` node's running value moved to `best`
    fn tighten(&self, _kind: NodeKind, _best: f64, _window: &mut Window) {}
}

/// Adversaries pick whatever is worst for the maximizer. Every node is explored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Minimax;

impl OpponentModel for Minimax {
    fn name(&self) -> &'static str {
        "minimax"
    }

    fn adversary_fold<A: Clone>(&self) -> Fold<A> {
        Fold::min()
    }
}

/// Same values as [Minimax], with fail-soft alpha-beta pruning
///
/// A maximizer node stops as soon as a child is strictly above `beta`, and an adversary node as
/// soon as a child is strictly below `alpha`. The test is against the opponent's bound, never the
/// node's own running value. Pruning never changes the decision at the root, only how much of the
/// tree is generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlphaBeta;

impl OpponentModel for AlphaBeta {
    fn name(&self) -> &'static str {
        "alpha-beta"
    }

    fn adversary_fold<A: Clone>(&self) -> Fold<A> {
        Fold::min()
    }

    fn cuts_off(&self, kind: NodeKind, value: f64, window: &Window) -> bool {
        match kind {
            NodeKind::Max => value > window.beta,
            NodeKind::Min => value < window.alpha,
            NodeKind::Chance => false,
        }
    }

    fn tighten(&self, kind: NodeKind, best: f64, window: &mut Window) {
        match kind {
            NodeKind::Max => window.alpha = window.alpha.max(best),
            NodeKind::Min => window.beta = window.beta.min(best),
            NodeKind::Chance => {}
        }
    }
}

/// Adversaries choose uniformly at random among their legal moves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Expectimax;

impl OpponentModel for Expectimax {
    fn name(&self) -> &'static str {
        "expectimax"
    }

    fn adversary_fold<A: Clone>(&self) -> Fold<A> {
        Fold::mean()
    }
}
