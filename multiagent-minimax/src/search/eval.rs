use std::{fmt::Debug, marker::PhantomData};

use derivative::Derivative;
use tracing::{debug, info_span, trace, warn};

use crate::{
    oracle::StateOracle,
    score::Scorable,
    turn::Turn,
    ConfigError, SearchError,
};

use super::{
    AlphaBeta, Expectimax, Fold, LeafReason, Minimax, OpponentModel, SearchResult, SearchReturn,
    Window,
};

/// The depth bound used when none is given
pub const DEFAULT_DEPTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Properties that can be defined for an [AdversarialSearch]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use multiagent_minimax::search::SearchConfig;
///
/// let defaults: SearchConfig = Default::default();
///
/// assert_eq!(defaults.depth, 2);
/// ```
pub struct SearchConfig {
    /// How many full rounds to look ahead before falling back to the evaluation function
    ///
    /// A round is one move by the maximizer followed by one move by every adversary.
    pub depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
        }
    }
}

impl SearchConfig {
    #[allow(missing_docs)]
    pub fn with_depth(depth: usize) -> Self {
        Self { depth }
    }

    /// Check the config can drive a search
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::InvalidDepth { depth: self.depth });
        }

        Ok(())
    }
}

/// Counters collected over a single search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Interior nodes whose legal actions were generated
    pub nodes_expanded: usize,
    /// States handed to the evaluation function
    pub leaves_evaluated: usize,
    /// Calls to [StateOracle::successor]
    pub successors_generated: usize,
    /// Interior nodes that stopped early because of a cutoff
    pub cutoffs: usize,
    /// The most moves below the root of any state the search reached, leaves included
    pub max_height: usize,
}

#[derive(Derivative)]
#[derivative(
    Debug(bound = "Model: Debug"),
    Clone(bound = "ScorableType: Clone, Model: Clone")
)]
/// This is the struct that wraps a scoring function and an opponent model and can be used to
/// choose moves for the maximizing agent of any [StateOracle]
///
/// It is immutable once built, so one search can be shared between threads and used on many
/// states at once.
///
/// It also outputs traces using the [tracing] crate.
pub struct AdversarialSearch<GameType, ScorableType, Model> {
    #[derivative(Debug = "ignore")]
    evaluation: ScorableType,
    model: Model,
    config: SearchConfig,
    _phantom: PhantomData<fn(&GameType)>,
}

/// Worst-case adversaries, every node explored
pub type MinimaxSearch<GameType, ScorableType> =
    AdversarialSearch<GameType, ScorableType, Minimax>;

/// Worst-case adversaries with alpha-beta pruning
pub type AlphaBetaSearch<GameType, ScorableType> =
    AdversarialSearch<GameType, ScorableType, AlphaBeta>;

/// Uniformly random adversaries
pub type ExpectimaxSearch<GameType, ScorableType> =
    AdversarialSearch<GameType, ScorableType, Expectimax>;

impl<GameType, ScorableType, Model> AdversarialSearch<GameType, ScorableType, Model>
where
    GameType: StateOracle,
    ScorableType: Scorable<GameType>,
    Model: OpponentModel,
{
    /// Construct a new `AdversarialSearch`
    ///
    /// Fails if the depth bound is zero or if `evaluation` is a [crate::score::Placeholder].
    pub fn new(
        evaluation: ScorableType,
        model: Model,
        config: SearchConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        if let Some(name) = evaluation.placeholder_name() {
            return Err(ConfigError::EvaluationNotImplemented {
                name: name.to_owned(),
            });
        }

        debug!(model = model.name(), depth = config.depth, "configured search");

        Ok(Self {
            evaluation,
            model,
            config,
            _phantom: PhantomData,
        })
    }

    /// Construct a new `AdversarialSearch` with the default instance of the opponent model
    pub fn with_depth(evaluation: ScorableType, depth: usize) -> Result<Self, ConfigError>
    where
        Model: Default,
    {
        Self::new(evaluation, Model::default(), SearchConfig::with_depth(depth))
    }

    #[allow(missing_docs)]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[allow(missing_docs)]
    pub fn model(&self) -> Model {
        self.model
    }

    /// Pick the move the maximizing agent should make from `state`
    ///
    /// The only failure is being asked to move from a state that is already won or lost.
    pub fn choose_action(&self, state: &GameType) -> Result<GameType::Action, SearchError> {
        let (root, _) = self.choose_with_stats(state, false)?;

        root.into_result().action.ok_or(SearchError::TerminalState)
    }

    /// Make the same decision as [AdversarialSearch::choose_action] and hand back the searched
    /// root along with the work it took
    ///
    /// The tree under the root is only recorded when `record_tree` is set, see
    /// [SearchReturn::options].
    pub fn choose_with_stats(
        &self,
        state: &GameType,
        record_tree: bool,
    ) -> Result<(SearchReturn<GameType::Action>, SearchStats), SearchError> {
        if state.is_over() {
            warn!("asked to choose an action from a finished game");
            return Err(SearchError::TerminalState);
        }

        info_span!(
            "choose_action",
            model = self.model.name(),
            depth = self.config.depth,
            agents = state.num_agents(),
            chosen_action = tracing::field::Empty,
            value = tracing::field::Empty,
            nodes_expanded = tracing::field::Empty,
            cutoffs = tracing::field::Empty,
        )
        .in_scope(|| {
            let mut stats = SearchStats::default();
            let root = self.expand(
                state,
                Turn::root(),
                Window::unbounded(),
                record_tree,
                &mut stats,
            );

            let current_span = tracing::Span::current();
            current_span.record("chosen_action", format!("{:?}", root.best_action()).as_str());
            current_span.record("value", root.value());
            current_span.record("nodes_expanded", stats.nodes_expanded);
            current_span.record("cutoffs", stats.cutoffs);

            Ok((root, stats))
        })
    }

    /// Search from `state` with the maximizer to move and return the root value and action
    pub fn search(&self, state: &GameType) -> SearchResult<GameType::Action> {
        self.search_with_stats(state).0
    }

    /// Same as [AdversarialSearch::search] but also reports how much work was done
    pub fn search_with_stats(
        &self,
        state: &GameType,
    ) -> (SearchResult<GameType::Action>, SearchStats) {
        let mut stats = SearchStats::default();
        let root = self.expand(state, Turn::root(), Window::unbounded(), false, &mut stats);

        (root.into_result(), stats)
    }

    /// This runs the search and returns a struct that contains all the information about the
    /// 'tree' we searched. Mostly useful for debugging, see [SearchReturn::to_text_tree]
    ///
    /// The decision is the same one [AdversarialSearch::choose_action] makes.
    pub fn explain(&self, state: &GameType) -> SearchReturn<GameType::Action> {
        let mut stats = SearchStats::default();
        self.expand(state, Turn::root(), Window::unbounded(), true, &mut stats)
    }

    fn leaf(
        &self,
        state: &GameType,
        reason: LeafReason,
        stats: &mut SearchStats,
    ) -> SearchReturn<GameType::Action> {
        stats.leaves_evaluated += 1;

        SearchReturn::Leaf {
            value: self.evaluation.score(state),
            reason,
        }
    }

    fn expand(
        &self,
        state: &GameType,
        turn: Turn,
        window: Window,
        record: bool,
        stats: &mut SearchStats,
    ) -> SearchReturn<GameType::Action> {
        let mut window = window;

        let num_agents = state.num_agents();
        let height = turn.depth * num_agents + turn.agent.as_usize();
        stats.max_height = stats.max_height.max(height);

        if state.is_over() {
            return self.leaf(state, LeafReason::Terminal, stats);
        }

        if turn.depth >= self.config.depth {
            return self.leaf(state, LeafReason::DepthExhausted, stats);
        }

        let actions = state.legal_actions(turn.agent);
        assert!(
            !actions.is_empty(),
            "the oracle returned no legal actions for {} at depth {} of a game that is not over",
            turn.agent,
            turn.depth,
        );
        stats.nodes_expanded += 1;

        let mut fold: Fold<GameType::Action> = if turn.agent.is_maximizer() {
            Fold::max()
        } else {
            self.model.adversary_fold()
        };
        let kind = fold.kind();
        let next_turn = turn.next(num_agents);

        let mut options = vec![];
        let mut cutoff = false;

        for action in actions {
            let child = state.successor(turn.agent, &action);
            stats.successors_generated += 1;

            let child_return = self.expand(&child, next_turn, window, record, stats);
            let value = child_return.value();
            fold.push(&action, value);

            if record {
                options.push((action, child_return));
            }

            if self.model.cuts_off(kind, value, &window) {
                trace!(
                    agent = %turn.agent,
                    depth = turn.depth,
                    value,
                    alpha = window.alpha,
                    beta = window.beta,
                    "cutoff"
                );
                stats.cutoffs += 1;
                cutoff = true;
                break;
            }

            self.model.tighten(kind, fold.value(), &mut window);
        }

        let (value, best_action) = fold.finish();

        SearchReturn::Node {
            agent: turn.agent,
            kind,
            options,
            value,
            best_action,
            cutoff,
        }
    }
}
