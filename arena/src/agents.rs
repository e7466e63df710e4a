use clap::ValueEnum;
use rand::Rng;
use serde::Serialize;

use multiagent_minimax::{
    reflex::ReflexAgent,
    score::NamedEvaluation,
    search::{
        AdversarialSearch, AlphaBetaSearch, ExpectimaxSearch, MinimaxSearch, OpponentModel,
        SearchConfig, SearchStats,
    },
    ConfigError, SearchError,
};

use crate::maze::{Direction, Maze};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum AgentKind {
    Minimax,
    AlphaBeta,
    Expectimax,
    Reflex,
}

/// A configured pacman controller. Built once from the command line, then asked for a move every
/// turn
#[derive(Debug, Clone)]
pub(crate) enum Agent {
    Minimax(MinimaxSearch<Maze, NamedEvaluation>),
    AlphaBeta(AlphaBetaSearch<Maze, NamedEvaluation>),
    Expectimax(ExpectimaxSearch<Maze, NamedEvaluation>),
    Reflex(ReflexAgent),
}

/// Everything `choose` reports about one decision
#[derive(Debug, Clone)]
pub(crate) struct Analysis {
    pub action: Direction,
    pub value: f64,
    pub stats: Option<SearchStats>,
    pub tree: Option<String>,
}

fn analyze_search<Model: OpponentModel>(
    search: &AdversarialSearch<Maze, NamedEvaluation, Model>,
    maze: &Maze,
    record_tree: bool,
) -> Result<Analysis, SearchError> {
    let (root, stats) = search.choose_with_stats(maze, record_tree)?;
    let action = *root.best_action().ok_or(SearchError::TerminalState)?;

    Ok(Analysis {
        action,
        value: root.value(),
        stats: Some(stats),
        tree: record_tree.then(|| root.to_text_tree()),
    })
}

impl Agent {
    /// The reflex agent looks one move ahead and scores with its own heuristic, so `depth` and
    /// `evaluation` only configure the searches
    pub(crate) fn new(
        kind: AgentKind,
        depth: usize,
        evaluation: NamedEvaluation,
    ) -> Result<Self, ConfigError> {
        let config = SearchConfig::with_depth(depth);

        Ok(match kind {
            AgentKind::Minimax => Agent::Minimax(MinimaxSearch::new(
                evaluation,
                Default::default(),
                config,
            )?),
            AgentKind::AlphaBeta => Agent::AlphaBeta(AlphaBetaSearch::new(
                evaluation,
                Default::default(),
                config,
            )?),
            AgentKind::Expectimax => Agent::Expectimax(ExpectimaxSearch::new(
                evaluation,
                Default::default(),
                config,
            )?),
            AgentKind::Reflex => Agent::Reflex(ReflexAgent),
        })
    }

    pub(crate) fn choose_action<R: Rng>(
        &self,
        maze: &Maze,
        rng: &mut R,
    ) -> Result<Direction, SearchError> {
        match self {
            Agent::Minimax(s) => s.choose_action(maze),
            Agent::AlphaBeta(s) => s.choose_action(maze),
            Agent::Expectimax(s) => s.choose_action(maze),
            Agent::Reflex(r) => r.choose_action_with_rng(maze, rng),
        }
    }

    pub(crate) fn analyze<R: Rng>(
        &self,
        maze: &Maze,
        rng: &mut R,
        record_tree: bool,
    ) -> Result<Analysis, SearchError> {
        match self {
            Agent::Minimax(s) => analyze_search(s, maze, record_tree),
            Agent::AlphaBeta(s) => analyze_search(s, maze, record_tree),
            Agent::Expectimax(s) => analyze_search(s, maze, record_tree),
            Agent::Reflex(r) => {
                let action = r.choose_action_with_rng(maze, rng)?;

                Ok(Analysis {
                    action,
                    value: r.evaluate(maze, &action),
                    stats: None,
                    tree: None,
                })
            }
        }
    }
}
