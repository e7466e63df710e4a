use thiserror::Error;

/// Problems with how a search was put together. These are reported when the search is built, never
/// in the middle of a search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The depth bound has to allow at least one full round
    #[error("search depth must be at least 1 round, got {depth}")]
    InvalidDepth {
        #[allow(missing_docs)]
        depth: usize,
    },

    /// The evaluation function exists by name but has no body yet
    #[error("evaluation function `{name}` is not implemented")]
    EvaluationNotImplemented {
        #[allow(missing_docs)]
        name: String,
    },

    /// No evaluation function is registered under this name
    #[error("unknown evaluation function `{name}` (expected one of: {expected})")]
    UnknownEvaluation {
        #[allow(missing_docs)]
        name: String,
        /// Comma separated list of the names that do resolve
        expected: String,
    },
}

/// Problems choosing a move from a particular state
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SearchError {
    /// The game is already won or lost, so there is nothing to choose
    #[error("cannot choose an action from a state that is already won or lost")]
    TerminalState,
}
