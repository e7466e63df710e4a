//! Evaluation functions: turning a game state into a number the search can compare.

use std::str::FromStr;

use itertools::Itertools;

use crate::{oracle::ScoreGettableGame, ConfigError};

/// This trait is used to control something that can return a score from a game state
///
/// Higher scores are better for the maximizing agent. A score function must be defined for every
/// state the search can reach, terminal states included, and must rank a state where the maximizer
/// has certainly lost below any state where it has not.
pub trait Scorable<GameType> {
    /// Convert the given state into a score
    fn score(&self, game: &GameType) -> f64;

    /// Returns the name of this scorer if it is a [Placeholder] that has no implementation yet
    ///
    /// Searches refuse to be configured with a placeholder, so an unfinished scorer is caught when
    /// the search is built instead of quietly producing scores.
    fn placeholder_name(&self) -> Option<&str> {
        None
    }
}

impl<GameType, FnLike: Fn(&GameType) -> f64> Scorable<GameType> for FnLike {
    fn score(&self, game: &GameType) -> f64 {
        (self)(game)
    }
}

/// The baseline evaluation: whatever score the game itself is keeping
pub fn score_evaluation<GameType: ScoreGettableGame>(game: &GameType) -> f64 {
    game.get_score()
}

/// A scorer that has been named but not written
///
/// Scoring with it panics. It exists so a registry can hand out a name for a future scorer while
/// configuration still rejects it up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    name: &'static str,
}

impl Placeholder {
    #[allow(missing_docs)]
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    #[allow(missing_docs)]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<GameType> Scorable<GameType> for Placeholder {
    fn score(&self, _game: &GameType) -> f64 {
        unimplemented!("evaluation function `{}` has not been written", self.name)
    }

    fn placeholder_name(&self) -> Option<&str> {
        Some(self.name)
    }
}

const BETTER: Placeholder = Placeholder::new("better");

/// The evaluation functions that can be picked by name
///
/// Names are resolved once, when the search is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedEvaluation {
    /// [score_evaluation], the game's own score
    Score,
    /// The slot for a hand tuned evaluation. Still a [Placeholder]
    Better,
}

impl NamedEvaluation {
    /// Every registered evaluation
    pub const ALL: [NamedEvaluation; 2] = [NamedEvaluation::Score, NamedEvaluation::Better];

    /// Look up an evaluation by its short name or its long `...EvaluationFunction` alias
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "score" | "scoreEvaluationFunction" => Ok(NamedEvaluation::Score),
            "better" | "betterEvaluationFunction" => Ok(NamedEvaluation::Better),
            _ => Err(ConfigError::UnknownEvaluation {
                name: name.to_owned(),
                expected: Self::ALL.iter().map(|e| e.name()).join(", "),
            }),
        }
    }

    #[allow(missing_docs)]
    pub fn name(&self) -> &'static str {
        match self {
            NamedEvaluation::Score => "score",
            NamedEvaluation::Better => BETTER.name(),
        }
    }
}

impl FromStr for NamedEvaluation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl<GameType: ScoreGettableGame> Scorable<GameType> for NamedEvaluation {
    fn score(&self, game: &GameType) -> f64 {
        match self {
            NamedEvaluation::Score => score_evaluation(game),
            NamedEvaluation::Better => BETTER.score(game),
        }
    }

    fn placeholder_name(&self) -> Option<&str> {
        match self {
            NamedEvaluation::Score => None,
            NamedEvaluation::Better => Some(BETTER.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scoreboard(f64);

    impl ScoreGettableGame for Scoreboard {
        fn get_score(&self) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_closures_are_scorable() {
        let doubled = |s: &Scoreboard| s.0 * 2.0;

        assert_eq!(doubled.score(&Scoreboard(4.5)), 9.0);
        assert_eq!(Scorable::<Scoreboard>::placeholder_name(&doubled), None);
    }

    #[test]
    fn test_score_evaluation_is_the_game_score() {
        assert_eq!(score_evaluation(&Scoreboard(-12.0)), -12.0);
        assert_eq!(NamedEvaluation::Score.score(&Scoreboard(7.0)), 7.0);
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(NamedEvaluation::from_name("score"), Ok(NamedEvaluation::Score));
        assert_eq!(
            "scoreEvaluationFunction".parse::<NamedEvaluation>(),
            Ok(NamedEvaluation::Score)
        );
        assert_eq!(
            NamedEvaluation::from_name("betterEvaluationFunction"),
            Ok(NamedEvaluation::Better)
        );
    }

    #[test]
    fn test_unknown_name_lists_the_known_ones() {
        let err = NamedEvaluation::from_name("clever").unwrap_err();

        assert_eq!(
            err,
            ConfigError::UnknownEvaluation {
                name: "clever".to_owned(),
                expected: "score, better".to_owned(),
            }
        );
    }

    #[test]
    fn test_better_reports_itself_as_a_placeholder() {
        assert_eq!(
            Scorable::<Scoreboard>::placeholder_name(&NamedEvaluation::Better),
            Some("better")
        );
        assert_eq!(
            Scorable::<Scoreboard>::placeholder_name(&NamedEvaluation::Score),
            None
        );
    }

    #[test]
    #[should_panic(expected = "has not been written")]
    fn test_placeholder_fails_loudly_when_scored() {
        NamedEvaluation::Better.score(&Scoreboard(1.0));
    }
}
