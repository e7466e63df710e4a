//! A one ply policy for grid games. It looks at the state right after each of the maximizer's
//! moves and never considers what the adversaries do next, so it makes a cheap baseline to run the
//! real searches against.

use rand::{seq::SliceRandom, thread_rng, Rng};
use tracing::debug;

use crate::{
    oracle::{AgentIndex, GameAction, StateOracle},
    SearchError,
};

/// A cell on a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    #[allow(missing_docs)]
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
}

impl Position {
    #[allow(missing_docs)]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Straight line distance between the centers of two cells
    pub fn euclidean_distance(&self, other: &Position) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);

        (dx * dx + dy * dy).sqrt()
    }
}

/// A game where every agent stands on a grid cell
pub trait PositionGettableGame {
    #[allow(missing_docs)]
    fn maximizer_position(&self) -> Position;

    /// Positions of agents 1.., in agent order
    fn adversary_positions(&self) -> Vec<Position>;
}

/// A game with food the maximizer collects by walking over it
pub trait FoodGettableGame {
    #[allow(missing_docs)]
    fn food_positions(&self) -> Vec<Position>;

    #[allow(missing_docs)]
    fn food_count(&self) -> usize {
        self.food_positions().len()
    }
}

/// Picks the move that ends closest to food without walking into an adversary
///
/// Moves are scored by [ReflexAgent::evaluate]. If any non-idle move eats food and is not
/// suicidal, the first such move is taken straight away, which stops the agent from dithering
/// between two cells that are equally far from the next piece of food.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReflexAgent;

impl ReflexAgent {
    /// Score the state after the maximizer makes `action` from `state`. Higher is better
    ///
    /// Landing on an adversary and standing still are both `-inf`, otherwise the score is minus
    /// the distance to the closest remaining food (0 once the food is gone).
    pub fn evaluate<GameType>(&self, state: &GameType, action: &GameType::Action) -> f64
    where
        GameType: StateOracle + PositionGettableGame + FoodGettableGame,
    {
        let next = state.successor(AgentIndex::MAXIMIZER, action);
        let position = next.maximizer_position();

        let nearest_adversary = next
            .adversary_positions()
            .iter()
            .map(|p| position.euclidean_distance(p))
            .fold(f64::INFINITY, f64::min);
        if nearest_adversary < 1.0 {
            return f64::NEG_INFINITY;
        }

        if action.is_idle() {
            return f64::NEG_INFINITY;
        }

        let closest_food = next
            .food_positions()
            .iter()
            .map(|p| position.euclidean_distance(p))
            .fold(None, |closest: Option<f64>, d| {
                Some(closest.map_or(d, |c| c.min(d)))
            })
            .unwrap_or(0.0);

        -closest_food
    }

    /// Pick a move for the maximizer using the thread local rng to break ties
    pub fn choose_action<GameType>(&self, state: &GameType) -> Result<GameType::Action, SearchError>
    where
        GameType: StateOracle + PositionGettableGame + FoodGettableGame,
    {
        self.choose_action_with_rng(state, &mut thread_rng())
    }

    /// Pick a move for the maximizer, breaking ties between equally scored moves with `rng`
    pub fn choose_action_with_rng<GameType, R>(
        &self,
        state: &GameType,
        rng: &mut R,
    ) -> Result<GameType::Action, SearchError>
    where
        GameType: StateOracle + PositionGettableGame + FoodGettableGame,
        R: Rng + ?Sized,
    {
        if state.is_over() {
            return Err(SearchError::TerminalState);
        }

        let actions = state.legal_actions(AgentIndex::MAXIMIZER);
        assert!(
            !actions.is_empty(),
            "the oracle returned no legal actions for the maximizer of a game that is not over"
        );

        let scores: Vec<f64> = actions.iter().map(|a| self.evaluate(state, a)).collect();

        let food_before = state.food_count();
        let greedy = actions.iter().zip(&scores).find(|(action, score)| {
            !action.is_idle()
                && **score != f64::NEG_INFINITY
                && state
                    .successor(AgentIndex::MAXIMIZER, action)
                    .food_count()
                    < food_before
        });
        if let Some((action, score)) = greedy {
            debug!(?action, score, "eating");
            return Ok(action.clone());
        }

        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let best_actions: Vec<&GameType::Action> = actions
            .iter()
            .zip(&scores)
            .filter(|(_, score)| **score == best)
            .map(|(action, _)| action)
            .collect();

        // Every score is either finite or -inf, so at least one action matches `best`
        let chosen = best_actions
            .choose(rng)
            .map(|a| (*a).clone())
            .unwrap_or_else(|| actions[0].clone());
        debug!(action = ?chosen, score = best, candidates = best_actions.len(), "reflex");

        Ok(chosen)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashSet};

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::oracle::TerminalDeterminableGame;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Step {
        North,
        South,
        East,
        West,
        Stay,
    }

    impl GameAction for Step {
        fn is_idle(&self) -> bool {
            *self == Step::Stay
        }
    }

    /// An open `size` x `size` field with adversaries that never move. North is `y + 1`
    #[derive(Debug, Clone)]
    struct Field {
        size: i32,
        me: Position,
        adversaries: Vec<Position>,
        food: BTreeSet<Position>,
    }

    fn positions(cells: &[(i32, i32)]) -> impl Iterator<Item = Position> + '_ {
        cells.iter().map(|&(x, y)| Position::new(x, y))
    }

    impl Field {
        fn new(
            size: i32,
            me: (i32, i32),
            adversaries: &[(i32, i32)],
            food: &[(i32, i32)],
        ) -> Self {
            Self {
                size,
                me: Position::new(me.0, me.1),
                adversaries: positions(adversaries).collect(),
                food: positions(food).collect(),
            }
        }

        fn moved(&self, step: Step) -> Position {
            let Position { x, y } = self.me;
            match step {
                Step::North => Position::new(x, y + 1),
                Step::South => Position::new(x, y - 1),
                Step::East => Position::new(x + 1, y),
                Step::West => Position::new(x - 1, y),
                Step::Stay => self.me,
            }
        }
    }

    impl TerminalDeterminableGame for Field {
        fn is_win(&self) -> bool {
            self.food.is_empty()
        }

        fn is_lose(&self) -> bool {
            self.adversaries.contains(&self.me)
        }
    }

    impl StateOracle for Field {
        type Action = Step;

        fn num_agents(&self) -> usize {
            2
        }

        fn legal_actions(&self, _agent: AgentIndex) -> Vec<Step> {
            [Step::North, Step::South, Step::East, Step::West, Step::Stay]
                .into_iter()
                .filter(|s| {
                    let p = self.moved(*s);
                    (0..self.size).contains(&p.x) && (0..self.size).contains(&p.y)
                })
                .collect()
        }

        fn successor(&self, _agent: AgentIndex, action: &Step) -> Self {
            let mut next = self.clone();
            next.me = self.moved(*action);
            next.food.remove(&next.me);
            next
        }
    }

    impl PositionGettableGame for Field {
        fn maximizer_position(&self) -> Position {
            self.me
        }

        fn adversary_positions(&self) -> Vec<Position> {
            self.adversaries.clone()
        }
    }

    impl FoodGettableGame for Field {
        fn food_positions(&self) -> Vec<Position> {
            self.food.iter().copied().collect()
        }
    }

    #[test]
    fn test_euclidean_distance() {
        assert_eq!(
            Position::new(0, 0).euclidean_distance(&Position::new(3, 4)),
            5.0
        );
        assert_eq!(
            Position::new(2, 2).euclidean_distance(&Position::new(2, 2)),
            0.0
        );
    }

    #[test]
    fn test_standing_still_is_never_worth_it() {
        let field = Field::new(4, (0, 0), &[(3, 3)], &[(2, 0)]);

        assert_eq!(
            ReflexAgent.evaluate(&field, &Step::Stay),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn test_walking_into_the_adversary_is_never_worth_it() {
        let field = Field::new(4, (1, 0), &[(2, 0)], &[(3, 0)]);

        assert_eq!(
            ReflexAgent.evaluate(&field, &Step::East),
            f64::NEG_INFINITY
        );
        assert!(ReflexAgent.evaluate(&field, &Step::North).is_finite());
    }

    #[test]
    fn test_every_adversary_is_avoided_not_just_the_first() {
        let field = Field::new(4, (1, 0), &[(3, 3), (2, 0)], &[(3, 0)]);

        assert_eq!(
            ReflexAgent.evaluate(&field, &Step::East),
            f64::NEG_INFINITY
        );
        assert!(ReflexAgent.evaluate(&field, &Step::North).is_finite());
    }

    #[test]
    fn test_score_is_the_distance_to_the_closest_food() {
        let field = Field::new(5, (0, 0), &[(4, 4)], &[(3, 0), (0, 3)]);

        assert_eq!(ReflexAgent.evaluate(&field, &Step::East), -2.0);
        assert_eq!(ReflexAgent.evaluate(&field, &Step::North), -2.0);
    }

    #[test]
    fn test_no_food_left_scores_zero() {
        let field = Field::new(3, (0, 0), &[(2, 2)], &[(1, 0)]);

        assert_eq!(ReflexAgent.evaluate(&field, &Step::East), 0.0);
    }

    #[test]
    fn test_eats_adjacent_food_before_anything_else() {
        // West also eats, but North is listed first
        let field = Field::new(3, (1, 1), &[(2, 2)], &[(1, 2), (0, 1)]);

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(
                ReflexAgent.choose_action_with_rng(&field, &mut rng),
                Ok(Step::North)
            );
        }
    }

    #[test]
    fn test_does_not_eat_food_under_the_adversary() {
        let field = Field::new(3, (1, 1), &[(1, 2)], &[(1, 2), (0, 1)]);

        assert_eq!(
            ReflexAgent.choose_action_with_rng(&field, &mut StdRng::seed_from_u64(3)),
            Ok(Step::West)
        );
    }

    #[test]
    fn test_does_not_eat_food_under_a_later_adversary() {
        // North eats but lands on the second adversary, the first one is out of reach
        let field = Field::new(4, (1, 1), &[(3, 3), (1, 2)], &[(1, 2), (0, 1)]);

        for seed in 0..10 {
            assert_eq!(
                ReflexAgent.choose_action_with_rng(&field, &mut StdRng::seed_from_u64(seed)),
                Ok(Step::West)
            );
        }
    }

    #[test]
    fn test_ties_are_broken_at_random() {
        // South and West both end 1 away from the food, North and East are further
        let field = Field::new(3, (1, 1), &[(2, 2)], &[(0, 0)]);

        let chosen: HashSet<Step> = (0..64)
            .map(|seed| {
                ReflexAgent
                    .choose_action_with_rng(&field, &mut StdRng::seed_from_u64(seed))
                    .unwrap()
            })
            .collect();

        assert_eq!(chosen, HashSet::from([Step::South, Step::West]));
    }

    #[test]
    fn test_finished_games_have_no_action() {
        let field = Field::new(3, (1, 1), &[(2, 2)], &[]);

        assert_eq!(
            ReflexAgent.choose_action(&field),
            Err(SearchError::TerminalState)
        );
    }
}
