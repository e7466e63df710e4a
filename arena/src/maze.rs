use std::{collections::BTreeSet, fmt::Display, str::FromStr, sync::Arc};

use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;

use multiagent_minimax::{
    oracle::{AgentIndex, GameAction, ScoreGettableGame, StateOracle, TerminalDeterminableGame},
    reflex::{FoodGettableGame, Position, PositionGettableGame},
};

pub(crate) const TIME_PENALTY: f64 = 1.0;
pub(crate) const FOOD_REWARD: f64 = 10.0;
pub(crate) const WIN_REWARD: f64 = 500.0;
pub(crate) const LOSE_PENALTY: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub(crate) enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    const MOVES: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Row 0 is the top line of the layout, so North goes up the screen
    fn apply(&self, p: Position) -> Position {
        match self {
            Direction::North => Position::new(p.x, p.y - 1),
            Direction::South => Position::new(p.x, p.y + 1),
            Direction::East => Position::new(p.x + 1, p.y),
            Direction::West => Position::new(p.x - 1, p.y),
            Direction::Stop => p,
        }
    }
}

impl GameAction for Direction {
    fn is_idle(&self) -> bool {
        *self == Direction::Stop
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum LayoutError {
    #[error("unexpected {found:?} at line {line}, column {column}")]
    UnknownCell {
        found: char,
        line: usize,
        column: usize,
    },
    #[error("second pacman at line {line}, column {column}")]
    DuplicatePacman { line: usize, column: usize },
    #[error("the layout has no pacman (`P`)")]
    MissingPacman,
    #[error("the layout has no ghosts (`G`)")]
    MissingGhosts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Win,
    Lose,
}

/// A pacman style maze. Pacman is agent 0 and the ghosts are agents 1.., numbered in the order
/// they appear in the layout.
///
/// Pacman pays [TIME_PENALTY] every move and earns [FOOD_REWARD] per food. Clearing the food wins
/// ([WIN_REWARD]), sharing a cell with a ghost loses ([LOSE_PENALTY]). A win on the same move as a
/// collision stays a win.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Maze {
    width: i32,
    height: i32,
    walls: Arc<BTreeSet<Position>>,
    food: BTreeSet<Position>,
    pacman: Position,
    ghosts: Vec<Position>,
    score: f64,
    outcome: Option<Outcome>,
}

impl Maze {
    fn is_wall(&self, p: Position) -> bool {
        p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height || self.walls.contains(&p)
    }

    fn open_moves(&self, from: Position) -> Vec<Direction> {
        Direction::MOVES
            .into_iter()
            .filter(|d| !self.is_wall(d.apply(from)))
            .collect()
    }

    fn check_collision(&mut self) {
        if self.outcome.is_none() && self.ghosts.contains(&self.pacman) {
            self.score -= LOSE_PENALTY;
            self.outcome = Some(Outcome::Lose);
        }
    }

    pub(crate) fn ghost_count(&self) -> usize {
        self.ghosts.len()
    }
}

impl FromStr for Maze {
    type Err = LayoutError;

    fn from_str(layout: &str) -> Result<Self, Self::Err> {
        let lines = layout
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .collect_vec();
        let used = lines
            .iter()
            .rposition(|l| !l.is_empty())
            .map_or(0, |last| last + 1);

        let mut walls = BTreeSet::new();
        let mut food = BTreeSet::new();
        let mut pacman = None;
        let mut ghosts = vec![];
        let mut width = 0;

        for (y, line) in lines[..used].iter().enumerate() {
            for (x, c) in line.chars().enumerate() {
                let p = Position::new(x as i32, y as i32);
                match c {
                    '%' => {
                        walls.insert(p);
                    }
                    '.' => {
                        food.insert(p);
                    }
                    'P' if pacman.is_some() => {
                        return Err(LayoutError::DuplicatePacman {
                            line: y + 1,
                            column: x + 1,
                        })
                    }
                    'P' => pacman = Some(p),
                    'G' => ghosts.push(p),
                    ' ' => {}
                    found => {
                        return Err(LayoutError::UnknownCell {
                            found,
                            line: y + 1,
                            column: x + 1,
                        })
                    }
                }
            }
            width = width.max(line.chars().count());
        }

        let pacman = pacman.ok_or(LayoutError::MissingPacman)?;
        if ghosts.is_empty() {
            return Err(LayoutError::MissingGhosts);
        }

        Ok(Maze {
            width: width as i32,
            height: used as i32,
            walls: Arc::new(walls),
            food,
            pacman,
            ghosts,
            score: 0.0,
            outcome: None,
        })
    }
}

impl Display for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows = (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| {
                        let p = Position::new(x, y);
                        if self.ghosts.contains(&p) {
                            'G'
                        } else if self.pacman == p {
                            'P'
                        } else if self.walls.contains(&p) {
                            '%'
                        } else if self.food.contains(&p) {
                            '.'
                        } else {
                            ' '
                        }
                    })
                    .collect::<String>()
            })
            .join("\n");

        write!(f, "{rows}")
    }
}

impl TerminalDeterminableGame for Maze {
    fn is_win(&self) -> bool {
        self.outcome == Some(Outcome::Win)
    }

    fn is_lose(&self) -> bool {
        self.outcome == Some(Outcome::Lose)
    }
}

impl StateOracle for Maze {
    type Action = Direction;

    fn num_agents(&self) -> usize {
        1 + self.ghosts.len()
    }

    fn legal_actions(&self, agent: AgentIndex) -> Vec<Direction> {
        if self.is_over() {
            return vec![];
        }

        if agent.is_maximizer() {
            let mut moves = self.open_moves(self.pacman);
            moves.push(Direction::Stop);
            moves
        } else {
            let moves = self.open_moves(self.ghosts[agent.as_usize() - 1]);
            if moves.is_empty() {
                vec![Direction::Stop]
            } else {
                moves
            }
        }
    }

    fn successor(&self, agent: AgentIndex, action: &Direction) -> Self {
        let mut next = self.clone();

        if agent.is_maximizer() {
            next.pacman = action.apply(self.pacman);
            next.score -= TIME_PENALTY;

            if next.food.remove(&next.pacman) {
                next.score += FOOD_REWARD;
                if next.food.is_empty() {
                    next.score += WIN_REWARD;
                    next.outcome = Some(Outcome::Win);
                }
            }
        } else {
            let ghost = agent.as_usize() - 1;
            next.ghosts[ghost] = action.apply(self.ghosts[ghost]);
        }

        next.check_collision();
        next
    }
}

impl ScoreGettableGame for Maze {
    fn get_score(&self) -> f64 {
        self.score
    }
}

impl PositionGettableGame for Maze {
    fn maximizer_position(&self) -> Position {
        self.pacman
    }

    fn adversary_positions(&self) -> Vec<Position> {
        self.ghosts.clone()
    }
}

impl FoodGettableGame for Maze {
    fn food_positions(&self) -> Vec<Position> {
        self.food.iter().copied().collect()
    }

    fn food_count(&self) -> usize {
        self.food.len()
    }
}
