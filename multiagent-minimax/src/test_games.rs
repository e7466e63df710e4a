//! Small oracles used by the tests. They count every call the search makes so tests can check
//! what was and was not generated.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use crate::oracle::{
    AgentIndex, GameAction, ScoreGettableGame, StateOracle, TerminalDeterminableGame,
};

#[derive(Debug, Default)]
pub(crate) struct Counters {
    legal_actions: AtomicUsize,
    successors: AtomicUsize,
    visited: Mutex<Vec<usize>>,
}

impl Counters {
    pub(crate) fn legal_actions(&self) -> usize {
        self.legal_actions.load(Ordering::Relaxed)
    }

    pub(crate) fn successors(&self) -> usize {
        self.successors.load(Ordering::Relaxed)
    }

    pub(crate) fn was_visited(&self, node: usize) -> bool {
        self.visited.lock().unwrap().contains(&node)
    }

    fn visit(&self, node: usize) {
        self.successors.fetch_add(1, Ordering::Relaxed);
        self.visited.lock().unwrap().push(node);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Label(pub &'static str);

impl GameAction for Label {
    fn is_idle(&self) -> bool {
        self.0 == "Stop"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Win,
    Lose,
}

/// A hand written tree, turned into a [TreeGame] by [TreeGame::new]
#[derive(Debug, Clone)]
pub(crate) struct Shape {
    score: f64,
    outcome: Option<Outcome>,
    children: Vec<(&'static str, Shape)>,
}

pub(crate) fn leaf(score: f64) -> Shape {
    scored(score, vec![])
}

pub(crate) fn branch(children: Vec<(&'static str, Shape)>) -> Shape {
    scored(0.0, children)
}

pub(crate) fn scored(score: f64, children: Vec<(&'static str, Shape)>) -> Shape {
    Shape {
        score,
        outcome: None,
        children,
    }
}

pub(crate) fn win(score: f64) -> Shape {
    Shape {
        score,
        outcome: Some(Outcome::Win),
        children: vec![],
    }
}

pub(crate) fn lose(score: f64) -> Shape {
    Shape {
        score,
        outcome: Some(Outcome::Lose),
        children: vec![],
    }
}

#[derive(Debug)]
struct TreeNode {
    score: f64,
    outcome: Option<Outcome>,
    children: Vec<(Label, usize)>,
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<TreeNode>,
    num_agents: usize,
    counters: Counters,
}

impl Tree {
    fn push(&mut self, shape: Shape) -> usize {
        let id = self.nodes.len();
        self.nodes.push(TreeNode {
            score: shape.score,
            outcome: shape.outcome,
            children: vec![],
        });

        let children = shape
            .children
            .into_iter()
            .map(|(label, child)| (Label(label), self.push(child)))
            .collect();
        self.nodes[id].children = children;

        id
    }
}

/// A fixed game tree. Agents take turns walking down it; whose turn it is only matters to the
/// search, the tree itself does not care
#[derive(Debug, Clone)]
pub(crate) struct TreeGame {
    tree: Arc<Tree>,
    node: usize,
}

impl TreeGame {
    pub(crate) fn new(num_agents: usize, shape: Shape) -> Self {
        let mut tree = Tree {
            nodes: vec![],
            num_agents,
            counters: Counters::default(),
        };
        let root = tree.push(shape);

        Self {
            tree: Arc::new(tree),
            node: root,
        }
    }

    pub(crate) fn counters(&self) -> &Counters {
        &self.tree.counters
    }

    /// The id of the node reached by following `labels` from this one
    pub(crate) fn node_for_path(&self, labels: &[&str]) -> Option<usize> {
        labels.iter().try_fold(self.node, |node, label| {
            self.tree.nodes[node]
                .children
                .iter()
                .find(|(l, _)| l.0 == *label)
                .map(|(_, child)| *child)
        })
    }

    fn current(&self) -> &TreeNode {
        &self.tree.nodes[self.node]
    }
}

impl TerminalDeterminableGame for TreeGame {
    fn is_win(&self) -> bool {
        self.current().outcome == Some(Outcome::Win)
    }

    fn is_lose(&self) -> bool {
        self.current().outcome == Some(Outcome::Lose)
    }
}

impl StateOracle for TreeGame {
    type Action = Label;

    fn num_agents(&self) -> usize {
        self.tree.num_agents
    }

    fn legal_actions(&self, _agent: AgentIndex) -> Vec<Label> {
        self.tree
            .counters
            .legal_actions
            .fetch_add(1, Ordering::Relaxed);

        self.current().children.iter().map(|(l, _)| *l).collect()
    }

    fn successor(&self, _agent: AgentIndex, action: &Label) -> Self {
        let (_, child) = self
            .current()
            .children
            .iter()
            .find(|(l, _)| l == action)
            .unwrap_or_else(|| panic!("{action:?} is not a move from node {}", self.node));

        self.tree.counters.visit(*child);

        Self {
            tree: self.tree.clone(),
            node: *child,
        }
    }
}

impl ScoreGettableGame for TreeGame {
    fn get_score(&self) -> f64 {
        self.current().score
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slot(pub u8);

impl GameAction for Slot {
    fn is_idle(&self) -> bool {
        self.0 == 0
    }
}

/// A procedurally generated game. Every state hashes its history, and the hash decides the
/// branching factor (1 to 3), whether the game ended, and the score. Small integer scores make
/// ties common
#[derive(Debug, Clone)]
pub(crate) struct HashGame {
    key: u64,
    plies: usize,
    num_agents: usize,
    counters: Arc<Counters>,
}

fn mix(z: u64) -> u64 {
    let z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    let z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

impl HashGame {
    pub(crate) fn new(seed: u64, num_agents: usize) -> Self {
        Self {
            key: mix(seed),
            plies: 0,
            num_agents,
            counters: Arc::new(Counters::default()),
        }
    }

    pub(crate) fn counters(&self) -> &Counters {
        &self.counters
    }
}

impl TerminalDeterminableGame for HashGame {
    fn is_win(&self) -> bool {
        self.plies > 0 && self.key % 29 == 0
    }

    fn is_lose(&self) -> bool {
        self.plies > 0 && self.key % 29 == 1
    }
}

impl StateOracle for HashGame {
    type Action = Slot;

    fn num_agents(&self) -> usize {
        self.num_agents
    }

    fn legal_actions(&self, _agent: AgentIndex) -> Vec<Slot> {
        self.counters.legal_actions.fetch_add(1, Ordering::Relaxed);

        let branching = 1 + (self.key % 3) as u8;
        (0..branching).map(Slot).collect()
    }

    fn successor(&self, agent: AgentIndex, action: &Slot) -> Self {
        self.counters.successors.fetch_add(1, Ordering::Relaxed);

        Self {
            key: mix(self.key.wrapping_mul(31) ^ ((action.0 as u64) << 8) ^ agent.0 as u64),
            plies: self.plies + 1,
            num_agents: self.num_agents,
            counters: self.counters.clone(),
        }
    }
}

impl ScoreGettableGame for HashGame {
    fn get_score(&self) -> f64 {
        if self.is_win() {
            50.0
        } else if self.is_lose() {
            -50.0
        } else {
            ((self.key >> 16) % 11) as f64 - 5.0
        }
    }
}
