use text_trees::StringTreeNode;

use crate::oracle::{AgentIndex, GameAction};

use super::NodeKind;

/// The value of a searched state, and the action that achieves it
///
/// `action` is `None` when the state was evaluated directly (it was terminal, or the depth bound
/// was reached) and at chance nodes, where no single action is responsible for the value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult<A> {
    #[allow(missing_docs)]
    pub value: f64,
    #[allow(missing_docs)]
    pub action: Option<A>,
}

/// Why a state was handed to the evaluation function instead of being expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafReason {
    /// The game was won or lost
    Terminal,
    /// The depth bound was reached
    DepthExhausted,
}

#[derive(Debug, Clone, PartialEq)]
/// This is returned from a search
/// It contains the information we generated about the game tree
pub enum SearchReturn<A> {
    /// This is a non-leaf node in the game tree
    Node {
        /// Which agent was moving at this node
        agent: AgentIndex,
        /// How the children were folded
        kind: NodeKind,
        /// A 'recursive' look at every move we explored under this node, in the order they were
        /// explored. Only recorded by [super::AdversarialSearch::explain], empty otherwise
        options: Vec<(A, Self)>,
        /// The folded value
        value: f64,
        /// The move that produced `value`. Always `None` at chance nodes
        best_action: Option<A>,
        /// Whether the remaining moves were skipped by a cutoff
        cutoff: bool,
    },
    /// Represents a leaf node in the game tree
    Leaf {
        #[allow(missing_docs)]
        value: f64,
        #[allow(missing_docs)]
        reason: LeafReason,
    },
}

impl<A: GameAction> SearchReturn<A> {
    /// Returns the value for this node
    pub fn value(&self) -> f64 {
        match self {
            SearchReturn::Node { value, .. } | SearchReturn::Leaf { value, .. } => *value,
        }
    }

    /// Returns the chosen action at this node, `None` for leaves and chance nodes
    pub fn best_action(&self) -> Option<&A> {
        match self {
            SearchReturn::Node { best_action, .. } => best_action.as_ref(),
            SearchReturn::Leaf { .. } => None,
        }
    }

    /// The explored moves under this node. Empty for leaves, or when the tree was not recorded
    pub fn options(&self) -> &[(A, Self)] {
        match self {
            SearchReturn::Node { options, .. } => options,
            SearchReturn::Leaf { .. } => &[],
        }
    }

    /// Drop the recorded subtree and keep the value and chosen action
    pub fn into_result(self) -> SearchResult<A> {
        match self {
            SearchReturn::Node {
                value, best_action, ..
            } => SearchResult {
                value,
                action: best_action,
            },
            SearchReturn::Leaf { value, .. } => SearchResult {
                value,
                action: None,
            },
        }
    }

    /// Returns all the moves in the 'route' through the game tree that the search expects
    ///
    /// The route follows the chosen action at every max and min node and stops at the first leaf
    /// or chance node, since a random adversary has no chosen move. Requires a recorded tree.
    pub fn chosen_route(&self) -> Vec<(AgentIndex, A)> {
        match self {
            SearchReturn::Leaf { .. } => vec![],
            SearchReturn::Node {
                agent,
                options,
                best_action: Some(best),
                ..
            } => {
                if let Some((action, child)) = options.iter().find(|(a, _)| a == best) {
                    let mut tail = child.chosen_route();
                    tail.insert(0, (*agent, action.clone()));
                    tail
                } else {
                    vec![]
                }
            }
            SearchReturn::Node {
                best_action: None, ..
            } => vec![],
        }
    }

    /// This returns a visual representation of the recorded game tree
    /// It shows the agent, the fold and the value at each level, labelled by the move that led
    /// there
    pub fn to_text_tree(&self) -> String {
        format!("{}", self.to_text_tree_node("root".to_owned()))
    }

    fn to_text_tree_node(&self, label: String) -> StringTreeNode {
        match self {
            SearchReturn::Leaf { value, reason } => {
                StringTreeNode::new(format!("{label} = {value} ({reason:?})"))
            }
            SearchReturn::Node {
                agent,
                kind,
                options,
                value,
                cutoff,
                ..
            } => {
                let suffix = if *cutoff { " [cutoff]" } else { "" };
                let mut node =
                    StringTreeNode::new(format!("{label} {agent} {kind} = {value}{suffix}"));
                for (action, child) in options {
                    node.push_node(child.to_text_tree_node(format!("{action:?}")));
                }

                node
            }
        }
    }
}
