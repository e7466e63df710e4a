use std::fmt::{self, Display};

/// How an interior node turns its children's values into its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The maximizer picks its best child
    Max,
    /// A worst-case adversary picks the child that is worst for the maximizer
    Min,
    /// A random adversary, valued at the average of its children
    Chance,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeKind::Max => "max",
            NodeKind::Min => "min",
            NodeKind::Chance => "chance",
        };
        write!(f, "{s}")
    }
}

/// Running accumulator for the children of one interior node
///
/// `Max` and `Min` remember the first action that reached the current best value. A later child
/// only replaces it by being strictly better, so ties go to the earliest action in the oracle's
/// order. The first child is always adopted, even when its value is infinite.
#[derive(Debug, Clone, PartialEq)]
pub enum Fold<A> {
    #[allow(missing_docs)]
    Max { best: Option<(f64, A)> },
    #[allow(missing_docs)]
    Min { best: Option<(f64, A)> },
    /// Uniformly weighted average. No single action caused it so none is kept
    Mean {
        #[allow(missing_docs)]
        total: f64,
        #[allow(missing_docs)]
        count: usize,
    },
}

impl<A: Clone> Fold<A> {
    #[allow(missing_docs)]
    pub fn max() -> Self {
        Fold::Max { best: None }
    }

    #[allow(missing_docs)]
    pub fn min() -> Self {
        Fold::Min { best: None }
    }

    #[allow(missing_docs)]
    pub fn mean() -> Self {
        Fold::Mean {
            total: 0.0,
            count: 0,
        }
    }

    #[allow(missing_docs)]
    pub fn kind(&self) -> NodeKind {
        match self {
            Fold::Max { .. } => NodeKind::Max,
            Fold::Min { .. } => NodeKind::Min,
            Fold::Mean { .. } => NodeKind::Chance,
        }
    }

    /// Fold in the value reached by taking `action`
    pub fn push(&mut self, action: &A, value: f64) {
        match self {
            Fold::Max { best } => {
                if best.as_ref().map_or(true, |(current, _)| value > *current) {
                    *best = Some((value, action.clone()));
                }
            }
            Fold::Min { best } => {
                if best.as_ref().map_or(true, |(current, _)| value < *current) {
                    *best = Some((value, action.clone()));
                }
            }
            Fold::Mean { total, count } => {
                *total += value;
                *count += 1;
            }
        }
    }

    /// The value folded so far
    ///
    /// Before any child has been pushed this is the identity of the fold: `-inf` for `Max`,
    /// `+inf` for `Min` and `0` for `Mean`.
    pub fn value(&self) -> f64 {
        match self {
            Fold::Max { best } => best.as_ref().map_or(f64::NEG_INFINITY, |(v, _)| *v),
            Fold::Min { best } => best.as_ref().map_or(f64::INFINITY, |(v, _)| *v),
            Fold::Mean { total, count } => {
                if *count == 0 {
                    0.0
                } else {
                    *total / *count as f64
                }
            }
        }
    }

    /// The final value, and the action responsible for it when there is one
    pub fn finish(self) -> (f64, Option<A>) {
        let value = self.value();
        match self {
            Fold::Max { best } | Fold::Min { best } => (value, best.map(|(_, a)| a)),
            Fold::Mean { .. } => (value, None),
        }
    }
}
