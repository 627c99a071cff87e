//! Route type.

use std::fmt;

/// An ordered visit sequence, stored as node ids.
///
/// Constructors and neighborhood operations always produce structurally
/// complete sequences (both depots present, length `n+2`), but a route may
/// still violate the parity constraints; validity is a query on the
/// evaluator, not an invariant of this type.
///
/// # Examples
///
/// ```
/// use seqroute::models::Route;
///
/// let route = Route::new(vec![0, 3, 1, 2, 4, 5]);
/// assert_eq!(route.len(), 6);
/// assert_eq!(route.to_string(), "0-3-1-2-4-5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    sequence: Vec<usize>,
}

impl Route {
    /// Creates a route from a node id sequence.
    pub fn new(sequence: Vec<usize>) -> Self {
        Self { sequence }
    }

    /// The visit sequence as node ids.
    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    /// Mutable access for in-place operations.
    pub(crate) fn sequence_mut(&mut self) -> &mut Vec<usize> {
        &mut self.sequence
    }

    /// Number of nodes in the route, depots included.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns `true` if the route holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// First visited id, if any.
    pub fn first(&self) -> Option<usize> {
        self.sequence.first().copied()
    }

    /// Last visited id, if any.
    pub fn last(&self) -> Option<usize> {
        self.sequence.last().copied()
    }
}

impl fmt::Display for Route {
    /// Formats the route as hyphen-joined ids, e.g. `0-3-1-2-4-5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.sequence.iter().enumerate() {
            if i > 0 {
                write!(f, "-")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}
