//! Termination conditions for the branch-and-bound search.
//!
//! A search without a termination runs to completion. When a condition
//! fires, the search stops before creating the next node and the outcome
//! is flagged as terminated early; artifacts keep their shape.

mod composite;
mod node_count;
mod time;

use std::fmt::Debug;

use crate::scope::SearchScope;

pub use composite::OrTermination;
pub use node_count::NodeCountTermination;
pub use time::TimeTermination;

/// Trait for determining when to stop searching.
///
/// # Type Parameters
/// * `E` - The evaluator type of the scope
pub trait Termination<E>: Debug {
    /// Returns true if the search should stop.
    fn is_terminated(&self, scope: &SearchScope<E>) -> bool;
}

/// Never terminates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTermination;

impl<E> Termination<E> for NoTermination {
    fn is_terminated(&self, _scope: &SearchScope<E>) -> bool {
        false
    }
}

impl<E, T: Termination<E>> Termination<E> for Option<T> {
    fn is_terminated(&self, scope: &SearchScope<E>) -> bool {
        self.as_ref().is_some_and(|t| t.is_terminated(scope))
    }
}
