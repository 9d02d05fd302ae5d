//! OR-composition of termination conditions.
//!
//! Uses macro-generated tuple implementations.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates when ANY wrapped termination does.
///
/// # Examples
///
/// ```
/// use featurebound_solver::termination::{NodeCountTermination, OrTermination, TimeTermination};
///
/// // Stop after 30 seconds OR 1000 nodes
/// let termination = OrTermination::new((
///     TimeTermination::seconds(30),
///     NodeCountTermination::new(1000),
/// ));
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<E, $($T),+> Termination<E> for OrTermination<($($T,)+)>
        where
            $($T: Termination<E>,)+
        {
            fn is_terminated(&self, scope: &SearchScope<E>) -> bool {
                $((self.0).$idx.is_terminated(scope))||+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
