//! Guard predicates for controlling forward navigation.
//!
//! Guards are pure boolean functions over some context (for the wizard, the
//! whole booking state). A transition only fires when its guard holds.

use std::fmt;

/// Pure predicate that decides whether a transition may fire.
///
/// # Example
///
/// ```rust
/// use booking_wizard::core::Guard;
///
/// struct Cart {
///     items: usize,
/// }
///
/// let has_items = Guard::new(|cart: &Cart| cart.items > 0);
///
/// assert!(has_items.check(&Cart { items: 2 }));
/// assert!(!has_items.check(&Cart { items: 0 }));
/// ```
pub struct Guard<C> {
    predicate: Box<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> Guard<C> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Guard that always passes.
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    /// Check if the guard allows the transition for this context.
    pub fn check(&self, context: &C) -> bool {
        (self.predicate)(context)
    }

    /// Combine two guards; both must pass.
    pub fn and(self, other: Guard<C>) -> Self
    where
        C: 'static,
    {
        Guard::new(move |c: &C| self.check(c) && other.check(c))
    }
}

impl<C> fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
