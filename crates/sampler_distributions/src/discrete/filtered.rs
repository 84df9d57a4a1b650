//! Filtered sampling: redraw from an inner generator until a filter accepts.
//!
//! [`Filtered`] wraps any `Generator<T>` and a [`Filter<T>`]. Accepted values
//! are reported back to the filter through [`Filter::record`], which lets
//! stateful filters such as [`NoRepeat`] and [`NoRecent`] track history.
//!
//! Like envelope sampling, the redraw loop is unbounded: a filter that can
//! reject every value the inner generator produces never terminates.

use std::collections::VecDeque;

use sampler_core::traits::Generator;

/// Accept/reject predicate with optional history.
pub trait Filter<T> {
    /// Returns true if `candidate` may be returned.
    fn accepts(&mut self, candidate: &T) -> bool;

    /// Called with every accepted value.
    fn record(&mut self, _accepted: &T) {}
}

/// Rejects a value equal to the previously accepted one.
#[derive(Clone, Debug)]
pub struct NoRepeat<T> {
    last: Option<T>,
}

impl<T> Default for NoRepeat<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NoRepeat<T> {
    /// Creates a filter with no history.
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Forgets the previously accepted value.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl<T: Clone + PartialEq> Filter<T> for NoRepeat<T> {
    fn accepts(&mut self, candidate: &T) -> bool {
        self.last.as_ref() != Some(candidate)
    }

    fn record(&mut self, accepted: &T) {
        self.last = Some(accepted.clone());
    }
}

/// Rejects any of the last `window` accepted values.
#[derive(Clone, Debug)]
pub struct NoRecent<T> {
    window: usize,
    recent: VecDeque<T>,
}

impl<T> NoRecent<T> {
    /// Creates a filter remembering `window` values.
    pub fn new(window: usize) -> Self {
        Self {
            window,
            recent: VecDeque::with_capacity(window),
        }
    }

    /// Size of the history window.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Forgets all history.
    pub fn reset(&mut self) {
        self.recent.clear();
    }
}

impl<T: Clone + PartialEq> Filter<T> for NoRecent<T> {
    fn accepts(&mut self, candidate: &T) -> bool {
        !self.recent.contains(candidate)
    }

    fn record(&mut self, accepted: &T) {
        if self.window == 0 {
            return;
        }
        if self.recent.len() == self.window {
            self.recent.pop_front();
        }
        self.recent.push_back(accepted.clone());
    }
}

/// Rejects a fixed set of values.
#[derive(Clone, Debug)]
pub struct Exclude<T> {
    excluded: Vec<T>,
}

impl<T> Exclude<T> {
    /// Creates a filter rejecting every value in `excluded`.
    pub fn new(excluded: Vec<T>) -> Self {
        Self { excluded }
    }
}

impl<T: PartialEq> Filter<T> for Exclude<T> {
    fn accepts(&mut self, candidate: &T) -> bool {
        !self.excluded.contains(candidate)
    }
}

/// Closure-backed stateless filter.
#[derive(Clone, Debug)]
pub struct FnFilter<F>(F);

/// Wraps a predicate as a [`Filter`].
pub fn from_fn<T, F: FnMut(&T) -> bool>(predicate: F) -> FnFilter<F> {
    FnFilter(predicate)
}

impl<T, F: FnMut(&T) -> bool> Filter<T> for FnFilter<F> {
    fn accepts(&mut self, candidate: &T) -> bool {
        (self.0)(candidate)
    }
}

/// Generator that redraws until its filter accepts.
///
/// # Examples
///
/// ```rust
/// use sampler_core::engines::XorShift128;
/// use sampler_core::traits::Generator;
/// use sampler_distributions::discrete::filtered::{Filtered, NoRepeat};
/// use sampler_distributions::discrete::WeightedGenerator;
///
/// let dice = WeightedGenerator::try_new(XorShift128::default(), vec![1, 2, 3], &[1, 1, 1]).unwrap();
/// let mut rolls = Filtered::new(dice, NoRepeat::new());
///
/// let mut last = rolls.generate();
/// for _ in 0..100 {
///     let next = rolls.generate();
///     assert_ne!(next, last);
///     last = next;
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Filtered<G, F> {
    generator: G,
    filter: F,
}

impl<G, F> Filtered<G, F> {
    /// Wraps `generator` with `filter`.
    pub fn new(generator: G, filter: F) -> Self {
        Self { generator, filter }
    }

    /// Returns the inner generator mutably.
    pub fn generator_mut(&mut self) -> &mut G {
        &mut self.generator
    }

    /// Returns the filter mutably.
    pub fn filter_mut(&mut self) -> &mut F {
        &mut self.filter
    }

    /// Splits back into generator and filter.
    pub fn into_parts(self) -> (G, F) {
        (self.generator, self.filter)
    }
}

impl<T, G: Generator<T>, F: Filter<T>> Generator<T> for Filtered<G, F> {
    fn generate(&mut self) -> T {
        loop {
            let candidate = self.generator.generate();
            if self.filter.accepts(&candidate) {
                self.filter.record(&candidate);
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sampler_core::traits::generator;

    fn cycle(values: Vec<u32>) -> impl Generator<u32> {
        let mut iter = values.into_iter().cycle();
        generator::from_fn(move || iter.next().unwrap_or(0))
    }

    #[test]
    fn test_no_repeat_skips_consecutive_duplicates() {
        let mut filtered = Filtered::new(cycle(vec![1, 1, 2, 2, 3]), NoRepeat::new());
        let drawn: Vec<u32> = (0..4).map(|_| filtered.generate()).collect();
        assert_eq!(drawn, vec![1, 2, 3, 1]);
    }

    #[test]
    fn test_no_recent_window() {
        let mut filtered = Filtered::new(cycle(vec![1, 2, 1, 3, 2, 4]), NoRecent::new(2));
        let drawn: Vec<u32> = (0..4).map(|_| filtered.generate()).collect();
        // Window after accepting 3 is [2, 3], so the second 2 is rejected.
        assert_eq!(drawn, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_zero_window_accepts_everything() {
        let mut filtered = Filtered::new(cycle(vec![5, 5]), NoRecent::new(0));
        assert_eq!(filtered.generate(), 5);
        assert_eq!(filtered.generate(), 5);
    }

    #[test]
    fn test_exclude_and_closure_filters() {
        let mut excluded = Filtered::new(cycle(vec![1, 2, 3]), Exclude::new(vec![1, 2]));
        assert_eq!(excluded.generate(), 3);
        assert_eq!(excluded.generate(), 3);

        let mut even = Filtered::new(cycle(vec![1, 2, 3, 4]), from_fn(|x: &u32| x % 2 == 0));
        assert_eq!(even.generate(), 2);
        assert_eq!(even.generate(), 4);
    }

    #[test]
    fn test_reset_forgets_history() {
        let mut filter = NoRepeat::new();
        assert!(filter.accepts(&7));
        filter.record(&7);
        assert!(!filter.accepts(&7));
        filter.reset();
        assert!(filter.accepts(&7));
    }
}
