//! Weighted discrete sampling over a fixed table of values.
//!
//! [`WeightedTable`] stores the running sum of the integer weights. A draw
//! picks an integer in `[0, total)` and binary-searches the running sums for
//! the first bucket whose upper edge exceeds it. Zero-weight entries have an
//! empty bucket and are never returned.
//!
//! An `f32` IID value carries [`IID_BITS`] random bits. Totals up to
//! `2^IID_BITS` use one value per draw; larger totals combine two values
//! into a [`MAX_TOTAL_BITS`]-bit fraction and scale it with a widened
//! multiply, so every integer in `[0, total)` stays reachable. Tables whose
//! total exceeds `2^MAX_TOTAL_BITS` are rejected.

use sampler_core::engines::DefaultEngine;
use sampler_core::iid::IidSource;
use sampler_core::traits::Generator;
use sampler_core::types::ParameterError;

use crate::provider::GeneratorConfig;

/// Random bits carried by one IID value from an engine.
pub const IID_BITS: u32 = 23;

/// Largest supported total weight, as a power of two.
pub const MAX_TOTAL_BITS: u32 = 2 * IID_BITS;

/// Values paired with non-negative integer weights.
///
/// # Examples
///
/// ```rust
/// use sampler_core::engines::XorShift128;
/// use sampler_distributions::discrete::WeightedTable;
///
/// let table = WeightedTable::new(vec!["a", "b", "c"], &[0, 0, 5]).unwrap();
/// let mut engine = XorShift128::default();
/// assert_eq!(*table.sample(&mut engine), "c");
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedTable<T> {
    values: Vec<T>,
    cumulative: Vec<u64>,
}

impl<T> WeightedTable<T> {
    /// Builds the table, rejecting mismatched lengths, empty input and an
    /// all-zero weight vector.
    pub fn new(values: Vec<T>, weights: &[u32]) -> Result<Self, ParameterError> {
        let cumulative = cumulative_weights(values.len(), weights)?;
        Ok(Self { values, cumulative })
    }

    /// Number of entries, including zero-weight ones.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; construction rejects empty tables.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of all weights.
    #[inline]
    pub fn total_weight(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// The values in insertion order.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Weight of entry `index`.
    pub fn weight(&self, index: usize) -> u64 {
        let upper = self.cumulative[index];
        let lower = if index == 0 { 0 } else { self.cumulative[index - 1] };
        upper - lower
    }

    /// Replaces the weights, keeping the values.
    ///
    /// On error the table is left unchanged.
    pub fn set_weights(&mut self, weights: &[u32]) -> Result<(), ParameterError> {
        self.cumulative = cumulative_weights(self.values.len(), weights)?;
        Ok(())
    }

    /// Index of the bucket containing `draw`, for `draw < total_weight()`.
    #[inline]
    pub fn index_of(&self, draw: u64) -> usize {
        self.cumulative.partition_point(|&upper| upper <= draw)
    }

    /// Draws one index.
    #[inline]
    pub fn sample_index<S: IidSource + ?Sized>(&self, source: &mut S) -> usize {
        let total = self.total_weight();
        let draw = if total <= 1 << IID_BITS {
            (source.next_iid() as f64 * total as f64) as u64
        } else {
            let high = iid_bits(source);
            let low = iid_bits(source);
            let fraction = (high << IID_BITS) + low;
            ((fraction as u128 * total as u128) >> MAX_TOTAL_BITS) as u64
        };
        self.index_of(draw.min(total - 1))
    }

    /// Draws one value.
    #[inline]
    pub fn sample<S: IidSource + ?Sized>(&self, source: &mut S) -> &T {
        &self.values[self.sample_index(source)]
    }
}

/// One IID value as an integer in `[0, 2^IID_BITS]`.
#[inline]
fn iid_bits<S: IidSource + ?Sized>(source: &mut S) -> u64 {
    (source.next_iid() as f64 * (1u64 << IID_BITS) as f64) as u64
}

fn cumulative_weights(values: usize, weights: &[u32]) -> Result<Vec<u64>, ParameterError> {
    if values != weights.len() {
        return Err(ParameterError::LengthMismatch {
            values,
            weights: weights.len(),
        });
    }
    if values == 0 {
        return Err(ParameterError::Empty("values"));
    }
    let cumulative: Vec<u64> = weights
        .iter()
        .scan(0u64, |running, &w| {
            *running += w as u64;
            Some(*running)
        })
        .collect();
    match cumulative.last() {
        Some(&0) => Err(ParameterError::ZeroTotalWeight),
        Some(&total) if total > 1 << MAX_TOTAL_BITS => Err(ParameterError::OutOfRange {
            name: "total weight",
            value: total as f64,
            expected: "<= 2^46",
        }),
        _ => Ok(cumulative),
    }
}

/// Weighted generator owning its table and source.
#[derive(Clone, Debug)]
pub struct WeightedGenerator<T, S> {
    table: WeightedTable<T>,
    source: S,
}

impl<T: Clone, S: IidSource> WeightedGenerator<T, S> {
    /// Creates a generator from an existing table.
    pub fn new(source: S, table: WeightedTable<T>) -> Self {
        Self { table, source }
    }

    /// Builds the table and the generator in one step.
    pub fn try_new(source: S, values: Vec<T>, weights: &[u32]) -> Result<Self, ParameterError> {
        Ok(Self::new(source, WeightedTable::new(values, weights)?))
    }

    /// Returns the table.
    #[inline]
    pub fn table(&self) -> &WeightedTable<T> {
        &self.table
    }

    /// Replaces the weights; see [`WeightedTable::set_weights`].
    pub fn set_weights(&mut self, weights: &[u32]) -> Result<(), ParameterError> {
        self.table.set_weights(weights)
    }

    /// Replaces the source and returns the old one.
    pub fn set_source(&mut self, source: S) -> S {
        std::mem::replace(&mut self.source, source)
    }

    /// Returns the source mutably.
    #[inline]
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<T: Clone, S: IidSource> Generator<T> for WeightedGenerator<T, S> {
    #[inline]
    fn generate(&mut self) -> T {
        self.table.sample(&mut self.source).clone()
    }
}

impl<T: Clone> GeneratorConfig for WeightedTable<T> {
    type Sample = T;
    type Generator = WeightedGenerator<T, DefaultEngine>;

    fn build(&self, engine: DefaultEngine) -> Self::Generator {
        WeightedGenerator::new(engine, self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sampler_core::engines::{Engine, XorShift128, XorShift64};
    use sampler_core::iid;

    #[test]
    fn test_zero_weights_are_unreachable() {
        let mut weighted =
            WeightedGenerator::try_new(XorShift128::default(), vec!['a', 'b', 'c'], &[0, 0, 5]).unwrap();
        for _ in 0..10_000 {
            assert_eq!(weighted.generate(), 'c');
        }
    }

    #[test]
    fn test_bucket_edges() {
        let table = WeightedTable::new(vec![10, 20, 30], &[1, 0, 3]).unwrap();
        assert_eq!(table.index_of(0), 0);
        assert_eq!(table.index_of(1), 2);
        assert_eq!(table.index_of(3), 2);
        assert_eq!(table.weight(0), 1);
        assert_eq!(table.weight(1), 0);
        assert_eq!(table.weight(2), 3);
        assert_eq!(table.total_weight(), 4);
    }

    #[test]
    fn test_draw_near_one_stays_in_last_bucket() {
        let table = WeightedTable::new(vec![1, 2], &[1, 1]).unwrap();
        let mut source = iid::from_fn(|| 1.0);
        assert_eq!(*table.sample(&mut source), 2);
    }

    #[test]
    fn test_frequencies_follow_weights() {
        let mut weighted =
            WeightedGenerator::try_new(XorShift64::default(), vec![0usize, 1, 2], &[1, 2, 7]).unwrap();
        let n = 100_000;
        let mut counts = [0usize; 3];
        for _ in 0..n {
            counts[weighted.generate()] += 1;
        }
        let expected = [0.1, 0.2, 0.7];
        for (count, p) in counts.iter().zip(expected) {
            let observed = *count as f64 / n as f64;
            assert!((observed - p).abs() < 0.01, "observed {} expected {}", observed, p);
        }
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            WeightedTable::new(vec![1, 2], &[1]),
            Err(ParameterError::LengthMismatch { values: 2, weights: 1 })
        );
        assert_eq!(
            WeightedTable::<i32>::new(vec![], &[]),
            Err(ParameterError::Empty("values"))
        );
        assert_eq!(
            WeightedTable::new(vec![1, 2], &[0, 0]),
            Err(ParameterError::ZeroTotalWeight)
        );
    }

    #[test]
    fn test_large_total_reaches_single_weight_bucket() {
        // Total 2^24: 'b' owns only the integer 2^23 + 1, which a single
        // 23-bit draw scaled by 2 can never land on.
        let table = WeightedTable::new(vec!['a', 'b', 'c'], &[(1 << 23) + 1, 1, (1 << 23) - 2]).unwrap();
        assert_eq!(table.total_weight(), 1 << 24);
        let mut source = iid::from_fn(|| 0.5);
        assert_eq!(*table.sample(&mut source), 'b');
    }

    #[test]
    fn test_large_total_uses_two_draws() {
        let table = WeightedTable::new(vec![0, 1], &[1 << 24, 1 << 24]).unwrap();
        let mut calls = 0;
        let mut source = iid::from_fn(|| {
            calls += 1;
            0.25
        });
        assert_eq!(*table.sample(&mut source), 0);
        drop(source);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_large_total_frequencies() {
        let mut weighted = WeightedGenerator::try_new(
            XorShift128::default(),
            vec![0usize, 1, 2],
            &[u32::MAX, 1 << 30, u32::MAX],
        )
        .unwrap();
        let n = 100_000;
        let mut counts = [0usize; 3];
        for _ in 0..n {
            counts[weighted.generate()] += 1;
        }
        let total = 2.0 * u32::MAX as f64 + (1u64 << 30) as f64;
        let middle = counts[1] as f64 / n as f64;
        let expected = (1u64 << 30) as f64 / total;
        assert!((middle - expected).abs() < 0.01, "observed {} expected {}", middle, expected);
    }

    #[test]
    fn test_total_beyond_draw_resolution_is_rejected() {
        let weights = vec![u32::MAX; 16_386];
        let values: Vec<usize> = (0..weights.len()).collect();
        assert!(matches!(
            WeightedTable::new(values, &weights),
            Err(ParameterError::OutOfRange { name: "total weight", .. })
        ));
    }

    #[test]
    fn test_set_weights_keeps_table_on_error() {
        let mut table = WeightedTable::new(vec!['x', 'y'], &[1, 1]).unwrap();
        assert!(table.set_weights(&[0, 0]).is_err());
        assert_eq!(table.total_weight(), 2);
        table.set_weights(&[0, 4]).unwrap();
        assert_eq!(table.weight(1), 4);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_never_returns_zero_weight_entry(
            seed in 1u64..,
            weights in prop::collection::vec(0u32..5, 1..20),
        ) {
            prop_assume!(weights.iter().any(|&w| w > 0));
            let indices: Vec<usize> = (0..weights.len()).collect();
            let table = WeightedTable::new(indices, &weights).unwrap();
            let mut engine = XorShift64::with_state(seed);
            for _ in 0..200 {
                let index = *table.sample(&mut engine);
                prop_assert!(weights[index] > 0);
            }
        }
    }
}
