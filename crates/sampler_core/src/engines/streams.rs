//! Per-thread engine streams.
//!
//! Engines are not shared between threads. These helpers derive one engine
//! per worker from a base engine using [`Engine::forward`], so workers
//! consume disjoint segments of the same sequence.
//!
//! # Example
//!
//! ```rust
//! use sampler_core::engines::{streams, Engine, XorShift64};
//!
//! let base = XorShift64::default();
//! let mut sequential = vec![0.0_f32; 10_000];
//! base.clone().fill_floats(&mut sequential);
//!
//! let mut parallel = vec![0.0_f32; 10_000];
//! streams::par_fill_floats(&base, &mut parallel, 1_024);
//!
//! assert_eq!(sequential, parallel);
//! ```

use rayon::prelude::*;

use super::Engine;

/// Returns `count` engines, the `k`-th forwarded by `k * stride` steps.
///
/// `stride` should exceed the number of draws each stream will make;
/// otherwise neighbouring streams overlap.
pub fn split<E: Engine>(base: &E, count: usize, stride: u64) -> Vec<E> {
    let mut streams = Vec::with_capacity(count);
    let mut current = base.clone();
    for index in 0..count {
        if index > 0 {
            current.forward(stride);
        }
        streams.push(current.clone());
    }
    streams
}

/// Fills `buffer` in parallel with exactly the sequence `fill_floats` on a
/// clone of `base` would produce.
///
/// Each chunk of `chunk_len` values gets its own engine forwarded to the
/// chunk's offset. This relies on `next_float` costing one state step,
/// which holds for every engine in this crate. `base` itself is not advanced.
pub fn par_fill_floats<E>(base: &E, buffer: &mut [f32], chunk_len: usize)
where
    E: Engine + Sync + Send,
{
    let chunk_len = chunk_len.max(1);
    buffer
        .par_chunks_mut(chunk_len)
        .enumerate()
        .for_each(|(index, chunk)| {
            let mut engine = base.clone();
            engine.forward((index * chunk_len) as u64);
            engine.fill_floats(chunk);
        });
}

/// Fills `buffer` in parallel with doubles, one forwarded engine per chunk.
///
/// Matches sequential `fill_doubles` for engines whose `next_double` costs
/// one state step, which is every engine in this crate.
pub fn par_fill_doubles<E>(base: &E, buffer: &mut [f64], chunk_len: usize)
where
    E: Engine + Sync + Send,
{
    let chunk_len = chunk_len.max(1);
    buffer
        .par_chunks_mut(chunk_len)
        .enumerate()
        .for_each(|(index, chunk)| {
            let mut engine = base.clone();
            engine.forward((index * chunk_len) as u64);
            engine.fill_doubles(chunk);
        });
}
