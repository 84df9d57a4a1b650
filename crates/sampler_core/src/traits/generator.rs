//! The `Generator` trait shared by every sampler.

use std::marker::PhantomData;

/// A stateful producer of samples of type `T`.
///
/// Every distribution generator implements this trait; the shared-instance
/// provider and filters are written against it.
///
/// # Examples
///
/// ```rust
/// use sampler_core::traits::generator::{self, Generator};
///
/// let mut counter = 0;
/// let mut gen = generator::from_fn(move || {
///     counter += 1;
///     counter
/// });
///
/// assert_eq!(gen.generate(), 1);
/// let next: Vec<i32> = gen.samples().take(3).collect();
/// assert_eq!(next, vec![2, 3, 4]);
/// ```
pub trait Generator<T> {
    /// Produces the next sample.
    fn generate(&mut self) -> T;

    /// Fills `buffer` with consecutive samples. Empty buffers are a no-op.
    #[inline]
    fn fill(&mut self, buffer: &mut [T]) {
        for value in buffer.iter_mut() {
            *value = self.generate();
        }
    }

    /// Returns an endless iterator over samples borrowed from this generator.
    #[inline]
    fn samples(&mut self) -> Samples<'_, Self, T>
    where
        Self: Sized,
    {
        Samples {
            generator: self,
            _marker: PhantomData,
        }
    }
}

impl<T, G: Generator<T> + ?Sized> Generator<T> for &mut G {
    #[inline]
    fn generate(&mut self) -> T {
        (**self).generate()
    }
}

impl<T, G: Generator<T> + ?Sized> Generator<T> for Box<G> {
    #[inline]
    fn generate(&mut self) -> T {
        (**self).generate()
    }
}

/// Endless iterator returned by [`Generator::samples`].
pub struct Samples<'a, G, T> {
    generator: &'a mut G,
    _marker: PhantomData<fn() -> T>,
}

impl<G: Generator<T>, T> Iterator for Samples<'_, G, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        Some(self.generator.generate())
    }
}

/// Closure-backed generator created by [`from_fn`].
#[derive(Clone, Debug)]
pub struct FromFn<F>(F);

/// Wraps a parameterless closure as a [`Generator`].
#[inline]
pub fn from_fn<T, F: FnMut() -> T>(f: F) -> FromFn<F> {
    FromFn(f)
}

impl<T, F: FnMut() -> T> Generator<T> for FromFn<F> {
    #[inline]
    fn generate(&mut self) -> T {
        (self.0)()
    }
}
