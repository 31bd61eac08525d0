//! Two-sample set debouncer
//!
//! A raw set becomes stable only when the previous tick sampled the same
//! set, compared without regard to order. Any change yields an empty stable
//! set for that tick, so contact bounce never produces a phantom press.

use heapless::Vec;

/// Debouncer over sets of up to `N` items
#[derive(Debug, Clone)]
pub struct Debouncer<T, const N: usize> {
    last: Vec<T, N>,
}

impl<T, const N: usize> Default for Debouncer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Debouncer<T, N> {
    pub const fn new() -> Self {
        Self { last: Vec::new() }
    }
}

impl<T: PartialEq + Clone, const N: usize> Debouncer<T, N> {
    /// Feed this tick's raw sample and get the stable set
    pub fn update(&mut self, raw: &[T]) -> Vec<T, N> {
        let sample: Vec<T, N> = raw.iter().take(N).cloned().collect();
        let stable = if same_set(&sample, &self.last) {
            sample.clone()
        } else {
            Vec::new()
        };
        self.last = sample;
        stable
    }

    /// Raw sample kept from the last update
    pub fn last_sample(&self) -> &[T] {
        &self.last
    }
}

/// Unordered equality of two small sets
pub fn same_set<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().all(|x| b.contains(x)) && b.iter().all(|x| a.contains(x))
}
