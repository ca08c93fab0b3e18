//! Timing utilities for compiler stages.

use std::{
    cell::RefCell,
    time::{Duration, Instant},
};

use indexmap::IndexMap;
use log::{Level, log_enabled};

/// A collection of timings for each section of a stage.
#[derive(Default, Debug, Clone)]
pub struct StageMetrics {
    /// The collected timings for each section of the stage.
    pub timings: IndexMap<&'static str, Duration>,
}

impl StageMetrics {
    /// Merge another set of metrics into this one.
    pub fn merge(&mut self, other: &StageMetrics) {
        for (name, time) in &other.timings {
            self.timings.entry(name).and_modify(|e| *e += *time).or_insert(*time);
        }
    }

    /// Create an iterator over the collected timings.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Duration)> + '_ {
        self.timings.iter().map(|(item, time)| (*item, *time))
    }
}

/// Execute the given closure while timing it, and pass the duration to the
/// second closure. The clock is only read if `level` is enabled.
#[inline(always)]
pub fn timed<T>(op: impl FnOnce() -> T, level: Level, on_elapsed: impl FnOnce(Duration)) -> T {
    if log_enabled!(level) {
        let begin = Instant::now();
        let result = op();
        on_elapsed(begin.elapsed());
        result
    } else {
        op()
    }
}

/// Interior-mutable [StageMetrics], for stages that only hold a shared
/// reference to themselves while running.
#[derive(Default, Debug, Clone)]
pub struct CellStageMetrics {
    pub timings: RefCell<IndexMap<&'static str, Duration>>,
}

impl CellStageMetrics {
    /// Clear all of the recorded timings.
    pub fn reset(&self) {
        self.timings.borrow_mut().clear();
    }
}

/// Implemented by compiler stages that record the [Duration] of the
/// sections they run.
pub trait HasMetrics {
    fn metrics(&self) -> &CellStageMetrics;

    fn add_metric(&self, name: &'static str, time: Duration) {
        self.metrics().timings.borrow_mut().entry(name).and_modify(|e| *e += time).or_insert(time);
    }

    /// Time the execution of an item, whilst saving the result to the
    /// metrics.
    fn time_item<T>(&self, name: &'static str, f: impl FnOnce(&Self) -> T) -> T {
        let mut time = Duration::default();
        let value = timed(|| f(self), Level::Info, |duration| time = duration);

        self.add_metric(name, time);
        value
    }
}

impl From<CellStageMetrics> for StageMetrics {
    fn from(metrics: CellStageMetrics) -> Self {
        StageMetrics { timings: metrics.timings.into_inner() }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn merging_accumulates_sections() {
        let mut first = StageMetrics::default();
        first.timings.insert("check", Duration::from_millis(2));

        let mut second = StageMetrics::default();
        second.timings.insert("check", Duration::from_millis(3));
        second.timings.insert("lower", Duration::from_millis(1));

        first.merge(&second);

        let collected: Vec<_> = first.iter().collect();
        assert_eq!(
            collected,
            vec![("check", Duration::from_millis(5)), ("lower", Duration::from_millis(1))]
        );
    }
}
