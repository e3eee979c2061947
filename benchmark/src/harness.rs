// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Measurement protocol for timing codec operations.
//!
//! Each operation goes through a wall-clock warmup, then `trials` timed
//! passes of `iterations` calls. Every pass yields a mean-per-call time and
//! the minimum across passes is reported: the minimum approximates the cost
//! with transient interference (scheduling, allocator churn) removed.

use std::fmt;
use std::hint::black_box;
use std::thread;
use std::time::{Duration, Instant};

use tpc_core::{CodecResult, Count, MeasurementSettings, ObjectCodec};

/// The three timed codec operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Serialize,
    Deserialize,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Serialize => write!(f, "serialize"),
            Operation::Deserialize => write!(f, "deserialize"),
        }
    }
}

/// Best-effort quiet window before a trial.
///
/// Sleeps, yields, sleeps again. Nothing guarantees that deferred
/// deallocation or background work actually happens during the window; it
/// only lowers jitter in the next trial and is never relied on for
/// correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvisoryPause {
    half: Duration,
}

impl AdvisoryPause {
    /// A pause sleeping `half` before and after the yield.
    pub fn new(half: Duration) -> Self {
        Self { half }
    }

    /// A pause that does nothing.
    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Take the pause.
    pub fn run(&self) {
        if self.half.is_zero() {
            return;
        }
        thread::sleep(self.half);
        thread::yield_now();
        thread::sleep(self.half);
    }
}

/// Drives warmup, trials and minimum selection for one codec at a time.
#[derive(Debug, Clone)]
pub struct MeasurementProtocol {
    settings: MeasurementSettings,
}

impl MeasurementProtocol {
    /// Create a protocol with default settings.
    pub fn new() -> Self {
        Self::from_settings(MeasurementSettings::default())
    }

    /// Create a protocol from validated settings.
    pub fn from_settings(settings: MeasurementSettings) -> Self {
        Self { settings }
    }

    /// Set the number of calls per trial. Zero is raised to one.
    pub fn iterations(mut self, iterations: u32) -> Self {
        self.settings.iterations = Count::at_least_one(iterations);
        self
    }

    /// Set the number of trials. Zero is raised to one.
    pub fn trials(mut self, trials: u32) -> Self {
        self.settings.trials = Count::at_least_one(trials);
        self
    }

    /// Set the warmup budget per operation.
    pub fn warmup(mut self, warmup: Duration) -> Self {
        self.settings.warmup = warmup;
        self
    }

    /// Set the construction iteration multiplier. Zero is raised to one.
    pub fn create_multiplier(mut self, multiplier: u32) -> Self {
        self.settings.create_multiplier = Count::at_least_one(multiplier);
        self
    }

    /// Set the length of each half of the advisory pause.
    pub fn pause(mut self, pause: Duration) -> Self {
        self.settings.pause = pause;
        self
    }

    /// Pause every `every` serialize calls inside a trial. 0 disables.
    pub fn serialize_pause_every(mut self, every: u32) -> Self {
        self.settings.serialize_pause_every = every;
        self
    }

    /// The settings this protocol runs with.
    pub fn settings(&self) -> &MeasurementSettings {
        &self.settings
    }

    fn advisory_pause(&self) -> AdvisoryPause {
        AdvisoryPause::new(self.settings.pause)
    }

    /// Calls per trial for `operation`.
    pub fn calls_per_trial(&self, operation: Operation) -> u32 {
        match operation {
            Operation::Create => self.settings.create_iterations(),
            Operation::Serialize | Operation::Deserialize => self.settings.iterations.get(),
        }
    }

    /// Invoke `operation` one call at a time until the warmup budget is
    /// spent, discarding timings. Always runs at least once.
    ///
    /// Returns the number of warmup calls made.
    pub fn warm_up(&self, codec: &dyn ObjectCodec, operation: Operation) -> CodecResult<u64> {
        let calls = match operation {
            Operation::Create => self.warm(|| create_objects(codec, 1))?,
            Operation::Serialize => self.warm(|| self.serialize_objects(codec, 1, false))?,
            Operation::Deserialize => {
                let buffer = codec.serialize(&codec.create()?)?;
                self.warm(|| deserialize_objects(codec, &buffer, 1))?
            }
        };

        tracing::debug!(
            codec = codec.name(),
            operation = %operation,
            calls = calls,
            "Warmup complete"
        );
        Ok(calls)
    }

    /// Run the trials for `operation` and return the minimum
    /// mean-per-call time in nanoseconds.
    pub fn measure(&self, codec: &dyn ObjectCodec, operation: Operation) -> CodecResult<f64> {
        let calls = self.calls_per_trial(operation);
        let best = match operation {
            Operation::Create => self.best_of_trials(|| create_objects(codec, calls))?,
            Operation::Serialize => {
                self.best_of_trials(|| self.serialize_objects(codec, calls, true))?
            }
            Operation::Deserialize => {
                // One buffer up front isolates decode cost from encode cost.
                let buffer = codec.serialize(&codec.create()?)?;
                self.best_of_trials(|| deserialize_objects(codec, &buffer, calls))?
            }
        };

        tracing::debug!(
            codec = codec.name(),
            operation = %operation,
            best_ns = best,
            "Trials complete"
        );
        Ok(best)
    }

    fn warm<F>(&self, mut operation: F) -> CodecResult<u64>
    where
        F: FnMut() -> CodecResult<f64>,
    {
        let deadline = Instant::now() + self.settings.warmup;
        let mut calls = 0u64;
        loop {
            black_box(operation()?);
            calls += 1;
            if Instant::now() >= deadline {
                return Ok(calls);
            }
        }
    }

    fn best_of_trials<F>(&self, mut trial: F) -> CodecResult<f64>
    where
        F: FnMut() -> CodecResult<f64>,
    {
        let pause = self.advisory_pause();
        let mut means = Vec::with_capacity(self.settings.trials.get() as usize);
        for _ in 0..self.settings.trials.get() {
            pause.run();
            means.push(trial()?);
        }
        Ok(select_minimum(means))
    }

    fn serialize_objects(
        &self,
        codec: &dyn ObjectCodec,
        iterations: u32,
        pause_between: bool,
    ) -> CodecResult<f64> {
        let every = self.settings.serialize_pause_every;
        let pause = self.advisory_pause();
        let mut delta = 0u64;
        for i in 0..iterations {
            // Construction is not part of the serialize cost.
            let media = codec.create()?;
            let timer = Timer::start();
            let result = codec.serialize(&media);
            delta += timer.stop();
            black_box(result?);
            if pause_between && every > 0 && i % every == 0 {
                pause.run();
            }
        }
        Ok(iteration_time(delta, iterations))
    }
}

impl Default for MeasurementProtocol {
    fn default() -> Self {
        Self::new()
    }
}

fn create_objects(codec: &dyn ObjectCodec, iterations: u32) -> CodecResult<f64> {
    let mut delta = 0u64;
    for _ in 0..iterations {
        let timer = Timer::start();
        let result = codec.create();
        delta += timer.stop();
        black_box(result?);
    }
    Ok(iteration_time(delta, iterations))
}

fn deserialize_objects(codec: &dyn ObjectCodec, buffer: &[u8], iterations: u32) -> CodecResult<f64> {
    let mut delta = 0u64;
    for _ in 0..iterations {
        let timer = Timer::start();
        let result = codec.deserialize(black_box(buffer));
        delta += timer.stop();
        black_box(result?);
    }
    Ok(iteration_time(delta, iterations))
}

/// Mean nanoseconds per call.
///
/// Clock granularity can report zero for very cheap calls, so the total is
/// floored at 1ns; the call count is floored at 1.
pub fn iteration_time(total_ns: u64, iterations: u32) -> f64 {
    total_ns.max(1) as f64 / iterations.max(1) as f64
}

/// Minimum of the trial means. Infinity when there are no trials.
pub fn select_minimum(means: impl IntoIterator<Item = f64>) -> f64 {
    means.into_iter().fold(f64::INFINITY, f64::min)
}

/// Timer for measuring individual operations.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Stop the timer and return elapsed nanoseconds.
    pub fn stop(self) -> u64 {
        self.start.elapsed().as_nanos() as u64
    }
}
