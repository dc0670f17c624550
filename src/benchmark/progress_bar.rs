//! Chunk timing helpers for the benchmark progress bar.
//!
//! The benchmark loop solves orbits in fixed-size chunks when the `progress` feature is
//! enabled. [`ChunkTimer`] measures each chunk and keeps an exponential moving average
//! of the chunk duration; [`fmt_dur`] renders durations for the bar message and for
//! [`BenchReport`](crate::benchmark::bench_run::BenchReport).
//!
//! ```rust
//! use danby::benchmark::progress_bar::{fmt_dur, ChunkTimer};
//!
//! let mut timer = ChunkTimer::new(0.2);
//! for _ in 0..3 {
//!     // ... solve a chunk of orbits ...
//!     let dt = timer.tick();
//!     println!("last: {}, avg: {}", fmt_dur(dt), fmt_dur(timer.avg()));
//! }
//! assert_eq!(timer.chunks(), 3);
//! ```
use std::time::{Duration, Instant};

/// Wall-clock timer with a smoothed per-chunk duration.
///
/// The average follows `ema ← ema + α·(dt − ema)`, seeded with the first chunk.
#[derive(Debug, Clone)]
pub struct ChunkTimer {
    last: Instant,
    alpha: f64,
    ema_secs: Option<f64>,
    chunks: u64,
}

impl ChunkTimer {
    /// `alpha` is the smoothing factor in `(0, 1]`; `1.0` keeps only the last chunk.
    pub fn new(alpha: f64) -> Self {
        Self {
            last: Instant::now(),
            alpha,
            ema_secs: None,
            chunks: 0,
        }
    }

    /// Close the current chunk and return its duration.
    #[inline]
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        self.record(dt);
        dt
    }

    /// Fold an externally measured chunk duration into the average.
    pub fn record(&mut self, dt: Duration) {
        let x = dt.as_secs_f64();
        self.ema_secs = Some(match self.ema_secs {
            None => x,
            Some(ema) => ema + self.alpha * (x - ema),
        });
        self.chunks += 1;
    }

    /// Smoothed chunk duration, zero before the first chunk.
    pub fn avg(&self) -> Duration {
        Duration::from_secs_f64(self.ema_secs.unwrap_or(0.0))
    }

    pub fn chunks(&self) -> u64 {
        self.chunks
    }
}

/// Format a duration as `"253µs"`, `"42ms"` or `"3.14s"` depending on its scale.
pub fn fmt_dur(d: Duration) -> String {
    match d.as_micros() {
        us @ 0..=999 => format!("{us}µs"),
        us if us < 1_000_000 => format!("{}ms", us / 1_000),
        _ => format!("{:.2}s", d.as_secs_f64()),
    }
}
