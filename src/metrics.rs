//! Per-run phase timings
//!
//! A [`Timings`] is created for each run and passed to whoever needs it. When
//! disabled it records nothing, so callers can time phases unconditionally.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use termcolor::{Color, ColorSpec, WriteColor};

/// Elapsed time per named phase, in the order phases first ran.
#[derive(Debug, Default)]
pub struct Timings {
    enabled: bool,
    phases: Vec<(&'static str, Duration)>,
}

impl Timings {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            phases: Vec::new(),
        }
    }

    /// Run `f`, charging its wall time to `phase`.
    pub fn time<T>(&mut self, phase: &'static str, f: impl FnOnce() -> T) -> T {
        if !self.enabled {
            return f();
        }
        let start = Instant::now();
        let result = f();
        self.record(phase, start.elapsed());
        result
    }

    /// Add `elapsed` to `phase`; repeated phases accumulate.
    pub fn record(&mut self, phase: &'static str, elapsed: Duration) {
        if !self.enabled {
            return;
        }
        match self.phases.iter_mut().find(|(name, _)| *name == phase) {
            Some((_, total)) => *total += elapsed,
            None => self.phases.push((phase, elapsed)),
        }
    }

    pub fn get(&self, phase: &str) -> Option<Duration> {
        self.phases
            .iter()
            .find(|(name, _)| *name == phase)
            .map(|(_, d)| *d)
    }

    pub fn phases(&self) -> &[(&'static str, Duration)] {
        &self.phases
    }

    /// Print one line per phase plus a total.
    pub fn report<W: WriteColor>(&self, out: &mut W) -> io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let width = self.phases.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        let total: Duration = self.phases.iter().map(|(_, d)| *d).sum();
        for (name, elapsed) in self.phases.iter().chain([&("total", total)]) {
            write!(out, "timing: {:width$}  ", name, width = width.max(5))?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            write!(out, "{}", humantime::format_duration(round_to_micros(*elapsed)))?;
            out.reset()?;
            writeln!(out)?;
        }
        Ok(())
    }
}

fn round_to_micros(d: Duration) -> Duration {
    Duration::from_micros(d.as_micros() as u64)
}
