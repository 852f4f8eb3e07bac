//! Progress line on stderr while a listing is read

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

const DEFAULT_INTERVAL: u64 = 10_000;

/// Advisory entry counter. Drawing failures are ignored.
pub struct Progress<W = StandardStream> {
    out: Option<W>,
    interval: u64,
    count: u64,
    drawn: bool,
}

impl Progress {
    /// Report on stderr if `enabled`.
    pub fn new(enabled: bool) -> Self {
        Self::with_output(enabled.then(|| StandardStream::stderr(ColorChoice::Auto)))
    }

    pub fn hidden() -> Self {
        Self::new(false)
    }
}

impl<W: WriteColor> Progress<W> {
    /// Report to `out`, or nowhere when `None`.
    pub fn with_output(out: Option<W>) -> Self {
        Self {
            out,
            interval: DEFAULT_INTERVAL,
            count: 0,
            drawn: false,
        }
    }

    /// Redraw after every `interval` entries.
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn tick(&mut self) {
        self.count += 1;
        if self.count % self.interval == 0 {
            self.draw();
        }
    }

    fn draw(&mut self) {
        let Some(out) = self.out.as_mut() else {
            return;
        };
        let _ = write!(out, "\rread ");
        let _ = out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true));
        let _ = write!(out, "{}", self.count);
        let _ = out.reset();
        let _ = write!(out, " entries");
        let _ = out.flush();
        self.drawn = true;
    }

    /// Draw the final count and end the line.
    pub fn finish(&mut self) {
        if self.out.is_none() {
            return;
        }
        self.draw();
        if let Some(out) = self.out.as_mut() {
            let _ = writeln!(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use termcolor::NoColor;

    use super::*;

    #[test]
    fn test_draws_every_interval_and_on_finish() {
        let mut progress = Progress::with_output(Some(NoColor::new(Vec::new()))).with_interval(2);
        for _ in 0..5 {
            progress.tick();
        }
        progress.finish();
        assert!(progress.drawn);
        let out = progress.out.take().unwrap().into_inner();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\rread 2 entries\rread 4 entries\rread 5 entries\n"
        );
    }

    #[test]
    fn test_finish_without_entries_draws_zero() {
        let mut progress = Progress::with_output(Some(NoColor::new(Vec::new())));
        progress.finish();
        let out = progress.out.take().unwrap().into_inner();
        assert_eq!(String::from_utf8(out).unwrap(), "\rread 0 entries\n");
    }

    #[test]
    fn test_hidden_counts_without_output() {
        let mut progress = Progress::hidden().with_interval(2);
        for _ in 0..5 {
            progress.tick();
        }
        progress.finish();
        assert_eq!(progress.count(), 5);
        assert!(!progress.drawn);
    }
}
