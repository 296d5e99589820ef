use std::io::{self, Write};
use std::time::{Duration, SystemTime};

use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};

use super::metrics::{BatchMetrics, MetricsArtifact};

/// Default minimum gap between two progress lines.
pub const PROGRESS_INTERVAL: Duration = Duration::from_millis(333);

/// Throttled progress lines and the final summary table.
pub struct ProgressReporter<W: Write> {
    out: W,
    interval: Duration,
    color: bool,
    last_line: Option<SystemTime>,
}

impl<W: Write> ProgressReporter<W> {
    pub fn new(out: W, interval: Duration, color: bool) -> Self {
        Self {
            out,
            interval,
            color,
            last_line: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Prints a progress line unless one went out less than the interval
    /// ago. A clock that moved backwards counts as no time passing.
    pub fn tick(&mut self, metrics: &BatchMetrics, now: SystemTime) -> io::Result<bool> {
        if let Some(last) = self.last_line {
            let delta = now.duration_since(last).unwrap_or(Duration::ZERO);
            if delta < self.interval {
                return Ok(false);
            }
        }
        self.last_line = Some(now);

        let elapsed = metrics.elapsed(now);
        self.colored(Color::Cyan, &format!("{:>7}", metrics.processed_count()))?;
        self.plain(" tooltips  ")?;
        self.colored(Color::Cyan, &format!("{:>4}", metrics.file_count()))?;
        self.plain(" files  ")?;
        self.colored(Color::Green, &format!("{:>8.1}/s", metrics.rate(elapsed)))?;
        self.plain(&format!("  {:.1}s\n", elapsed.as_secs_f64()))?;
        self.out.flush()?;
        Ok(true)
    }

    /// One-row summary table.
    pub fn summary(&mut self, artifact: &MetricsArtifact) -> io::Result<()> {
        let s = &artifact.summary;
        let header = format!(
            "{:<12} {:>10} {:>8} {:>12} {:>8}",
            "duration", "tooltips", "files", "rate", "errors"
        );
        let row = format!(
            "{:<12} {:>10} {:>8} {:>12} {:>8}",
            s.duration, s.tooltips_processed, s.files_processed, s.average_rate, s.errors
        );

        if self.color {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        self.plain(&header)?;
        if self.color {
            queue!(self.out, SetAttribute(Attribute::Reset))?;
        }
        self.plain("\n")?;
        self.plain(&format!("{}\n", "-".repeat(header.len())))?;
        let color = if s.errors > 0 { Color::Yellow } else { Color::Green };
        self.colored(color, &row)?;
        self.plain("\n")?;
        self.out.flush()
    }

    fn plain(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Print(text))
    }

    fn colored(&mut self, color: Color, text: &str) -> io::Result<()> {
        if self.color {
            queue!(self.out, SetForegroundColor(color), Print(text), ResetColor)
        } else {
            self.plain(text)
        }
    }
}
