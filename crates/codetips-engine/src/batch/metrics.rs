use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::time::{Duration, SystemTime};

use serde::Serialize;

use crate::tooltips::TooltipRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermStats {
    pub count: u64,
    pub type_set: BTreeSet<&'static str>,
    pub error_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsError {
    pub term: String,
    pub detail: String,
}

/// Counters for one batch. Owned and mutated by the runner only.
#[derive(Debug, Default)]
pub struct BatchMetrics {
    processed_count: u64,
    files: HashSet<String>,
    started_at: Option<SystemTime>,
    finished_at: Option<SystemTime>,
    per_term: BTreeMap<String, TermStats>,
    errors: Vec<MetricsError>,
}

impl BatchMetrics {
    /// Marks the start of the batch; later calls keep the first time.
    pub fn start(&mut self, now: SystemTime) {
        self.started_at.get_or_insert(now);
    }

    pub fn file_seen(&mut self, file: &str) {
        if !self.files.contains(file) {
            self.files.insert(file.to_string());
        }
    }

    /// One tick per emitted tooltip.
    pub fn record(&mut self, record: &TooltipRecord) {
        self.processed_count += 1;
        let stats = self.per_term.entry(record.term().to_string()).or_default();
        stats.count += 1;
        stats.type_set.insert(record.kind.type_name());
        if record.kind.is_error() {
            stats.error_count += 1;
        }
    }

    pub fn record_error(&mut self, term: impl Into<String>, detail: impl Into<String>) {
        self.errors.push(MetricsError {
            term: term.into(),
            detail: detail.into(),
        });
    }

    pub fn freeze(&mut self, now: SystemTime) {
        self.start(now);
        self.finished_at.get_or_insert(now);
    }

    pub fn processed_count(&self) -> u64 {
        self.processed_count
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn started_at(&self) -> Option<SystemTime> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<SystemTime> {
        self.finished_at
    }

    pub fn per_term(&self) -> &BTreeMap<String, TermStats> {
        &self.per_term
    }

    pub fn errors(&self) -> &[MetricsError] {
        &self.errors
    }

    /// Time from start to `now`, or to the freeze once frozen. Zero when the
    /// clock went backwards.
    pub fn elapsed(&self, now: SystemTime) -> Duration {
        let Some(started) = self.started_at else {
            return Duration::ZERO;
        };
        self.finished_at
            .unwrap_or(now)
            .duration_since(started)
            .unwrap_or(Duration::ZERO)
    }

    /// Tooltips per second over `elapsed`.
    pub fn rate(&self, elapsed: Duration) -> f64 {
        let secs = elapsed.as_secs_f64();
        if secs > 0.0 {
            self.processed_count as f64 / secs
        } else {
            0.0
        }
    }

    /// The serialized form. Depends only on frozen state once
    /// [`freeze`](Self::freeze) has run.
    pub fn artifact(&self, now: SystemTime) -> MetricsArtifact {
        let elapsed = self.elapsed(now);
        MetricsArtifact {
            summary: Summary {
                duration: format!("{:.3}s", elapsed.as_secs_f64()),
                tooltips_processed: self.processed_count,
                files_processed: self.files.len(),
                average_rate: format!("{:.2}/s", self.rate(elapsed)),
                errors: self.errors.len(),
            },
            errors: self.errors.clone(),
            tooltip_stats: self
                .per_term
                .iter()
                .map(|(term, stats)| TooltipStat {
                    term: term.clone(),
                    count: stats.count,
                    types: stats.type_set.iter().map(|t| t.to_string()).collect(),
                    errors: stats.error_count,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsArtifact {
    pub summary: Summary,
    pub errors: Vec<MetricsError>,
    pub tooltip_stats: Vec<TooltipStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// `"<seconds>s"`
    pub duration: String,
    pub tooltips_processed: u64,
    pub files_processed: usize,
    /// `"<per second>/s"`
    pub average_rate: String,
    pub errors: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipStat {
    pub term: String,
    pub count: u64,
    pub types: Vec<String>,
    pub errors: u64,
}
