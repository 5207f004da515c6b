//! Line-oriented scanner for rate profiler output
//!
//! The scanner keeps a single "current context" slot (lock type, thread count and
//! window size taken from the last `Profiling ...` line) and classifies every line
//! with fixed priority: context, failures, successes, ignore. Metric lines only
//! update the current record when their window size equals the context's window.
//! Nothing in here can fail; unrecognized or inconsistent lines are skipped.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::common::constants::{
    FAILURES_MARKER, METRIC_WINDOW_CLOSE_MARKER, MS_CLOSE_MARKER, PROFILING_MARKER,
    SUCCESSES_MARKER, THREADS_MARKER, WINDOW_MARKER, WITH_MARKER,
};
use super::structs::{BenchmarkRecord, MetricField, RecordKey, ThreadCount, WindowMs};

/// Classification of a single input line, independent of parser state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `Profiling <lock> with <n> threads ... (window: <w> ms)`
    Context {
        lock_type: &'a str,
        thread_count: ThreadCount,
        window_ms: WindowMs,
    },
    /// Context-shaped line with an empty lock type or a zero count
    InvalidContext,
    /// `Avg Failures/Window (<w>ms): <v>` or the successes equivalent
    Metric {
        field: MetricField,
        window_ms: WindowMs,
        value: u64,
    },
    Other,
}

impl<'a> LineKind<'a> {
    pub fn classify(line: &'a str) -> Self {
        if let Some(kind) = parse_context(line) {
            return kind;
        }
        if let Some((window_ms, value)) = parse_metric(line, FAILURES_MARKER) {
            return LineKind::Metric {
                field: MetricField::AvgFailuresPerWindow,
                window_ms,
                value,
            };
        }
        if let Some((window_ms, value)) = parse_metric(line, SUCCESSES_MARKER) {
            return LineKind::Metric {
                field: MetricField::AvgSuccessesPerWindow,
                window_ms,
                value,
            };
        }
        LineKind::Other
    }
}

/// Split a run of leading ASCII digits off `s`
fn leading_integer(s: &str) -> Option<(u64, &str)> {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(idx, _)| idx)
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let value = s[..end].parse::<u64>().ok()?;
    Some((value, &s[end..]))
}

fn leading_u32(s: &str) -> Option<(u32, &str)> {
    let (value, rest) = leading_integer(s)?;
    Some((u32::try_from(value).ok()?, rest))
}

/// Parse everything after ` with `: `<n> threads ... (window: <w> ms)`
fn parse_context_tail(tail: &str) -> Option<(ThreadCount, WindowMs)> {
    let (thread_count, rest) = leading_u32(tail.trim_start())?;
    let rest = rest.trim_start().strip_prefix(THREADS_MARKER)?;

    // The first `(window: <w> ms)` group that parses wins
    rest.match_indices(WINDOW_MARKER).find_map(|(idx, _)| {
        let after = rest[idx + WINDOW_MARKER.len()..].trim_start();
        let (window_ms, after) = leading_u32(after)?;
        after
            .trim_start()
            .starts_with(MS_CLOSE_MARKER)
            .then_some((thread_count, window_ms))
    })
}

fn parse_context(line: &str) -> Option<LineKind<'_>> {
    let start = line.find(PROFILING_MARKER)? + PROFILING_MARKER.len();
    let rest = &line[start..];

    // Shortest lock type whose tail still forms a complete context phrase
    rest.match_indices(WITH_MARKER).find_map(|(idx, _)| {
        let (thread_count, window_ms) = parse_context_tail(&rest[idx + WITH_MARKER.len()..])?;
        let lock_type = rest[..idx].trim();
        if lock_type.is_empty() || thread_count == 0 || window_ms == 0 {
            return Some(LineKind::InvalidContext);
        }
        Some(LineKind::Context {
            lock_type,
            thread_count,
            window_ms,
        })
    })
}

fn parse_metric(line: &str, marker: &str) -> Option<(WindowMs, u64)> {
    let start = line.find(marker)? + marker.len();
    let (window_ms, rest) = leading_u32(line[start..].trim_start())?;
    let rest = rest.trim_start().strip_prefix(METRIC_WINDOW_CLOSE_MARKER)?;
    let (value, _) = leading_integer(rest.trim_start())?;
    Some((window_ms, value))
}

/// Counters describing how the input lines were handled
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    pub lines: usize,
    pub context_lines: usize,
    pub invalid_context_lines: usize,
    pub metrics_applied: usize,
    pub window_mismatches: usize,
    pub orphan_metrics: usize,
    pub ignored_lines: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ParseContext {
    key: RecordKey,
    window_ms: WindowMs,
}

/// Stateful single-pass scanner; construct one per parse
#[derive(Debug, Default)]
pub struct LogParser {
    records: BTreeMap<RecordKey, BenchmarkRecord>,
    current: Option<ParseContext>,
    stats: ParseStats,
}

impl LogParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole block of text
    pub fn parse(text: &str) -> ParsedLog {
        let mut parser = Self::new();
        parser.feed(text);
        parser.finish()
    }

    /// Parse an ordered sequence of lines
    pub fn parse_lines<I, S>(lines: I) -> ParsedLog
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parser = Self::new();
        for line in lines {
            parser.feed_line(line.as_ref());
        }
        parser.finish()
    }

    pub fn feed(&mut self, text: &str) {
        for line in text.lines() {
            self.feed_line(line);
        }
    }

    pub fn feed_line(&mut self, line: &str) {
        self.stats.lines += 1;

        match LineKind::classify(line) {
            LineKind::Context {
                lock_type,
                thread_count,
                window_ms,
            } => {
                self.stats.context_lines += 1;
                let key = RecordKey::new(lock_type, thread_count);
                self.records
                    .entry(key.clone())
                    .or_insert_with(|| BenchmarkRecord::new(lock_type, thread_count, window_ms));
                self.current = Some(ParseContext { key, window_ms });
            }
            LineKind::InvalidContext => {
                self.stats.invalid_context_lines += 1;
                debug!(line, "Context line without lock type or with zero count, clearing context");
                self.current = None;
            }
            LineKind::Metric {
                field,
                window_ms,
                value,
            } => {
                let Some(context) = &self.current else {
                    self.stats.orphan_metrics += 1;
                    return;
                };
                if window_ms != context.window_ms {
                    self.stats.window_mismatches += 1;
                    debug!(
                        lock_type = %context.key.lock_type,
                        threads = context.key.thread_count,
                        context_window_ms = context.window_ms,
                        line_window_ms = window_ms,
                        field = field.as_str(),
                        "Skipping metric line with mismatched window"
                    );
                    return;
                }
                if let Some(record) = self.records.get_mut(&context.key) {
                    record.set(field, value);
                    self.stats.metrics_applied += 1;
                }
            }
            LineKind::Other => self.stats.ignored_lines += 1,
        }
    }

    pub fn finish(self) -> ParsedLog {
        info!(
            records = self.records.len(),
            lines = self.stats.lines,
            metrics_applied = self.stats.metrics_applied,
            window_mismatches = self.stats.window_mismatches,
            "📄 Benchmark log parsed"
        );
        ParsedLog {
            records: self.records,
            stats: self.stats,
        }
    }
}

/// Records produced by one parse, keyed by `(lock_type, thread_count)`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedLog {
    records: BTreeMap<RecordKey, BenchmarkRecord>,
    stats: ParseStats,
}

impl ParsedLog {
    pub fn get(&self, lock_type: &str, thread_count: ThreadCount) -> Option<&BenchmarkRecord> {
        self.records.get(&RecordKey::new(lock_type, thread_count))
    }

    pub fn records(&self) -> impl Iterator<Item = &BenchmarkRecord> {
        self.records.values()
    }

    pub fn as_map(&self) -> &BTreeMap<RecordKey, BenchmarkRecord> {
        &self.records
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
