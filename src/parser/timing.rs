//! Parsing for the critical-section benchmark's `THREADS:<n>,TIME_MS:<t>` summary line

use serde::Serialize;
use tracing::debug;

use crate::common::constants::{TIMING_THREADS_MARKER, TIMING_TIME_MARKER};
use super::structs::ExecutionTiming;

/// Extract a timing sample from a line, if it carries one
pub fn parse_timing_line(line: &str) -> Option<ExecutionTiming> {
    let start = line.find(TIMING_THREADS_MARKER)? + TIMING_THREADS_MARKER.len();
    let rest = line[start..].trim_start();
    let (threads, rest) = rest.split_once(',')?;
    let thread_count = threads.trim().parse::<u32>().ok().filter(|n| *n > 0)?;

    let rest = rest.trim_start().strip_prefix(TIMING_TIME_MARKER)?.trim_start();
    let end = rest
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(idx, _)| idx)
        .unwrap_or(rest.len());
    let time_ms = rest[..end].parse::<f64>().ok()?;
    if !time_ms.is_finite() || time_ms < 0.0 {
        return None;
    }

    Some(ExecutionTiming {
        thread_count,
        time_ms,
    })
}

/// Timing samples in the order the runs were reported
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimingSeries {
    pub samples: Vec<ExecutionTiming>,
}

impl TimingSeries {
    pub fn parse(text: &str) -> Self {
        let samples: Vec<_> = text.lines().filter_map(parse_timing_line).collect();
        debug!(samples = samples.len(), "Parsed execution timings");
        Self { samples }
    }

    /// Ascending by thread count; runs with equal counts keep their input order
    pub fn sorted_by_threads(&self) -> Vec<ExecutionTiming> {
        let mut sorted = self.samples.clone();
        sorted.sort_by_key(|sample| sample.thread_count);
        sorted
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timing_line() {
        let timing = parse_timing_line("THREADS:8,TIME_MS:1234.56").unwrap();
        assert_eq!(timing.thread_count, 8);
        assert!((timing.time_ms - 1234.56).abs() < 1e-9);
    }

    #[test]
    fn test_parse_timing_line_rejects_garbage() {
        assert!(parse_timing_line("线程数: 8, 总迭代次数: 8000000, 总耗时: 12.00 ms").is_none());
        assert!(parse_timing_line("THREADS:0,TIME_MS:1.0").is_none());
        assert!(parse_timing_line("THREADS:x,TIME_MS:1.0").is_none());
        assert!(parse_timing_line("THREADS:4,TIME_MS:").is_none());
        assert!(parse_timing_line("THREADS:4").is_none());
    }

    #[test]
    fn test_series_sorted_by_threads() {
        let series = TimingSeries::parse(
            "THREADS:16,TIME_MS:900.00\nnoise\nTHREADS:1,TIME_MS:10.50\nTHREADS:4, TIME_MS: 120.25\n",
        );
        assert_eq!(series.samples.len(), 3);
        let sorted = series.sorted_by_threads();
        let threads: Vec<_> = sorted.iter().map(|s| s.thread_count).collect();
        assert_eq!(threads, vec![1, 4, 16]);
    }
}
