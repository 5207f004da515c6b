//! Full tuning pipeline over real rate profiler output

mod fixtures;

use fixtures::{MISMATCHED_WINDOW_LOG, RATE_PROFILER_LOG, TIMING_LOG};
use lock_tuner::analysis::advisor::{AdvisorConfig, MissingData};
use lock_tuner::common::constants::DEFAULT_GRID_MS;
use lock_tuner::config::LockTunerConfig;
use lock_tuner::parser::TimingSeries;
use lock_tuner::report::TuningReport;
use lock_tuner::{
    Advice, JitterSimulator, LogParser, MetricField, MetricsAggregator, PenaltyModel,
    SweetSpotParams, ThresholdAdvisor,
};
use tempfile::TempDir;

#[test]
fn test_rate_profiler_log_parses_every_run() {
    let parsed = LogParser::parse(RATE_PROFILER_LOG);

    assert_eq!(parsed.len(), 7);
    assert_eq!(parsed.stats().context_lines, 7);
    assert_eq!(parsed.stats().metrics_applied, 14);
    assert_eq!(parsed.stats().window_mismatches, 0);

    let record = parsed.get("pthread_mutex", 4).unwrap();
    assert_eq!(record.window_ms, 20);
    assert_eq!(record.avg_failures_per_window, Some(28684));
    assert_eq!(record.avg_successes_per_window, Some(238880));
    assert!(parsed.get("komb_mutex", 4).is_none());
}

#[test]
fn test_series_are_ordered_by_thread_count() {
    let aggregator = MetricsAggregator::new(&LogParser::parse(RATE_PROFILER_LOG));

    let lock_types: Vec<&str> = aggregator.lock_types().collect();
    assert_eq!(lock_types, vec!["komb_mutex", "pthread_mutex"]);

    let failures = aggregator.data_points("pthread_mutex", MetricField::AvgFailuresPerWindow);
    assert_eq!(failures, vec![(1, 0), (2, 9514), (3, 14894), (4, 28684)]);

    let successes = aggregator.data_points("komb_mutex", MetricField::AvgSuccessesPerWindow);
    assert_eq!(successes, vec![(1, 528196), (2, 179072), (3, 269445)]);
    assert_eq!(aggregator.window_ms("komb_mutex"), Some(20));
}

#[test]
fn test_default_advice_from_profiler_run() {
    let aggregator = MetricsAggregator::new(&LogParser::parse(RATE_PROFILER_LOG));
    let recommendation = ThresholdAdvisor::default().recommend(&aggregator);

    assert_eq!(recommendation.switch_to_spin.threshold(), Some(28684));
    assert_eq!(recommendation.switch_back_to_blocking.threshold(), Some(179072));
}

#[test]
fn test_advice_reports_missing_thread_count() {
    let aggregator = MetricsAggregator::new(&LogParser::parse(RATE_PROFILER_LOG));
    let advisor = ThresholdAdvisor::new(AdvisorConfig {
        switch_back_threads: 4,
        ..AdvisorConfig::default()
    });

    match advisor.switch_back_to_blocking(&aggregator) {
        Advice::InsufficientData {
            lock_type,
            thread_count,
            reason,
            ..
        } => {
            assert_eq!(lock_type, "komb_mutex");
            assert_eq!(thread_count, 4);
            assert_eq!(reason, MissingData::NoRecord);
        }
        other => panic!("expected insufficient data, got {other:?}"),
    }
}

#[test]
fn test_mismatched_window_leaves_record_empty() {
    let parsed = LogParser::parse(MISMATCHED_WINDOW_LOG);
    let record = parsed.get("pthread_mutex", 4).unwrap();

    assert_eq!(parsed.stats().window_mismatches, 2);
    assert!(record.avg_failures_per_window.is_none());
    assert!(record.avg_successes_per_window.is_none());

    let aggregator = MetricsAggregator::new(&parsed);
    let advice = ThresholdAdvisor::default().switch_to_spin(&aggregator);
    assert!(advice.is_insufficient());
}

#[test]
fn test_timing_log_is_sorted_by_threads() {
    let timings = TimingSeries::parse(TIMING_LOG);
    let threads: Vec<u32> = timings.sorted_by_threads().iter().map(|t| t.thread_count).collect();

    assert_eq!(timings.samples.len(), 3);
    assert_eq!(threads, vec![1, 2, 8]);
    assert_eq!(timings.samples[1].time_ms, 912.44);
}

#[test]
fn test_default_grid_finds_sweet_spot() {
    let mut simulator = JitterSimulator::seeded(SweetSpotParams::default(), PenaltyModel::default(), 42);
    let curve = simulator.scan(&DEFAULT_GRID_MS);

    assert_eq!(curve.sweet_spot_bounds(), Some((6.0, 24.0)));
    let best = curve.most_stable().unwrap();
    assert!(best.jitter_count <= 2);

    assert_eq!(simulator.jitter(0.0).jitter_count, 60);
}

#[test]
fn test_config_driven_run_writes_report() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("rate_profiler.log");
    let report_path = temp_dir.path().join("reports").join("tuning.json");
    std::fs::write(&log_path, RATE_PROFILER_LOG).unwrap();

    let config = LockTunerConfig::from_toml_str(&format!(
        "[input]\nbenchmark_log = {:?}\n\n[simulation]\nseed = 5\ngrid_ms = [4.0, 12.0, 48.0]\n\n[output]\nreport_path = {:?}\n",
        log_path.display().to_string(),
        report_path.display().to_string(),
    ))
    .unwrap();

    let text = std::fs::read_to_string(&config.input.benchmark_log).unwrap();
    let parsed = LogParser::parse(&text);
    let aggregator = MetricsAggregator::new(&parsed);
    let recommendation = ThresholdAdvisor::new(config.advisor.clone()).recommend(&aggregator);
    let stability = JitterSimulator::seeded(
        config.simulation.params,
        config.simulation.model.clone(),
        config.simulation.seed,
    )
    .scan(&config.simulation.grid_ms);

    let report = TuningReport::new(&parsed, TimingSeries::parse(TIMING_LOG).samples, recommendation, stability);
    report.write_json(config.output.report_path.as_ref().unwrap()).unwrap();

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json["records"].as_array().unwrap().len(), 7);
    assert_eq!(json["records"][0]["lock_type"], "komb_mutex");
    assert_eq!(json["recommendation"]["switch_to_spin"]["threshold"], 28684);
    assert_eq!(json["recommendation"]["switch_back_to_blocking"]["field"], "avg_successes_per_window");
    assert_eq!(json["timings"].as_array().unwrap().len(), 3);
    assert_eq!(json["stability"]["samples"][1]["regime"], "sweet_spot");
    assert_eq!(json["stability"]["samples"][2]["regime"], "single_window");
}
