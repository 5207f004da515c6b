use std::path::Path;
use std::process::ExitCode;

use lock_tuner::analysis::{Advice, MetricsAggregator, ThresholdAdvisor};
use lock_tuner::common::constants::DEFAULT_CONFIG_PATH;
use lock_tuner::config::LockTunerConfig;
use lock_tuner::logging::{cleanup_old_logs, init_dual_logging, init_simple_logging, log_system_info};
use lock_tuner::parser::{LogParser, MetricField, TimingSeries};
use lock_tuner::report::TuningReport;
use lock_tuner::simulation::JitterSimulator;
use tracing::{error, info, warn};

/// Read an input file; a missing or unreadable file is reported and treated as empty
fn read_input(path: &Path, what: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %path.display(), "⚠️ Could not read {}: {}", what, e);
            String::new()
        }
    }
}

fn log_advice(label: &str, advice: &Advice) {
    match advice {
        Advice::Recommended {
            lock_type,
            thread_count,
            window_ms,
            threshold,
            ..
        } => info!(
            lock_type = %lock_type,
            thread_count,
            window_ms,
            threshold,
            "✅ {}: start from {} per {}ms window",
            label,
            threshold,
            window_ms
        ),
        Advice::InsufficientData {
            lock_type,
            thread_count,
            reason,
            ..
        } => warn!(
            lock_type = %lock_type,
            thread_count,
            ?reason,
            "❓ {}: insufficient data",
            label
        ),
    }
}

fn main() -> ExitCode {
    let config = match LockTunerConfig::from_toml(DEFAULT_CONFIG_PATH) {
        Ok(config) => {
            // Simple print until logging is initialized
            println!("✅ Loaded configuration from {}", DEFAULT_CONFIG_PATH);
            config
        }
        Err(e) => {
            println!("⚠️ Failed to load {}: {}. Using default configuration", DEFAULT_CONFIG_PATH, e);
            LockTunerConfig::default()
        }
    };

    let logging_config = config.logging.to_logging_config();
    let _log_guard = match init_dual_logging(&logging_config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("❌ Failed to initialize logging system: {}", e);
            init_simple_logging(&logging_config.level_filter);
            error!("⚠️ Using fallback console-only logging due to error: {}", e);
            None
        }
    };

    if let Err(e) = cleanup_old_logs(Path::new(&logging_config.log_dir), config.logging.cleanup_days()) {
        warn!("⚠️ Failed to clean up old log files: {}", e);
    }
    log_system_info();

    info!(
        benchmark_log = %config.input.benchmark_log.display(),
        blocking_lock = %config.advisor.blocking_lock_type,
        adaptive_lock = %config.advisor.adaptive_lock_type,
        t_lag_ms = config.simulation.params.t_lag_ms,
        seed = config.simulation.seed,
        candidates = config.simulation.grid_ms.len(),
        "🔧 Tuning configuration logged"
    );

    // Trylock rate analysis
    let parsed = LogParser::parse(&read_input(&config.input.benchmark_log, "benchmark log"));
    let aggregator = MetricsAggregator::new(&parsed);

    for lock_type in aggregator.lock_types() {
        for entry in aggregator.series(lock_type) {
            let record = &entry.record;
            info!(
                lock_type,
                threads = record.thread_count,
                window_ms = record.window_ms,
                avg_failures = ?record.avg_failures_per_window,
                avg_successes = ?record.avg_successes_per_window,
                complete = entry.complete,
                "📊 Trylock rates"
            );
        }
        for field in [MetricField::AvgFailuresPerWindow, MetricField::AvgSuccessesPerWindow] {
            if !aggregator.has_data(lock_type, field) {
                warn!(lock_type, field = field.as_str(), "No data points for field");
            }
        }
    }

    let advisor = ThresholdAdvisor::new(config.advisor.clone());
    let recommendation = advisor.recommend(&aggregator);
    log_advice("Switch to spin (blocking -> adaptive)", &recommendation.switch_to_spin);
    log_advice("Switch back to blocking (adaptive -> blocking)", &recommendation.switch_back_to_blocking);

    let timings = config
        .input
        .timing_log
        .as_deref()
        .map(|path| TimingSeries::parse(&read_input(path, "timing log")))
        .unwrap_or_default();
    for timing in timings.sorted_by_threads() {
        info!(threads = timing.thread_count, time_ms = timing.time_ms, "⏱️ Critical section timing");
    }

    // Window length stability
    let mut simulator = JitterSimulator::seeded(
        config.simulation.params,
        config.simulation.model.clone(),
        config.simulation.seed,
    );
    let stability = simulator.scan(&config.simulation.grid_ms);
    for sample in &stability.samples {
        info!(
            l_ms = sample.l_ms,
            n = sample.n,
            jitter = sample.jitter_count,
            sweet_spot = sample.in_sweet_spot,
            "🔁 Jitter sample"
        );
    }
    match (stability.most_stable(), stability.sweet_spot_bounds()) {
        (Some(best), Some((low, high))) => info!(
            best_l_ms = best.l_ms,
            best_n = best.n,
            best_jitter = best.jitter_count,
            "🎯 Sweet spot spans {}ms..={}ms on the grid",
            low,
            high
        ),
        (Some(best), None) => warn!(
            best_l_ms = best.l_ms,
            best_jitter = best.jitter_count,
            "⚠️ No grid candidate falls in the sweet spot"
        ),
        _ => warn!("⚠️ Empty candidate grid, nothing simulated"),
    }

    if let Some(report_path) = &config.output.report_path {
        let report = TuningReport::new(&parsed, timings.samples.clone(), recommendation, stability);
        if let Err(e) = report.write_json(report_path) {
            error!(path = %report_path.display(), "❌ Failed to write tuning report: {}", e);
            return ExitCode::FAILURE;
        }
    }

    info!("🏁 Tuning run complete");
    ExitCode::SUCCESS
}
