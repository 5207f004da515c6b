/// Benchmark log and tuning constants
// Log line markers (rate profiler output)
pub const PROFILING_MARKER: &str = "Profiling ";
pub const WITH_MARKER: &str = " with ";
pub const THREADS_MARKER: &str = "threads";
pub const WINDOW_MARKER: &str = "(window:";
pub const MS_CLOSE_MARKER: &str = "ms)";
pub const FAILURES_MARKER: &str = "Avg Failures/Window (";
pub const SUCCESSES_MARKER: &str = "Avg Successes/Window (";
pub const METRIC_WINDOW_CLOSE_MARKER: &str = "ms):";

// Critical-section timing output
pub const TIMING_THREADS_MARKER: &str = "THREADS:";
pub const TIMING_TIME_MARKER: &str = "TIME_MS:";

// Lock types compared by the rate profiler
pub const DEFAULT_BLOCKING_LOCK_TYPE: &str = "pthread_mutex";
pub const DEFAULT_ADAPTIVE_LOCK_TYPE: &str = "komb_mutex";

// Representative thread counts for threshold advice
pub const DEFAULT_SWITCH_TO_SPIN_THREADS: u32 = 4; // contention failures become non-trivial
pub const DEFAULT_SWITCH_BACK_THREADS: u32 = 2; // low contention, blocking is safe again

// Sweet-spot defaults (milliseconds unless noted)
pub const DEFAULT_T_LAG_MS: f64 = 48.0;
pub const DEFAULT_L_MIN_MS: f64 = 6.0;
pub const DEFAULT_L_MAX_MS: f64 = 24.0;
pub const DEFAULT_N_MIN: u32 = 2;
pub const DEFAULT_N_MAX: u32 = 8;
pub const DEFAULT_TOLERANCE_MS: f64 = 3.0;
pub const DEFAULT_SEED: u64 = 42;

// Penalty model defaults
pub const DEFAULT_BASE_PENALTY: f64 = 3.0;
pub const DEFAULT_BELOW_MIN_SLOPE: f64 = 6.0; // k1
pub const DEFAULT_ABOVE_MAX_SLOPE: f64 = 2.8; // k2
pub const DEFAULT_OFF_TARGET_PENALTY: f64 = 10.0;
pub const DEFAULT_PEAK_FRACTION: f64 = 0.75;
pub const DEFAULT_SINGLE_WINDOW_FRACTION: f64 = 0.85;
pub const DEFAULT_TAPER_SLOPE: f64 = 0.8;
pub const DEFAULT_TAPER_FLOOR: f64 = 5.0;
pub const DEFAULT_NOISE_FRACTION: f64 = 0.1;
pub const DEFAULT_NOISE_FLOOR: f64 = 1.0;
pub const DEFAULT_CAP_BASE: u32 = 55;
pub const DEFAULT_CAP_SPREAD: u32 = 5;
pub const DEFAULT_SWEET_SPOT_MAX_JITTER: u32 = 2;
pub const DEFAULT_SINGLE_WINDOW_MIN_JITTER: u32 = 2;
pub const DEFAULT_SINGLE_WINDOW_MAX_JITTER: u32 = 5;
pub const INVALID_WINDOW_JITTER: u32 = 60;
/// Largest magnitude accepted for a configured penalty constant
pub const MAX_MODEL_CONSTANT: f64 = 1e6;

/// Candidate window lengths scanned by default: below the sweet spot, inside it, and up to the lag
pub const DEFAULT_GRID_MS: [f64; 20] = [
    2.0, 3.0, 4.0, 5.0,
    6.0, 8.0, 10.0, 12.0, 15.0, 18.0, 21.0, 24.0,
    27.0, 30.0, 33.0, 36.0, 39.0, 42.0, 45.0, 48.0,
];

// Logging
pub const LOG_FILE_PREFIX: &str = "lock_tuner";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LEVEL_FILTER: &str = "info,lock_tuner=info";
pub const DEFAULT_LOG_CLEANUP_DAYS: u32 = 30;

// Files
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_BENCHMARK_LOG: &str = "bench_data/rate_profiler.log";
