pub mod log_parser;
pub mod structs;
pub mod timing;

pub use log_parser::{LineKind, LogParser, ParseStats, ParsedLog};
pub use structs::{BenchmarkRecord, ExecutionTiming, MetricField, RecordKey};
pub use timing::{parse_timing_line, TimingSeries};
