//! Rate profiler output shared by the integration tests

/// Pthread and komb runs at 1-4 threads (komb stops at 3), 20ms window
pub const RATE_PROFILER_LOG: &str = "\
Profiling pthread_mutex with 1 threads for 5000 ms (window: 20 ms)...
Results for pthread_mutex with 1 threads (5.000 s runtime):
  Total Trylock Attempts: 120313628
  Total Trylock Successes: 120313628 (100.00%)
  Total Trylock Failures: 0 (0.00%)
  Blocking Locks after Trylock Fail: 0
  Approx. Avg Attempts/Window (20ms): 481243
  Approx. Avg Successes/Window (20ms): 481243
  Approx. Avg Failures/Window (20ms): 0
--------------------------------------------------
Profiling komb_mutex with 1 threads for 5000 ms (window: 20 ms)...
Results for komb_mutex with 1 threads (5.000 s runtime):
  Total Trylock Attempts: 132052022
  Total Trylock Successes: 132052022 (100.00%)
  Total Trylock Failures: 0 (0.00%)
  Blocking Locks after Trylock Fail: 0
  Approx. Avg Attempts/Window (20ms): 528196
  Approx. Avg Successes/Window (20ms): 528196
  Approx. Avg Failures/Window (20ms): 0
--------------------------------------------------
Profiling pthread_mutex with 2 threads for 5000 ms (window: 20 ms)...
Results for pthread_mutex with 2 threads (5.000 s runtime):
  Total Trylock Attempts: 56638751
  Total Trylock Successes: 54260122 (95.80%)
  Total Trylock Failures: 2378629 (4.20%)
  Blocking Locks after Trylock Fail: 2378629
  Approx. Avg Attempts/Window (20ms): 226549
  Approx. Avg Successes/Window (20ms): 217034
  Approx. Avg Failures/Window (20ms): 9514
--------------------------------------------------
Profiling komb_mutex with 2 threads for 5000 ms (window: 20 ms)...
Results for komb_mutex with 2 threads (5.000 s runtime):
  Total Trylock Attempts: 46866476
  Total Trylock Successes: 44768795 (95.52%)
  Total Trylock Failures: 2097681 (4.48%)
  Blocking Locks after Trylock Fail: 2097681
  Approx. Avg Attempts/Window (20ms): 187462
  Approx. Avg Successes/Window (20ms): 179072
  Approx. Avg Failures/Window (20ms): 8390
--------------------------------------------------
Profiling pthread_mutex with 3 threads for 5000 ms (window: 20 ms)...
Results for pthread_mutex with 3 threads (5.000 s runtime):
  Total Trylock Attempts: 60245403
  Total Trylock Successes: 56521765 (93.82%)
  Total Trylock Failures: 3723638 (6.18%)
  Blocking Locks after Trylock Fail: 3723638
  Approx. Avg Attempts/Window (20ms): 240976
  Approx. Avg Successes/Window (20ms): 226082
  Approx. Avg Failures/Window (20ms): 14894
--------------------------------------------------
Profiling komb_mutex with 3 threads for 5000 ms (window: 20 ms)...
Results for komb_mutex with 3 threads (5.000 s runtime):
  Total Trylock Attempts: 67368836
  Total Trylock Successes: 67362957 (99.99%)
  Total Trylock Failures: 5879 (0.01%)
  Blocking Locks after Trylock Fail: 5879
  Approx. Avg Attempts/Window (20ms): 269468
  Approx. Avg Successes/Window (20ms): 269445
  Approx. Avg Failures/Window (20ms): 23
--------------------------------------------------
Profiling pthread_mutex with 4 threads for 5000 ms (window: 20 ms)...
Results for pthread_mutex with 4 threads (5.000 s runtime):
  Total Trylock Attempts: 66892848
  Total Trylock Successes: 59721509 (89.28%)
  Total Trylock Failures: 7171339 (10.72%)
  Blocking Locks after Trylock Fail: 7171339
  Approx. Avg Attempts/Window (20ms): 267565
  Approx. Avg Successes/Window (20ms): 238880
  Approx. Avg Failures/Window (20ms): 28684
--------------------------------------------------
";

/// Critical-section benchmark stdout for a few thread counts
pub const TIMING_LOG: &str = "\
线程数: 1, 总迭代次数: 1000000, 总耗时: 21.37 ms
THREADS:1,TIME_MS:21.37
线程数: 8, 总迭代次数: 8000000, 总耗时: 912.44 ms
THREADS:8,TIME_MS:912.44
线程数: 2, 总迭代次数: 2000000, 总耗时: 88.02 ms
THREADS:2,TIME_MS:88.02
";

/// A run whose metric lines report a different window than the profiling line
pub const MISMATCHED_WINDOW_LOG: &str = "\
Profiling pthread_mutex with 4 threads for 5000 ms (window: 20 ms)...
  Approx. Avg Successes/Window (25ms): 1
  Approx. Avg Failures/Window (25ms): 2
--------------------------------------------------
";
