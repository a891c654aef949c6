pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! Tunables for the status pollers, the HTTP client and the activity log.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Capacity of the channel between the pollers and the UI.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // POLLING CONFIGURATION
    // =============================================================================

    /// Status polling configuration
    pub mod polling {
        use std::time::Duration;

        /// Interval between status requests when nothing overrides it (milliseconds)
        pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5_000;

        /// Environment variable that overrides the interval, at build time or at run time
        pub const POLL_INTERVAL_ENV: &str = "DASHBOARD_POLL_INTERVAL_MS";

        /// Resolves the poll interval: flag, then run-time env, then build-time env, then default.
        ///
        /// Zero is never returned; a zero from any source falls through to the next one.
        pub fn poll_interval(flag_ms: Option<u64>) -> Duration {
            let run_time = std::env::var(POLL_INTERVAL_ENV).ok();
            resolve(
                flag_ms,
                run_time.as_deref(),
                option_env!("DASHBOARD_POLL_INTERVAL_MS"),
            )
        }

        fn resolve(
            flag_ms: Option<u64>,
            run_time: Option<&str>,
            build_time: Option<&str>,
        ) -> Duration {
            let ms = flag_ms
                .filter(|ms| *ms > 0)
                .or_else(|| parse_ms(run_time))
                .or_else(|| parse_ms(build_time))
                .unwrap_or(DEFAULT_POLL_INTERVAL_MS);
            Duration::from_millis(ms)
        }

        fn parse_ms(value: Option<&str>) -> Option<u64> {
            value
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|ms| *ms > 0)
        }

        #[cfg(test)]
        mod tests {
            use super::*;

            #[test]
            fn flag_overrides_default_interval() {
                assert_eq!(poll_interval(Some(250)), Duration::from_millis(250));
            }

            #[test]
            fn flag_beats_run_time_env_which_beats_build_time_env() {
                assert_eq!(
                    resolve(Some(250), Some("750"), Some("900")),
                    Duration::from_millis(250)
                );
                assert_eq!(
                    resolve(None, Some("750"), Some("900")),
                    Duration::from_millis(750)
                );
                assert_eq!(resolve(None, None, Some("900")), Duration::from_millis(900));
                assert_eq!(
                    resolve(None, None, None),
                    Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
                );
            }

            #[test]
            fn zero_or_garbage_falls_through() {
                assert_eq!(
                    resolve(Some(0), Some("0"), Some("fast")),
                    Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
                );
                assert_eq!(resolve(Some(0), Some(" 300 "), None), Duration::from_millis(300));
                assert!(!poll_interval(Some(0)).is_zero());
            }
        }
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// HTTP client configuration
    pub mod http {
        use std::time::Duration;

        /// Timeout for establishing a connection to the backend
        pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

        /// Timeout for a whole request, uploads included
        pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    }

    // =============================================================================
    // SESSION STORAGE
    // =============================================================================

    /// Where the session and the UI log live
    pub mod storage {
        /// Directory under `$HOME` holding the session file
        pub const CONFIG_DIR: &str = ".sentiment-dashboard";
        pub const SESSION_FILE: &str = "session.json";

        /// Log output while the terminal UI owns the screen
        pub const LOG_FILE: &str = "dashboard.log";
    }
}

