//! Metrics for the engine client.

#[cfg(feature = "metrics")]
use crate::EngineApiError;
#[cfg(feature = "metrics")]
use std::time::Duration;

/// Describes all metrics the engine client may produce.
///
/// Call once during application startup if metric descriptions are desired for observers like
/// Prometheus. Does nothing unless the `metrics` feature is enabled.
pub fn describe_engine_client_metrics() {
    #[cfg(feature = "metrics")]
    Metrics::describe();
}

#[cfg(feature = "metrics")]
#[derive(Debug, Clone, Copy)]
pub(crate) struct Metrics;

#[cfg(feature = "metrics")]
impl Metrics {
    pub(crate) const RPC_CALLS_TOTAL: &'static str = "engine_client_rpc_calls_total";
    pub(crate) const RPC_CALL_DURATION_SECONDS: &'static str =
        "engine_client_rpc_call_duration_seconds";

    /// Outcome label of a successful call.
    pub(crate) const SUCCESS: &'static str = "success";

    fn describe() {
        metrics::describe_counter!(
            Self::RPC_CALLS_TOTAL,
            metrics::Unit::Count,
            "Total number of engine calls, by method and outcome",
        );

        metrics::describe_histogram!(
            Self::RPC_CALL_DURATION_SECONDS,
            metrics::Unit::Seconds,
            "Latency of engine calls, by method",
        );
    }

    pub(crate) fn record_call<T>(
        method: &'static str,
        result: &Result<T, EngineApiError>,
        elapsed: Duration,
    ) {
        let outcome: &'static str = match result {
            Ok(_) => Self::SUCCESS,
            Err(err) => err.kind().into(),
        };

        metrics::counter!(
            Self::RPC_CALLS_TOTAL,
            "method" => method,
            "outcome" => outcome,
        )
        .increment(1);

        metrics::histogram!(
            Self::RPC_CALL_DURATION_SECONDS,
            "method" => method,
        )
        .record(elapsed.as_secs_f64());
    }
}
