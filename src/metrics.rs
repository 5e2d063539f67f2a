//! Operational metrics
//!
//! Counters and gauges recorded through the `metrics` facade. The embedding
//! application installs its own recorder/exporter; without one these calls
//! are no-ops.

/// Initialize metrics (call once at startup)
pub fn init_metrics() {
    metrics::describe_counter!(
        "herald_chat_completions_total",
        "Chat completion attempts by model and outcome"
    );
    metrics::describe_counter!(
        "herald_notify_attempts_total",
        "Telegram send attempts by transport and outcome"
    );
    metrics::describe_counter!(
        "herald_notify_dropped_total",
        "Notifications dropped by retry exhaustion or queue channel overflow"
    );
    metrics::describe_gauge!(
        "herald_notify_queue_depth",
        "Notifications currently pending in the retry queue"
    );
}

/// Record a chat completion attempt
pub fn record_chat_completion(model: &str, outcome: &str) {
    metrics::counter!(
        "herald_chat_completions_total",
        "model" => model.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Record a Telegram send attempt
pub fn record_notify_attempt(transport: &str, outcome: &str) {
    metrics::counter!(
        "herald_notify_attempts_total",
        "transport" => transport.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Record a notification dropped without delivery, whether the retry
/// budget was spent or the queue channel refused it
pub fn record_notify_dropped() {
    metrics::counter!("herald_notify_dropped_total").increment(1);
}

/// Update the retry queue depth gauge
pub fn set_notify_queue_depth(depth: f64) {
    metrics::gauge!("herald_notify_queue_depth").set(depth);
}
