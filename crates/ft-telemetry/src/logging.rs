//! Structured logging helpers.
//!
//! Every registry log line carries a `component` field (directory, registry,
//! ledger, guard) so log pipelines can split on it. Product events also carry
//! `product_id`.

/// Helper to create structured log entries with consistent formatting.
#[macro_export]
macro_rules! log_event {
    // Info level with component
    (info, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    // Warn level with component
    (warn, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::warn!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    // Error level with component
    (error, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::error!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    // Debug level with component
    (debug, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::debug!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a product-related event with standard fields.
#[macro_export]
macro_rules! log_product_event {
    ($level:ident, $component:expr, $msg:expr, $product_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            product_id = $product_id,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a participant-related event with standard fields.
#[macro_export]
macro_rules! log_participant_event {
    ($level:ident, $component:expr, $msg:expr, $identity:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            identity = %$identity,
            $($($field)*,)?
            $msg
        )
    };
}
