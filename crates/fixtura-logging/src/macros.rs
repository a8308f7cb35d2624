//! ---
//! fx_section: "03-logging"
//! fx_subsection: "module"
//! fx_type: "source"
//! fx_scope: "code"
//! fx_description: "Structured logging macros carrying scenario context."
//! fx_version: "v0.1.0"
//! fx_owner: "tbd"
//! ---

#[doc(hidden)]
#[macro_export]
macro_rules! __fx_event {
    ($level:expr, $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            $level,
            scenario = ctx.scenario.unwrap_or(""),
            fixture = ctx.fixture.unwrap_or(""),
            step = ctx.step.unwrap_or_default(),
            action = ctx.action.unwrap_or(""),
            $($arg)+
        );
    }};
}

/// Emit an informational log enriched with scenario context.
#[macro_export]
macro_rules! fx_info {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__fx_event!(tracing::Level::INFO, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__fx_event!(tracing::Level::INFO, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit a debug log enriched with scenario context.
#[macro_export]
macro_rules! fx_debug {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__fx_event!(tracing::Level::DEBUG, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__fx_event!(tracing::Level::DEBUG, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit a warning enriched with scenario context.
#[macro_export]
macro_rules! fx_warn {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__fx_event!(tracing::Level::WARN, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__fx_event!(tracing::Level::WARN, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit an error log enriched with scenario context.
#[macro_export]
macro_rules! fx_error {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__fx_event!(tracing::Level::ERROR, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__fx_event!(tracing::Level::ERROR, $crate::LogContext::default(), $($arg)+)
    };
}
