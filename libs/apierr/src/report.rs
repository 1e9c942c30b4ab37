//! Reporting API errors through `tracing`
//!
//! Errors that want to be reported are logged with their internal context.
//! Server errors go out at `ERROR`, everything else at `WARN`. When the error
//! wants a trace, the one captured by `with_trace()` or `send()` is attached,
//! or a fresh one is captured at the reporting site.

use std::backtrace::Backtrace;

use crate::error::ApiError;

impl ApiError {
    /// Log this error if it wants to be reported.
    ///
    /// Returns `true` when an event was emitted.
    pub fn log(&self) -> bool {
        if !self.wants_to_be_reported() {
            return false;
        }

        let context = self.context().map(ToString::to_string);
        let backtrace = self.wants_to_show_trace().then(|| {
            self.trace().map_or_else(
                || Backtrace::force_capture().to_string(),
                ToString::to_string,
            )
        });
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(
                error.id = %self.id(),
                http.status = status.as_u16(),
                context = context.as_deref(),
                backtrace = backtrace.as_deref(),
                "{}",
                self.message()
            );
        } else {
            tracing::warn!(
                error.id = %self.id(),
                http.status = status.as_u16(),
                context = context.as_deref(),
                backtrace = backtrace.as_deref(),
                "{}",
                self.message()
            );
        }
        true
    }
}
