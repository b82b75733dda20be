use crate::models::error::AppError;

/// Observability hook every classified failure passes through before it is
/// returned to the caller.
pub trait ErrorReporter {
    /// `context` names where the failure happened, e.g. the request path.
    fn report(&self, context: &str, error: &AppError);
}

/// Writes failures to the browser console.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl ErrorReporter for ConsoleReporter {
    fn report(&self, context: &str, error: &AppError) {
        gloo::console::error!(&format!("[{context}] {} {error}", error.code()));
    }
}
