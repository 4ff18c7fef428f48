use std::sync::{Mutex, MutexGuard, PoisonError};

/// Side channel for user-facing error messages.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, message: &str);
}

/// Sends every message to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, message: &str) {
        tracing::error!(error = message, "Reported error");
    }
}

/// Keeps messages so the caller can show them next to the response.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    messages: Mutex<Vec<String>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        // Keep collecting after a poisoning panic.
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, message: &str) {
        tracing::debug!(error = message, "Collected error");
        self.lock().push(message.to_string());
    }
}
