//! Repository-layer result type

/// Result of a single backing-store operation.
///
/// Repositories report every failure through this type rather than an error
/// channel: not-found and duplicate-email are routine results, not
/// exceptions. `payload` is present only on successful reads/creates.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    success: bool,
    message: String,
    payload: Option<T>,
}

impl<T> Outcome<T> {
    /// Successful operation carrying a payload
    pub fn ok(message: impl Into<String>, payload: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload: Some(payload),
        }
    }

    /// Successful operation with no payload (acknowledgements)
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload: None,
        }
    }

    /// Failed operation; the payload is always absent
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            payload: None,
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    /// Decompose into (success, message, payload)
    pub fn into_parts(self) -> (bool, String, Option<T>) {
        (self.success, self.message, self.payload)
    }
}
