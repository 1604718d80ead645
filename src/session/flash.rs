//! One-shot messages carried to the next rendered page.

/// Pending success and error messages for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flash {
    success: Option<String>,
    error: Option<String>,
}

impl Flash {
    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Take both messages, leaving the flash empty.
    pub fn take(&mut self) -> Flash {
        std::mem::take(self)
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.success.is_none() && self.error.is_none()
    }
}
