//! Delivery mode for indexing submissions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Policy controlling how the indexing sink processes a submission.
///
/// The mode is chosen once per pipeline run and threaded through every
/// submission unchanged; the driver itself is agnostic to which variant is
/// active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeliveryMode {
    /// Block the caller until the search engine acknowledges the write.
    #[default]
    Synchronous,
    /// Enqueue the write and return immediately; completion or failure is
    /// observed out-of-band by the sink.
    Asynchronous,
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Synchronous => f.write_str("synchronous"),
            Self::Asynchronous => f.write_str("asynchronous"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_synchronous() {
        assert_eq!(DeliveryMode::default(), DeliveryMode::Synchronous);
    }

    #[test]
    fn test_display() {
        assert_eq!(DeliveryMode::Synchronous.to_string(), "synchronous");
        assert_eq!(DeliveryMode::Asynchronous.to_string(), "asynchronous");
    }
}
