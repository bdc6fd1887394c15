//! Boundary to the external AI service.

use async_trait::async_trait;

use super::error::AiResponderError;

/// Asks an external AI service for a reply to one text.
///
/// Implementations perform exactly one outbound request per call and reduce
/// whatever the service returns to a single answer string.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AiResponder: Send + Sync {
    async fn ask(&self, text: &str) -> Result<String, AiResponderError>;
}
