//! Query execution.
//!
//! The demo has no real model behind it; [`EchoGenerator`] stands in for one so
//! the accounting flow can be exercised end to end.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("input_text must not be empty")]
    EmptyInput,
}

/// Produces the answer to a query.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, input: &str) -> Result<String, GenerationError>;
}

/// Answers with the input reversed after a fixed delay.
#[derive(Debug, Clone)]
pub struct EchoGenerator {
    delay: Duration,
}

impl EchoGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for EchoGenerator {
    fn default() -> Self {
        Self::new(Duration::from_millis(200))
    }
}

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, input: &str) -> Result<String, GenerationError> {
        if input.is_empty() {
            return Err(GenerationError::EmptyInput);
        }
        tokio::time::sleep(self.delay).await;
        Ok(input.chars().rev().collect())
    }
}
