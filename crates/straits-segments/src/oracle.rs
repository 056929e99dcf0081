//! Text completion seam for segment inference.

use crate::error::Result;
use async_trait::async_trait;

/// Anything that turns a prompt into a text reply.
#[async_trait]
pub trait SegmentOracle {
    /// Complete `prompt`, returning the raw reply text.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing service fails or replies without text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
