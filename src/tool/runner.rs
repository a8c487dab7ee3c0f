//! Wrapped tool abstraction
//!
//! Provides a trait for running the infrastructure tool so the init wrapper
//! can be driven by a fake in tests.

use crate::error::ModguardResult;
use async_trait::async_trait;

/// Abstract interface to the wrapped command-line tool
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Run the tool with inherited stdio and return its exit code
    ///
    /// A process terminated by a signal reports `-1`.
    async fn run(&self, args: &[String]) -> ModguardResult<i32>;

    /// Program name for display
    fn program(&self) -> &str;
}
