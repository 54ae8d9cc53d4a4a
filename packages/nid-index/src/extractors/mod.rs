//! Extraction adapter implementations.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiExtractor;
pub use mock::MockExtractor;
