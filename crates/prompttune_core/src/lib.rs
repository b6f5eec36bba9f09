//! prompttune-core: the pieces every PromptTune caller shares.
//!
//! - [`normalize`] cleans a model's rewritten prompt (preamble phrases, wrapping quotes)
//! - [`Settings`] is the explicit inference configuration passed into handlers
//! - [`TextSink`] is where an optimized prompt ends up (stdout, a file, memory)
//!
//! ```rust
//! use prompttune_core::normalize;
//!
//! assert_eq!(normalize("Optimized prompt: Write a haiku"), "Write a haiku");
//! ```

pub mod error;
pub mod normalize;
pub mod settings;
pub mod sink;
pub mod types;

pub use error::{CoreError, Result};
pub use normalize::{normalize, PREAMBLE_PHRASES};
pub use settings::Settings;
pub use sink::{FileSink, MemorySink, NullSink, SinkOutcome, StdoutSink, TextSink};
pub use types::{timestamp_now, Optimization};
