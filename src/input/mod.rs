//! Input for one-shot translation.

mod reader;

pub use reader::InputSource;
