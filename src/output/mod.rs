//! Output module
//!
//! Singer messages written as JSON lines to stdout. Logs never go here.

mod message;
mod writer;

pub use message::SingerMessage;
pub use writer::MessageWriter;

#[cfg(test)]
mod tests;
