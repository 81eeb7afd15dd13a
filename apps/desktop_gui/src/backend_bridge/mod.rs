//! Bridge between the UI thread and the background decode worker.

pub mod commands;
pub mod runtime;
