//! Result presentation

pub mod formatter;

pub use formatter::render;
