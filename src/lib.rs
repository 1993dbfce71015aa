//! Text reader library

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod session;
pub mod speech;

pub use config::Config;
pub use error::{Result, TextReaderError};
pub use session::ReaderSession;
