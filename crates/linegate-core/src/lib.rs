pub mod config;
pub mod diagnostic;
pub mod error;
pub mod gate;
pub mod io;
pub mod lines;
pub mod paths;
pub mod request;
pub mod settings;
pub mod threshold;

pub use error::{GateError, Result};
