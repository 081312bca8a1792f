pub mod adt;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod delegate;
pub mod util;

pub use adt::{AdtError, AdtInvocation, AdtMode, AdtTask};
