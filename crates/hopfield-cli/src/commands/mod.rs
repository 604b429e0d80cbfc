//! CLI command implementations.

pub mod capacity;
pub mod demo;
pub mod init;
pub mod recall;
pub mod shell;
