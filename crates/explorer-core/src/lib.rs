//! # explorer-core
//!
//! Core crate for WorldExplorer. Contains configuration schemas and the
//! unified error system shared by every other crate in the workspace.
//!
//! This crate has **no** internal dependencies on other WorldExplorer crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
