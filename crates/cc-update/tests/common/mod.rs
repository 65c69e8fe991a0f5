//! Common test infrastructure for cc-update tests
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Modules
//!
//! - `constants`: Tags, asset names, binary contents
//! - `builders`: Fluent builder for release metadata payloads
//! - `mock_server`: Wiremock setup helpers for the releases API and assets
//! - `fs_helpers`: Installed-binary fixtures in a temp directory

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod builders;
pub mod constants;
pub mod fs_helpers;
pub mod mock_server;

pub use builders::*;
pub use constants::*;
pub use fs_helpers::*;
pub use mock_server::*;
