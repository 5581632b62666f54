//! Common test infrastructure for specify-template tests
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Modules
//!
//! - `archive`: in-memory zip construction
//! - `builders`: release document builder
//! - `mock_server`: wiremock setup helpers and a client pointed at the mock

// Not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod archive;
pub mod builders;
pub mod mock_server;

pub use archive::*;
pub use builders::*;
pub use mock_server::*;
