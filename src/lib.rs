// src/lib.rs
// llm-expert - ask a question through a selectable expert persona

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod error;
pub mod experts;
pub mod llm;
pub mod web;

pub use error::{ErrorKind, ExpertError, Result};
