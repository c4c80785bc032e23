//! Core of `annotate`: splits a command's output into lines and writes each
//! line back out with a rendered, optionally colored prefix.

pub mod annotate;
pub mod api;
pub mod config;
pub mod error;
pub mod runner;
