//! annotate-cli library: argument definitions and dispatch, exposed for unit tests.

pub mod app;
pub mod commands;
