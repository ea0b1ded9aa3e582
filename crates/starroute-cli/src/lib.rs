//! starroute CLI library.
//!
//! This crate provides the command handlers and output formatting behind the
//! `starroute` binary.

pub mod commands;
pub mod output;
