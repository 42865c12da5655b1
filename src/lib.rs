// ABOUTME: Library root for triarea — re-exports all modules for integration testing.
// ABOUTME: The binary entry point is in main.rs, which uses this crate as a library.

pub mod calculator;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod session;
