//! Core library for the `massue` CLI.
//!
//! `massue` fires a fixed budget of HTTP requests at one URL from a set of
//! concurrent, randomly staggered workers, prints live throughput while it
//! runs and a summary when every worker is done. The library exposes the
//! building blocks the binary is made of: argument and config parsing, the
//! request executor, the load engine and its metrics.
pub mod args;
pub mod config;
pub mod entry;
pub mod error;
pub mod http;
pub mod load;
pub mod metrics;
pub mod shutdown;
pub mod system;
