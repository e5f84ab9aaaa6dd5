//! Parlor is a terminal client for a conversation-based chat backend.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`api`] wraps the backend's HTTP contract: the request adapter, its
//!   error normalization, and the logging port invoked around each call.
//! - [`core`] owns client-side state: the conversation and message stores,
//!   the composer, the send orchestrator, and the action/command loop that
//!   ties them to backend calls.
//! - [`ui`] renders the sidebar, thread, and composer and runs the
//!   interactive event loop.
//! - [`cli`] parses arguments, manages configuration, and hosts the headless
//!   subcommands.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
