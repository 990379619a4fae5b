//! Launch-command synthesis for the application-client launcher.
//!
//! The launcher script hands its raw arguments to this crate, which sorts
//! them into runtime, framework and application streams and prints the
//! runtime command line the script then executes.

pub mod args;
pub mod config;
pub mod logging;
