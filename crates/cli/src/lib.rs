//! funcscore-cli: command-line front end for funcscore.
//!
//! Loads documents from JSON lines into in-memory segments and runs
//! function queries over them. Evaluation logic lives in `funcscore-core`.

/// JSON-lines document loading into segments.
pub mod loader;
