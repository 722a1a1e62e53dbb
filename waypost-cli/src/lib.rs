//! # waypost-cli
//!
//! The `waypost-discover` build tool. It scans a directory of controller
//! sources and writes a Rust file registering every controller it found:
//!
//! ```text
//! waypost-discover <TARGET_NAME> <INPUT_DIR> <OUTPUT_DIR> [--output-file NAME] [--runtime-crate NAME]
//! ```
//!
//! A missing input directory, or one without controllers, still produces a
//! valid file whose registry body only holds an advisory comment.

pub mod commands;
