//! SnapLens Demo
//!
//! The interactive surface of SnapLens: a web UI (axum) and a one-shot CLI,
//! both built on the presentation assembler.

pub mod assembler;
pub mod cli;
pub mod server;

pub use assembler::{ContentPanel, PresentationAssembler, ProbabilityRow, ViewModel};
pub use server::{build_app, run_server, AppState};
