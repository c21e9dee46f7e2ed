// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! retrodate library
//!
//! Discovers what changed in a working tree and spreads those changes over a
//! window of past days as individual conventional commits with fabricated
//! timestamps. The binary is a thin wrapper around [`Synthesizer`].

pub mod config;
pub mod discovery;
pub mod entropy;
pub mod error;
pub mod report;
pub mod schedule;
pub mod settings;
pub mod synthesizer;
pub mod template;

pub use entropy::{Entropy, RandomEntropy, ScriptedEntropy};
pub use error::SynthError;
pub use report::RunReport;
pub use schedule::{CommitPlan, Schedule, Staging};
pub use settings::Settings;
pub use synthesizer::Synthesizer;
