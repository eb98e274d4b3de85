//! Interaction oracle outbound adapters.
//!
//! This module provides a reqwest implementation of the
//! `InteractionOracle` port against a Gemini-style `generateContent` API.

mod dto;
mod gemini_http;

pub use gemini_http::{
    DEFAULT_ORACLE_MODEL, DEFAULT_ORACLE_URL, GeminiHttpOracle, GeminiOracleBuildError,
    GeminiOracleConfig,
};
