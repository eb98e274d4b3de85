//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel.
//! - **oracle**: reqwest client for the external interaction oracle.
//!
//! Adapters convert between domain types and infrastructure representations
//! and contain no business logic.

pub mod oracle;
pub mod persistence;
