//! Medication interaction checking backend.
//!
//! The crate follows a hexagonal layout: [`domain`] holds the use-cases and
//! ports, [`inbound`] adapts HTTP onto the driving ports, and [`outbound`]
//! implements the driven ports over PostgreSQL and the external oracle.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
