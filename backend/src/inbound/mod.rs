//! Inbound adapters translating external requests into domain port calls.
//!
//! Only the HTTP transport exists today; framework types stay in [`http`].

pub mod http;
