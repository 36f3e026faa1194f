//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! HTML pages served over HTTP live under [`http`].

pub mod http;
