//! HTTP routing and cross-cutting handlers.

pub mod capabilities;
pub mod json;
pub mod monitoring;
pub mod routes;
