//! Plugin configuration CRUD endpoints.

pub mod routes;
