//! Workflow CRUD and run endpoints.

pub mod routes;
