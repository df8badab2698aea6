//! Client library for the Foglio blog API.
//!
//! Holds the pieces the command-line interface is built from: a typed HTTP
//! client, an explicit keyed query cache, the optimistic mutation runner
//! that keeps the cache honest, and the reusable create/edit form model.

pub mod api;
pub mod cache;
pub mod form;
pub mod mutation;
