//! rssagg - A small feed manager
//!
//! This crate serves browser forms for listing, viewing, creating and
//! editing feeds. Feeds live in an in-memory store that assigns their
//! identifiers.

pub mod config;
pub mod form;
pub mod models;
pub mod routes;
pub mod store;
