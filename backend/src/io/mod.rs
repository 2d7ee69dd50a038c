//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services. Handlers
//! translate `shared` DTOs into domain commands, call a service, and map the
//! result (or the domain error) back onto an HTTP response.

pub mod rest;
