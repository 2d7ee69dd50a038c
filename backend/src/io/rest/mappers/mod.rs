//! Conversions between domain types and the `shared` DTOs.

pub mod bid_mapper;
pub mod pool_mapper;
pub mod report_mapper;
