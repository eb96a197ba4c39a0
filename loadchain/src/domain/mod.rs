//! Domain types for the load-chaining engine.
//!
//! This module contains the core domain model: geographic points, loads,
//! and route chains. Types enforce their invariants at construction time,
//! so code that receives these types can trust their validity.

mod chain;
mod error;
mod geo;
mod load;

pub use chain::{ChainLink, RouteChain};
pub use error::DomainError;
pub use geo::{GeoPoint, distance_miles};
pub use load::{Load, LoadId, Revenue, TimeWindow};
