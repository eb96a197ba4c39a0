//! Boundary to the hosted VRPTW solver.
//!
//! The engine never solves vehicle routing with time windows itself. This
//! module builds the solver's problem description from an origin and a load
//! set, posts it, and decodes the per-vehicle stop sequences that come
//! back. Core chain search works with this module entirely unused.

mod client;
mod decode;
mod error;
mod problem;
mod types;

pub use client::{SolverClient, SolverConfig};
pub use decode::{RideSegment, ride_segments};
pub use error::SolverError;
pub use problem::{VrptwProblem, build_problem};
pub use types::{RouteAlternative, SolveRequest, SolveResponse, SolvedRoute, SolvedStop};
