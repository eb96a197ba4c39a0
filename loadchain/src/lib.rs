//! Load-chaining route engine.
//!
//! Given an origin, a destination, and a set of posted truck loads, finds
//! every feasible way to chain loads end-to-end between them under bounded
//! deadhead (empty-travel) distances, with automatic bound relaxation,
//! deterministic ranking, and pagination.
//!
//! The engine itself is synchronous and self-contained. The [`solver`] and
//! [`tripplan`] modules are thin boundaries to external collaborators (a
//! hosted VRPTW solver and a hosted text-generation service); the engine
//! works with both absent.

pub mod domain;
pub mod search;
pub mod solver;
pub mod tripplan;
