//! Consistent-hash ring mapping request keys to named nodes.
//!
//! A [`Ring`] places every node at a fixed number of points on a circular
//! 2^32 keyspace and resolves a key to the node owning the first point at
//! or after the key's digest, wrapping past the top of the keyspace back
//! to the first point. Adding a node only remaps the keys falling into the
//! segments its points claim (≈ 1/N of them for N existing nodes) instead
//! of rehashing everything.
//!
//! [`SharedRing`] wraps a ring in a reader-writer lock for use from any
//! number of threads. [`hash::digest`] is the placement hash, public
//! because its exact output is a compatibility contract: implementations
//! that must agree on placement have to reproduce it bit for bit.

mod error;
pub mod hash;
mod ring;
mod shared;

pub use error::RingError;
pub use ring::Ring;
pub use shared::SharedRing;
