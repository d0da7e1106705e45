//! Repository implementations.
//!
//! Concrete implementations of the repository trait defined by the domain
//! layer. The usecase layer depends on the trait, not on these types
//! (dependency inversion).

pub mod inmemory;

pub use inmemory::InMemorySessionRepository;
