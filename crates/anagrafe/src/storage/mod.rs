//! Storage backend implementations.
//!
//! Concrete implementations of the repository trait defined in
//! `anagrafe_core::storage`. The flat-file backend is the only one; the
//! delimited file it manages is the sole source of truth for the service.

mod flatfile;

pub use flatfile::FlatFileRepository;
