//! Flat-file storage backend.
//!
//! Persists the person table as a delimited text file, read in full at the
//! start of every operation and rewritten in full at the end of every
//! mutation. No state is cached between calls.

mod repository;

pub use repository::FlatFileRepository;
