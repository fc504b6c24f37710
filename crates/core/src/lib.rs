//! Core domain logic for the anagrafe project.
//!
//! This crate holds the person record types, the flat-file table codec, and
//! the storage contracts shared by the server. It performs no I/O; the
//! concrete repository lives in the `anagrafe` crate.

pub mod person;
pub mod storage;
