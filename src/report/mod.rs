//! Report rendering over the register's aggregations.
//!
//! The register itself never performs I/O; everything here writes
//! through a caller-supplied [`std::io::Write`] sink.

pub mod text;
