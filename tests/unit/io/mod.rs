//! Unit tests for I/O operations

mod error;
