//! Unit tests for mosaic composition
