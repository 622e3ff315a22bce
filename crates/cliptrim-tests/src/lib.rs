//! Integration test crate for ClipTrim.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on the cliptrim crates to verify they work together.

#[cfg(test)]
mod timeline;

#[cfg(test)]
mod session;
