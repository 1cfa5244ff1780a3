//! Integration test crate for Glassmorph.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on the glassmorph crates to verify they work together.

#[cfg(test)]
mod sequencing;

#[cfg(test)]
mod screens;
