//! # teleops-core
//!
//! Core types and error types for Teleops.
//!
//! This crate provides the foundational types shared across all Teleops crates:
//! - Entity structs for design versions, design items, resource types, and the
//!   equipment catalog
//! - Status enums with state machine transitions
//! - The list response envelope adapter used at every REST boundary
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod envelope;
pub mod errors;
