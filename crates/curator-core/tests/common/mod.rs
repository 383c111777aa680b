//! Shared helpers for curator-core integration tests

#![allow(dead_code)]

pub mod backend;
pub mod fixtures;
