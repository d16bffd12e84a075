//! Shared helpers for pgprint integration tests

#![allow(dead_code)]

pub mod node_fixture;
