//! Cryptography utilities

pub mod jwt;
