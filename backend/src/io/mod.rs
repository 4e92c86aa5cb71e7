//! # IO Module
//!
//! Interface layer translating HTTP requests into domain operations and
//! domain results into JSON responses. Holds no business rules.

pub mod rest;
