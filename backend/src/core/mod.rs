//! Core primitives shared by every module
//!
//! - **money**: fixed-point cent amounts and the decimal boundary

pub mod money;
