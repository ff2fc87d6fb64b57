//! Python bindings (feature `pyo3`)
//!
//! A thin shell over [`SessionController`](crate::session::SessionController):
//! decimal amounts and string ids in, dicts and tuples out.

pub mod session;
pub mod types;
