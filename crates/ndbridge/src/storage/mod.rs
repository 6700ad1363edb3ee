//! Storage for native tensor data.
//!
//! Storage is always a flat owned buffer; shape, strides and order live on the
//! tensor wrapper.

mod dense;

pub use dense::Dense;
