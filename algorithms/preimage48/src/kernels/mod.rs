//! Primitive Kernels
//!
//! The Speck48/96 block cipher and the CS48 Davies-Meyer compression
//! function built on top of it.

pub mod compress;
pub mod constants;
pub mod speck;
