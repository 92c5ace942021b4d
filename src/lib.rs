//! Pipelined fixed-point sine/cosine generator.
//!
//! A quarter period sine table is combined with a first or second order
//! Taylor correction on the sub-table phase remainder. Quadrant folding
//! makes the cosine an exact quarter turn shifted copy of the sine.
//!
//! The computation is expressed as a sequence of pure pipeline stages.
//! [`SinCos::evaluate`] folds them combinationally, [`Pipeline`] registers
//! them to reproduce the constant latency, one-input-per-cycle contract of
//! the hardware core bit for bit.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod config;
pub use config::*;
mod table;
pub use table::*;
pub mod phase;
mod quadrant;
pub use quadrant::*;
pub mod taylor;
mod cossin;
pub use cossin::*;
mod pipeline;
pub use pipeline::*;
