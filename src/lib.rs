#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

pub mod algorithm;
pub mod config;
pub mod math;
pub mod task;
pub mod types;

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;
