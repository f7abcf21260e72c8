#![doc = include_str!("../README.md")]

pub mod commands;
pub mod core;
pub mod pipeline;
pub mod toolchain;
pub mod utils;
