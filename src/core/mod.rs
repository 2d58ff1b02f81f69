//! Core building blocks shared by all commands

pub mod paths;
pub mod reader;
pub mod rules;
pub mod util;
