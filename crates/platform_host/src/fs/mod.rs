//! Virtual filesystem helpers shared by host contracts and the terminal.

pub mod path;
