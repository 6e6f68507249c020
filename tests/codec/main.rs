#[path = "../common/mod.rs"]
mod common;

mod file_io;
mod framing;
mod malformed_input;
