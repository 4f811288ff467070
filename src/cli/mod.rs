//! Terminal interface

pub mod console;

pub use console::Console;
