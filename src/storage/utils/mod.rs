// Utilities for storage module
pub mod error;
pub mod name;
pub mod path;
pub mod size;
