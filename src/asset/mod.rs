//! Finding and loading game assets at runtime.

pub mod exe_dir;
pub mod resolver;

pub use exe_dir::*;
pub use resolver::*;
