pub mod loader;
pub mod paths;
pub mod temp;

pub use loader::*;
pub use paths::*;
pub use temp::*;
