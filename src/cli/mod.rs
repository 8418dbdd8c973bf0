pub mod args;
pub mod session;

pub use args::*;
pub use session::*;
