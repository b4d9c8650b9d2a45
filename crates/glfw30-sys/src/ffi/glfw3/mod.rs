mod constants;
mod functions;
mod types;

pub use constants::*;
pub use functions::*;
pub use types::*;
