mod near;
mod status;
mod updates;

pub use near::*;
pub use status::*;
pub use updates::*;
