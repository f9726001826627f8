mod near;
mod status;
mod stop;
mod update;

pub use near::*;
pub use status::*;
pub use stop::*;
pub use update::*;
