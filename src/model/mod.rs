mod family;
mod labels;
mod sample;
mod types;

pub use family::*;
pub use labels::*;
pub use sample::*;
pub use types::*;
