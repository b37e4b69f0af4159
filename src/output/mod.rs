mod writer;

pub use writer::{LineWriter, Writer};
