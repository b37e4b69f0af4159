pub mod check;
pub mod cliopt;
pub mod dump;
pub mod error;
pub mod filter;
pub mod format;
pub mod model;
pub mod output;
pub mod parser;
pub mod runner;
