pub mod config;
pub mod export;
pub mod fetch;
pub mod normalize;
pub mod output;
pub mod process;
