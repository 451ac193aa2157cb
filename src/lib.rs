pub mod assistant;
pub mod config;
pub mod error;
pub mod extract;
pub mod layout;
pub mod lower;
pub mod model;
pub mod normalize;
pub mod parse;
pub mod persist;
pub mod validate;
pub mod wasm;
