mod determinize;
mod knowledge;
mod strategy;

pub use determinize::determinize;
pub use knowledge::Knowledge;
pub use strategy::{IsmctsConfig, IsmctsStrategy};
