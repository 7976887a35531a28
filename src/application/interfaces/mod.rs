mod explanation_provider;

pub use explanation_provider::*;
