mod explain_word;

pub use explain_word::*;
