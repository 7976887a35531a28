mod explanation;
mod retry_policy;

pub use explanation::*;
pub use retry_policy::*;
