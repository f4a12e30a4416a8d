mod score;
mod signed_request;

pub use score::*;
pub use signed_request::*;
