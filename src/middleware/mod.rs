mod signed_request;

pub use signed_request::*;
