mod signed_request;
pub mod response;
mod validator;

pub use signed_request::*;
pub use response::*;
pub use validator::*;

#[cfg(test)]
pub(crate) mod test_support;
