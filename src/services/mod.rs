mod score_service;

pub use score_service::*;

#[cfg(test)]
mod tests;
