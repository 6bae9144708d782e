pub(crate) mod chat;
pub(crate) mod error;
pub(crate) mod library;

pub(crate) use error::ApiError;
