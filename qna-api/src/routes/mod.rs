pub(crate) mod chat;
pub(crate) mod error;
pub(crate) mod popular_questions;
pub(crate) mod search;

pub(crate) use error::ApiError;
