pub(crate) mod canned;
pub(crate) mod keywords;
pub(crate) mod qna;
pub(crate) mod query_type;
pub(crate) mod sub_questions;

pub(crate) use query_type::QueryType;
