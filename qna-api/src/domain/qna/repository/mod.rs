//! QnA repository implementations.

mod postgres;
#[cfg(test)]
mod mock;

pub use postgres::PgQnaRepository;
#[cfg(test)]
pub use mock::MockQnaRepository;
