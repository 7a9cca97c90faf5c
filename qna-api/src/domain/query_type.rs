use strum::{Display, EnumString};

/// Which audience a query belongs to.
///
/// Selects the backing QnA table and the popularity category. Anything
/// other than `buyer`/`supplier` fails to parse and is rejected with a
/// validation error before the pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum QueryType {
    Buyer,
    Supplier,
}

impl QueryType {
    /// Table holding the pre-authored answers for this query type.
    ///
    /// Fixed mapping so table names never come from request input.
    pub fn qna_table(self) -> &'static str {
        match self {
            QueryType::Buyer => "qna",
            QueryType::Supplier => "supplier_qna",
        }
    }
}
