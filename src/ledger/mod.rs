pub mod book;
pub mod session;
pub mod statement;
pub mod summary;
pub mod validation;

pub use book::CustomerBook;
pub use session::{LedgerSession, LedgerSessionBuilder};
pub use statement::{StatementRow, StatementView};
pub use summary::{compute_summary, search_by_name, Summary};
pub use validation::parse_date;
