mod error;
mod http_mapping;
mod table;
mod traits;

pub use error::{RepositoryError, Result};
pub use http_mapping::repository_error_to_status_code;
pub use table::{fiscal_code_taken, next_id, parse_table, position_of, render_table, HEADER};
pub use traits::PersonRepository;
