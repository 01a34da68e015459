// Console front end over the catalog. The core never reads input itself.

pub mod session;

pub use session::{format_money, Session};
