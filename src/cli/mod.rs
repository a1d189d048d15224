//! Command-line front end

pub mod auth;
pub mod checkout;
pub mod context;
pub mod edit;
pub mod list;
pub mod lookup;
pub mod open;
pub mod prompt;
pub mod style;
pub mod view;

pub use auth::run_auth;
pub use checkout::run_checkout;
pub use edit::run_edit;
pub use list::run_list;
pub use lookup::{run_labels, run_users};
pub use open::{OpenOptions, run_open};
pub use view::run_view;
