//! Command implementations

mod check;
mod dict;
mod init;
mod list;

pub use check::check;
pub use dict::dict;
pub use init::init;
pub use list::list;
