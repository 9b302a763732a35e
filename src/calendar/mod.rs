pub use index::*;
pub use session::*;
pub use structs::*;

mod index;
mod session;
mod structs;
