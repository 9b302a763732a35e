pub use countdown::*;

mod countdown;
