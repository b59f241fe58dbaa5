//! Example structs whose validators are generated by the build script.
//!
//! Each module declares annotated structs and includes the code `vgen`
//! generated for it.

pub mod roster;
pub mod tally;
pub mod user;

pub use roster::Roster;
pub use tally::{Borrowed, Tally};
pub use user::User;
