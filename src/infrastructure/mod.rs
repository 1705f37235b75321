pub mod persistence;
pub mod submission;

pub use persistence::*;
pub use submission::*;
