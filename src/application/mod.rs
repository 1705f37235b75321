pub mod drafts;
pub mod state;

pub use drafts::*;
pub use state::*;
