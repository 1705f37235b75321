pub mod catalog;
pub mod errors;
pub mod export;
pub mod models;
pub mod validation;

pub use catalog::*;
pub use errors::*;
pub use export::*;
pub use models::*;
pub use validation::*;
