pub mod error;
pub mod pogs;

pub use error::PogError;
pub use pogs::PogService;
