pub mod pog;

pub use pog::{Pog, PogField, PogFields};
