pub mod health;
pub mod pogs;
