pub mod filter;
pub mod game;
pub mod reference;
