pub mod interface;
pub mod manager;
