pub mod display_name;
pub mod rank;
pub mod vocabulary;
