pub mod menu;
pub mod utils;
