pub mod menu;
pub mod upload;
