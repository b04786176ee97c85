/// Interactive numbered menu over a vacancy catalog
pub mod menu;
pub mod view;

pub use menu::{ConsoleMenu, MenuChoice};
