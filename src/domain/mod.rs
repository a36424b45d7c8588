pub mod identity;
pub mod screen;
pub mod selection;
pub mod settings_menu;
pub mod wallet;
