pub mod keychain;
pub mod store;
