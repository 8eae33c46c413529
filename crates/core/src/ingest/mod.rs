pub mod provider;
pub mod records;
pub mod standings;
pub mod torvik;
pub mod types;
