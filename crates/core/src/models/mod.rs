pub mod document;
pub mod legacy;
pub mod portfolio;
pub mod records;
pub mod settings;
pub mod shape;
