pub mod files;
pub mod time;
pub mod validation;
