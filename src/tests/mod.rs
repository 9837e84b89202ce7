mod property;
pub mod utils;
