pub mod fs;
pub mod logger;
