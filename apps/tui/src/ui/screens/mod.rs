pub mod help;
pub mod map;
pub mod prompt;
pub mod search;
pub mod submit;
