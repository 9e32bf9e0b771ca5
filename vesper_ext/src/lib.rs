pub mod as_chars;
pub mod bounds;
pub mod pretty;
