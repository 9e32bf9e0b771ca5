pub mod autocomplete;
pub mod message;
pub mod modal;
