pub mod config;
pub mod http;
pub mod konst;
pub mod model;
pub mod timer;
pub(crate) mod traced;
pub mod validate;
