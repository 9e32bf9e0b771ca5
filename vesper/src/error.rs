pub mod core;

use thiserror::Error;

#[derive(Error, Debug)]
#[error("builder field `{}` was never set", .0)]
pub struct BuildError(&'static str);

impl From<derive_builder::UninitializedFieldError> for BuildError {
    fn from(value: derive_builder::UninitializedFieldError) -> Self {
        Self(value.field_name())
    }
}
