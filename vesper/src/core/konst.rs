pub mod discord {
    pub const API_BASE: &str = "https://discord.com/api/v10";
    /// Milliseconds between the Unix epoch and the platform's snowflake epoch.
    pub const EPOCH_MS: u64 = 1_420_070_400_000;
    pub const SNOWFLAKE_TIMESTAMP_SHIFT: u8 = 22;
}

pub mod gate {
    use std::time::Duration;

    /// The platform only waits three seconds for an acknowledgment. The gate
    /// waits longer so that a slow but successful request is not failed
    /// locally.
    pub const ACK_TIMEOUT: Duration = Duration::from_secs(10);
    pub const TOKEN_LIFETIME: Duration = Duration::from_secs(15 * 60);
}

pub mod http {
    use std::time::Duration;

    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
    pub const USER_AGENT: &str = concat!("vesper/", env!("CARGO_PKG_VERSION"));
}

pub mod limits {
    pub const MESSAGE_CONTENT_LENGTH_MAX: usize = 2_000;
    pub const MESSAGE_EMBEDS_MAX: usize = 10;
    pub const MESSAGE_ACTION_ROWS_MAX: usize = 5;
    pub const MESSAGE_ATTACHMENTS_MAX: usize = 10;

    pub const COMMAND_CHOICES_MAX: usize = 25;
    pub const CHOICE_NAME_LENGTH_MIN: usize = 1;
    pub const CHOICE_NAME_LENGTH_MAX: usize = 100;
    pub const CHOICE_VALUE_LENGTH_MIN: usize = 1;
    pub const CHOICE_VALUE_LENGTH_MAX: usize = 100;
    /// The largest integer a JSON number can hold without losing precision.
    pub const MAX_POSITIVE_NUMBER: i64 = (1 << 53) - 1;
    pub const MIN_NEGATIVE_NUMBER: i64 = -MAX_POSITIVE_NUMBER;

    pub const MODAL_CUSTOM_ID_LENGTH_MIN: usize = 1;
    pub const MODAL_CUSTOM_ID_LENGTH_MAX: usize = 100;
    pub const MODAL_TITLE_LENGTH_MIN: usize = 1;
    pub const MODAL_TITLE_LENGTH_MAX: usize = 45;
    pub const MODAL_COMPONENTS_MIN: usize = 1;
    pub const MODAL_COMPONENTS_MAX: usize = 5;

    /// How many characters of an offending value are echoed back in a
    /// validation error.
    pub const ERROR_PREVIEW_LENGTH: usize = 32;
}

pub mod env {
    pub const API_BASE: &str = "VESPER_API_BASE";
    pub const ACK_TIMEOUT_MS: &str = "VESPER_ACK_TIMEOUT_MS";
    pub const REQUEST_TIMEOUT_MS: &str = "VESPER_REQUEST_TIMEOUT_MS";
    pub const USER_AGENT: &str = "VESPER_USER_AGENT";
}
