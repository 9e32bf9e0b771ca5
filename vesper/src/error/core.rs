use std::{sync::Arc, time::Duration};

use thiserror::Error;
use twilight_model::application::{command::CommandOptionType, interaction::InteractionType};

use crate::core::model::ResponseKind;

pub type RespondResult<T> = Result<T, RespondError>;
pub type FollowupResult<T> = Result<T, FollowupError>;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// The recorded reason a gate failed.
///
/// Every operation that joins a failed gate, no matter how late, observes this
/// exact value. Transport failures are shared behind an [`Arc`], so two copies
/// compare equal only when they stem from the same failed request.
#[derive(Error, Debug, Clone)]
pub enum AckError {
    #[error("interaction was not acknowledged within {0:?}")]
    Timeout(Duration),
    #[error("acknowledging the interaction failed: {0}")]
    Transport(Arc<TransportError>),
}

impl PartialEq for AckError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Timeout(a), Self::Timeout(b)) => a == b,
            (Self::Transport(a), Self::Transport(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("message content is {len} characters long, the limit is {max}")]
    ContentLength { len: usize, max: usize },
    #[error("{count} embeds were given, the limit is {max}")]
    EmbedCount { count: usize, max: usize },
    #[error("{count} action rows were given, the limit is {max}")]
    ActionRowCount { count: usize, max: usize },
    #[error("{count} attachments were given, the limit is {max}")]
    AttachmentCount { count: usize, max: usize },
    #[error("a message needs content, embeds, components or attachments")]
    EmptyMessage,
    #[error("{count} choices were given, the limit is {max}")]
    ChoiceCount { count: usize, max: usize },
    #[error("choice name `{name}` is {len} characters long, expected [{min}, {max}]")]
    ChoiceNameLength {
        name: String,
        len: usize,
        min: usize,
        max: usize,
    },
    #[error("choice value `{value}` is {len} characters long, expected [{min}, {max}]")]
    ChoiceValueLength {
        value: String,
        len: usize,
        min: usize,
        max: usize,
    },
    #[error("choice value {value} is not within [{min}, {max}]")]
    ChoiceValueRange { value: f64, min: i64, max: i64 },
    #[error("a {found} choice value cannot be used for a {expected:?} option")]
    ChoiceTypeMismatch {
        expected: CommandOptionType,
        found: &'static str,
    },
    #[error("{0:?} options do not support choices")]
    UnsupportedOptionType(CommandOptionType),
    #[error("modal custom id is {len} characters long, expected [{min}, {max}]")]
    ModalCustomIdLength { len: usize, min: usize, max: usize },
    #[error("modal title is {len} characters long, expected [{min}, {max}]")]
    ModalTitleLength { len: usize, min: usize, max: usize },
    #[error("{count} modal rows were given, expected [{min}, {max}]")]
    ModalComponentCount { count: usize, min: usize, max: usize },
    #[error("a {kind:?} response cannot acknowledge a {interaction:?} interaction")]
    IncompatibleKind {
        kind: ResponseKind,
        interaction: InteractionType,
    },
    #[error("response kind {0:?} cannot be sent")]
    UnknownKind(ResponseKind),
}

#[derive(Error, Debug)]
#[error("serialising the payload failed: {}", .0)]
pub struct EncodeError(#[from] serde_json::Error);

#[derive(Error, Debug)]
pub enum RespondError {
    #[error(transparent)]
    Builder(#[from] super::BuildError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("interaction has already been acknowledged")]
    AlreadyAcknowledged,
    #[error(transparent)]
    Gate(#[from] AckError),
}

#[derive(Error, Debug)]
pub enum FollowupError {
    #[error(transparent)]
    Builder(#[from] super::BuildError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Gate(#[from] AckError),
    #[error("the followup request failed: {}", .0)]
    Transport(#[from] TransportError),
    #[error("deserialising the followup response failed: {}", .0)]
    Deserialise(#[from] serde_json::Error),
    /// The gate went away without resolving the followup, which only happens
    /// when the runtime or timer driving it is torn down first.
    #[error("the gate was torn down before the followup resolved")]
    Abandoned,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Dotenv(#[from] dotenvy::Error),
    #[error("invalid value for `{name}`: {value:?}")]
    Invalid { name: &'static str, value: String },
}
