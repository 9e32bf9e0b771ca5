use twilight_model::{
    application::interaction::InteractionType, channel::message::MessageFlags,
    http::attachment::Attachment,
};

use super::{AutocompleteData, MessageData, ModalData, ResponseData, ResponseKind};
use crate::{
    core::{http::Body, model::payload, validate},
    error::core::{EncodeError, ValidationError},
};

/// The one acknowledgment an interaction receives.
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackAction {
    Pong,
    Reply(MessageData),
    DeferredReply { ephemeral: bool },
    DeferredUpdate,
    Update(MessageData),
    Autocomplete(AutocompleteData),
    Modal(ModalData),
    PremiumRequired,
    LaunchActivity,
    /// A response this crate does not model. Its data is sent as is, without
    /// structural validation.
    Raw {
        kind: ResponseKind,
        data: Option<ResponseData>,
    },
}

impl CallbackAction {
    #[must_use]
    pub const fn kind(&self) -> ResponseKind {
        match self {
            Self::Pong => ResponseKind::Pong,
            Self::Reply(_) => ResponseKind::ChannelMessageWithSource,
            Self::DeferredReply { .. } => ResponseKind::DeferredChannelMessageWithSource,
            Self::DeferredUpdate => ResponseKind::DeferredUpdateMessage,
            Self::Update(_) => ResponseKind::UpdateMessage,
            Self::Autocomplete(_) => ResponseKind::ApplicationCommandAutocompleteResult,
            Self::Modal(_) => ResponseKind::Modal,
            Self::PremiumRequired => ResponseKind::PremiumRequired,
            Self::LaunchActivity => ResponseKind::LaunchActivity,
            Self::Raw { kind, .. } => *kind,
        }
    }

    /// Checks the payload's bounds, then whether this kind may acknowledge an
    /// interaction of type `interaction`.
    ///
    /// # Errors
    /// if either check fails
    pub fn validate(&self, interaction: InteractionType) -> Result<(), ValidationError> {
        match self {
            Self::Reply(data) => validate::new_message(data)?,
            Self::Update(data) => validate::message(data)?,
            Self::Autocomplete(data) => validate::autocomplete(data)?,
            Self::Modal(data) => validate::modal(data)?,
            Self::Pong
            | Self::DeferredReply { .. }
            | Self::DeferredUpdate
            | Self::PremiumRequired
            | Self::LaunchActivity
            | Self::Raw { .. } => {}
        }
        validate::compatibility(self.kind(), interaction)
    }

    #[must_use]
    pub fn data(&self) -> Option<ResponseData> {
        match self {
            Self::Reply(data) | Self::Update(data) => Some(data.to_response_data()),
            Self::DeferredReply { ephemeral: true } => Some(ResponseData {
                flags: Some(MessageFlags::EPHEMERAL),
                ..ResponseData::default()
            }),
            Self::Autocomplete(data) => Some(ResponseData {
                choices: Some(data.choices.clone()),
                ..ResponseData::default()
            }),
            Self::Modal(data) => Some(ResponseData {
                custom_id: Some(data.custom_id.clone()),
                title: Some(data.title.clone()),
                components: Some(data.components.clone()),
                ..ResponseData::default()
            }),
            Self::Raw { data, .. } => data.clone(),
            Self::Pong
            | Self::DeferredReply { ephemeral: false }
            | Self::DeferredUpdate
            | Self::PremiumRequired
            | Self::LaunchActivity => None,
        }
    }

    #[must_use]
    pub fn files(&self) -> &[Attachment] {
        match self {
            Self::Reply(data) | Self::Update(data) => data.files(),
            _ => &[],
        }
    }

    /// # Errors
    /// if the payload fails to serialise
    pub fn encode(&self) -> Result<Body, EncodeError> {
        payload::encode_callback(self.kind(), self.data().as_ref(), self.files())
    }
}
