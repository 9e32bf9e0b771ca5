use std::pin::Pin;

use derive_builder::Builder;
use twilight_model::{
    channel::{
        Message,
        message::{AllowedMentions, Component, Embed, MessageFlags},
    },
    http::attachment::Attachment,
};

use crate::{
    core::model::{FollowupAction, Hook, MessageData},
    error::{
        BuildError,
        core::{FollowupError, FollowupResult},
    },
};

#[derive(Builder)]
#[builder(
    name = "FollowupBuilder",
    setter(into, strip_option),
    pattern = "owned",
    build_fn(error = "BuildError")
)]
pub struct Followup<'a> {
    #[builder(private)]
    hook: &'a Hook,
    /// Allowed mentions of the followup.
    #[builder(default)]
    allowed_mentions: Option<AllowedMentions>,
    /// List of attachments on the followup.
    #[builder(default)]
    attachments: Option<Vec<Attachment>>,
    /// List of components on the followup.
    #[builder(default)]
    components: Option<Vec<Component>>,
    /// Content of the followup.
    #[builder(default)]
    content: Option<String>,
    /// Embeds of the followup.
    #[builder(default)]
    embeds: Option<Vec<Embed>>,
    /// Message flags.
    ///
    /// The supported flags are [`MessageFlags::SUPPRESS_EMBEDS`] and
    /// [`MessageFlags::EPHEMERAL`].
    #[builder(default)]
    flags: Option<MessageFlags>,
    /// Whether the followup is TTS.
    #[builder(default)]
    tts: Option<bool>,
}

impl<'a> FollowupBuilder<'a> {
    pub(in crate::core::model) fn new(hook: &'a Hook) -> Self {
        let builder = Self::default().hook(hook);
        match hook.default_flags() {
            Some(flags) => builder.flags(flags),
            None => builder,
        }
    }

    /// # Errors
    /// if a required field was never set
    pub fn into_action(self) -> Result<FollowupAction, BuildError> {
        Ok(self.build()?.into())
    }
}

impl From<Followup<'_>> for FollowupAction {
    fn from(value: Followup<'_>) -> Self {
        Self::Create(MessageData {
            allowed_mentions: value.allowed_mentions,
            attachments: value.attachments,
            components: value.components,
            content: value.content,
            embeds: value.embeds,
            flags: value.flags,
            tts: value.tts,
        })
    }
}

impl<'a> IntoFuture for FollowupBuilder<'a> {
    type Output = FollowupResult<Message>;

    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            let followup = self.build().map_err(FollowupError::from)?;
            let hook = followup.hook;
            hook.followup_submit(followup.into()).message().await
        })
    }
}
