use std::pin::Pin;

use derive_builder::Builder;
use twilight_model::{
    channel::message::{AllowedMentions, Component, Embed, MessageFlags},
    http::attachment::Attachment,
};

use crate::{
    core::model::{CallbackAction, Hook, MessageData},
    error::{BuildError, core::RespondResult},
};

/// Which acknowledgment a [`Message`] becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Reply,
    Update,
}

#[derive(Builder)]
#[builder(
    setter(into, strip_option),
    pattern = "owned",
    build_fn(error = "BuildError")
)]
pub struct Message<'a> {
    #[builder(private)]
    hook: &'a Hook,
    #[builder(private)]
    kind: MessageKind,
    /// Allowed mentions of the response.
    #[builder(default)]
    allowed_mentions: Option<AllowedMentions>,
    /// List of attachments on the response.
    #[builder(default)]
    attachments: Option<Vec<Attachment>>,
    /// List of components on the response.
    #[builder(default)]
    components: Option<Vec<Component>>,
    /// Content of the response.
    #[builder(default)]
    content: Option<String>,
    /// Embeds of the response.
    #[builder(default)]
    embeds: Option<Vec<Embed>>,
    /// Interaction response data flags.
    ///
    /// The supported flags are [`MessageFlags::SUPPRESS_EMBEDS`] and
    /// [`MessageFlags::EPHEMERAL`].
    #[builder(default)]
    flags: Option<MessageFlags>,
    /// Whether the response is TTS.
    #[builder(default)]
    tts: Option<bool>,
}

impl<'a> MessageBuilder<'a> {
    pub(in crate::core::model) fn new(hook: &'a Hook, kind: MessageKind) -> Self {
        let builder = Self::default()
            .hook(hook)
            .kind(kind)
            .allowed_mentions(AllowedMentions::default());
        match (kind, hook.default_flags()) {
            (MessageKind::Reply, Some(flags)) => builder.flags(flags),
            _ => builder,
        }
    }

    /// # Errors
    /// if a required field was never set
    pub fn into_action(self) -> Result<CallbackAction, BuildError> {
        Ok(self.build()?.into())
    }
}

impl From<Message<'_>> for CallbackAction {
    fn from(value: Message<'_>) -> Self {
        let data = MessageData {
            allowed_mentions: value.allowed_mentions,
            attachments: value.attachments,
            components: value.components,
            content: value.content,
            embeds: value.embeds,
            flags: value.flags,
            tts: value.tts,
        };
        match value.kind {
            MessageKind::Reply => Self::Reply(data),
            MessageKind::Update => Self::Update(data),
        }
    }
}

impl<'a> IntoFuture for MessageBuilder<'a> {
    type Output = RespondResult<Hook>;

    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            let message = self.build()?;
            let hook = message.hook;
            hook.submit(message.into()).await
        })
    }
}

#[cfg(test)]
mod test {
    use twilight_model::{application::interaction::InteractionType, channel::message::MessageFlags};

    use crate::{
        core::model::CallbackAction,
        test_util::{SpyTransport, embed, hook_for, interaction},
    };

    #[tokio::test]
    async fn reply_builder_becomes_a_reply() {
        let spy = SpyTransport::new();
        let (_timer, hook) =
            hook_for(interaction(1, "T", InteractionType::ApplicationCommand), &spy);

        let action = hook
            .reply()
            .content("hello")
            .embeds([embed("an embed")])
            .into_action()
            .unwrap();
        let CallbackAction::Reply(data) = action else {
            panic!("expected a reply");
        };
        assert_eq!(data.content.as_deref(), Some("hello"));
        assert_eq!(data.embeds.map(|e| e.len()), Some(1));
        assert_eq!(data.flags, None);
        assert!(data.allowed_mentions.is_some());
    }

    #[tokio::test]
    async fn update_builder_ignores_the_ephemeral_default() {
        let spy = SpyTransport::new();
        let (_timer, hook) = hook_for(interaction(1, "T", InteractionType::MessageComponent), &spy);
        hook.set_ephemeral(true);

        let Ok(CallbackAction::Update(data)) = hook.update().content("edited").into_action() else {
            panic!("expected an update");
        };
        assert_eq!(data.flags, None);

        let Ok(CallbackAction::Reply(data)) = hook.reply_ephemeral("hidden").into_action() else {
            panic!("expected a reply");
        };
        assert_eq!(data.flags, Some(MessageFlags::EPHEMERAL));
    }

    #[tokio::test]
    async fn awaiting_the_builder_acknowledges() {
        let spy = SpyTransport::new();
        let (_timer, hook) =
            hook_for(interaction(1, "T", InteractionType::ApplicationCommand), &spy);

        let returned = hook.reply().content("done").await.unwrap();
        assert!(returned.is_acknowledged());
        assert_eq!(spy.calls(), 1);
    }
}
