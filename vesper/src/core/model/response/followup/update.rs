use std::pin::Pin;

use derive_builder::Builder;
use twilight_model::{
    channel::{
        Message,
        message::{AllowedMentions, Component, Embed},
    },
    http::attachment::Attachment,
};

use crate::{
    core::{
        http::MessageTarget,
        model::{FollowupAction, Hook, MessageEdit},
    },
    error::{
        BuildError,
        core::{FollowupError, FollowupResult},
    },
};

#[derive(Builder)]
#[builder(
    setter(into, strip_option),
    pattern = "owned",
    build_fn(error = "BuildError")
)]
pub struct UpdateMessage<'a> {
    #[builder(private)]
    hook: &'a Hook,
    #[builder(private)]
    target: MessageTarget,
    /// Allowed mentions of the message.
    #[builder(default)]
    allowed_mentions: Option<AllowedMentions>,
    /// Attachments to add to the message.
    #[builder(default)]
    attachments: Option<Vec<Attachment>>,
    /// Components of the message. [`None`] removes them all.
    #[builder(default)]
    components: Option<Option<Vec<Component>>>,
    /// Content of the message. [`None`] removes it.
    #[builder(default)]
    content: Option<Option<String>>,
    /// Embeds of the message. [`None`] removes them all.
    #[builder(default)]
    embeds: Option<Option<Vec<Embed>>>,
}

impl<'a> UpdateMessageBuilder<'a> {
    pub(in crate::core::model) fn new(hook: &'a Hook, target: MessageTarget) -> Self {
        Self::default().hook(hook).target(target)
    }

    /// # Errors
    /// if a required field was never set
    pub fn into_action(self) -> Result<FollowupAction, BuildError> {
        Ok(self.build()?.into())
    }
}

impl From<UpdateMessage<'_>> for FollowupAction {
    fn from(value: UpdateMessage<'_>) -> Self {
        Self::Update {
            target: value.target,
            edit: MessageEdit {
                allowed_mentions: value.allowed_mentions,
                attachments: value.attachments,
                components: value.components,
                content: value.content,
                embeds: value.embeds,
            },
        }
    }
}

impl<'a> IntoFuture for UpdateMessageBuilder<'a> {
    type Output = FollowupResult<Message>;

    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            let update = self.build().map_err(FollowupError::from)?;
            let hook = update.hook;
            hook.followup_submit(update.into()).message().await
        })
    }
}

#[cfg(test)]
mod test {
    use twilight_model::{
        application::interaction::InteractionType, channel::message::Embed, id::Id,
    };

    use crate::{
        core::{http::MessageTarget, model::FollowupAction},
        test_util::{SpyTransport, hook_for, interaction},
    };

    #[tokio::test]
    async fn targets_follow_the_hook_method() {
        let spy = SpyTransport::new();
        let (_timer, hook) =
            hook_for(interaction(1, "T", InteractionType::ApplicationCommand), &spy);

        let Ok(FollowupAction::Update { target, edit }) =
            hook.update_original().content(String::from("new")).into_action()
        else {
            panic!("expected an update");
        };
        assert_eq!(target, MessageTarget::Original);
        assert_eq!(edit.content, Some(Some(String::from("new"))));

        let Ok(FollowupAction::Update { target, edit }) =
            hook.update_followup(Id::new(3)).embeds(None::<Vec<Embed>>).into_action()
        else {
            panic!("expected an update");
        };
        assert_eq!(target, MessageTarget::Followup(Id::new(3)));
        assert_eq!(edit.embeds, Some(None));
        assert_eq!(edit.content, None);
    }
}
