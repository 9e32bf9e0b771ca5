use std::pin::Pin;

use derive_builder::Builder;
use twilight_model::channel::message::{
    Component,
    component::{ActionRow, TextInput},
};

use crate::{
    core::model::{CallbackAction, Hook, ModalData},
    error::{BuildError, core::RespondResult},
};

#[derive(Builder)]
#[builder(setter(into), pattern = "owned", build_fn(error = "BuildError"))]
pub struct Modal<'a> {
    #[builder(private)]
    hook: &'a Hook,
    #[builder(private)]
    custom_id: String,
    #[builder(private)]
    title: String,
    /// Rows of the modal, each holding one text input.
    #[builder(default)]
    components: Vec<Component>,
}

impl<'a> ModalBuilder<'a> {
    pub(in crate::core::model) fn new(hook: &'a Hook, custom_id: String, title: String) -> Self {
        Self::default().hook(hook).custom_id(custom_id).title(title)
    }

    /// Appends a row holding `input`.
    #[must_use]
    pub fn input(mut self, input: TextInput) -> Self {
        self.components
            .get_or_insert_with(Vec::new)
            .push(Component::ActionRow(ActionRow {
                components: vec![input.into()],
            }));
        self
    }

    /// # Errors
    /// if a required field was never set
    pub fn into_action(self) -> Result<CallbackAction, BuildError> {
        Ok(self.build()?.into())
    }
}

impl From<Modal<'_>> for CallbackAction {
    fn from(value: Modal<'_>) -> Self {
        Self::Modal(ModalData {
            custom_id: value.custom_id,
            title: value.title,
            components: value.components,
        })
    }
}

impl<'a> IntoFuture for ModalBuilder<'a> {
    type Output = RespondResult<Hook>;

    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            let modal = self.build()?;
            let hook = modal.hook;
            hook.submit(modal.into()).await
        })
    }
}

#[cfg(test)]
mod test {
    use twilight_model::application::interaction::InteractionType;

    use crate::{
        core::model::CallbackAction,
        error::core::{RespondError, ValidationError},
        test_util::{SpyTransport, hook_for, interaction, text_input},
    };

    #[tokio::test]
    async fn inputs_become_rows() {
        let spy = SpyTransport::new();
        let (_timer, hook) =
            hook_for(interaction(1, "T", InteractionType::ApplicationCommand), &spy);

        let Ok(CallbackAction::Modal(data)) = hook
            .modal("confirm", "Are you sure?")
            .input(text_input("answer"))
            .input(text_input("reason"))
            .into_action()
        else {
            panic!("expected a modal");
        };
        assert_eq!(data.custom_id, "confirm");
        assert_eq!(data.components.len(), 2);
    }

    #[tokio::test]
    async fn modal_without_inputs_is_rejected() {
        let spy = SpyTransport::new();
        let (_timer, hook) =
            hook_for(interaction(1, "T", InteractionType::ApplicationCommand), &spy);

        let result = hook.modal("confirm", "Are you sure?").await;
        assert!(matches!(
            result,
            Err(RespondError::Validation(ValidationError::ModalComponentCount { count: 0, .. }))
        ));
        assert_eq!(spy.calls(), 0);
    }

    #[tokio::test]
    async fn modal_cannot_answer_a_modal() {
        let spy = SpyTransport::new();
        let (_timer, hook) = hook_for(interaction(1, "T", InteractionType::ModalSubmit), &spy);

        let result = hook
            .modal("again", "Again")
            .input(text_input("answer"))
            .await;
        assert!(matches!(
            result,
            Err(RespondError::Validation(ValidationError::IncompatibleKind { .. }))
        ));
        assert!(!hook.is_acknowledged());
    }
}
