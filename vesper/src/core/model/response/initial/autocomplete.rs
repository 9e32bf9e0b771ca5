use std::pin::Pin;

use derive_builder::Builder;
use twilight_model::application::command::{
    CommandOptionChoice, CommandOptionChoiceValue, CommandOptionType,
};

use crate::{
    core::model::{AutocompleteData, CallbackAction, Hook},
    error::{BuildError, core::RespondResult},
};

#[derive(Builder)]
#[builder(setter(into), pattern = "owned", build_fn(error = "BuildError"))]
pub struct Autocomplete<'a> {
    #[builder(private)]
    hook: &'a Hook,
    /// The type of the option being completed.
    #[builder(private)]
    option_type: CommandOptionType,
    #[builder(default)]
    choices: Vec<CommandOptionChoice>,
}

impl<'a> AutocompleteBuilder<'a> {
    pub(in crate::core::model) fn new(hook: &'a Hook, option_type: CommandOptionType) -> Self {
        Self::default().hook(hook).option_type(option_type)
    }

    #[must_use]
    pub fn choice(mut self, name: impl Into<String>, value: CommandOptionChoiceValue) -> Self {
        self.choices
            .get_or_insert_with(Vec::new)
            .push(CommandOptionChoice {
                name: name.into(),
                name_localizations: None,
                value,
            });
        self
    }

    /// # Errors
    /// if a required field was never set
    pub fn into_action(self) -> Result<CallbackAction, BuildError> {
        Ok(self.build()?.into())
    }
}

impl From<Autocomplete<'_>> for CallbackAction {
    fn from(value: Autocomplete<'_>) -> Self {
        Self::Autocomplete(AutocompleteData {
            option_type: value.option_type,
            choices: value.choices,
        })
    }
}

impl<'a> IntoFuture for AutocompleteBuilder<'a> {
    type Output = RespondResult<Hook>;

    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            let autocomplete = self.build()?;
            let hook = autocomplete.hook;
            hook.submit(autocomplete.into()).await
        })
    }
}
