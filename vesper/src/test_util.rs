use std::sync::{Arc, Mutex};

use futures::{FutureExt, future::BoxFuture};
use twilight_model::{
    application::{
        command::{CommandOptionChoice, CommandOptionChoiceValue},
        interaction::InteractionType,
    },
    channel::message::{
        Component, Embed,
        component::{ActionRow, TextInput, TextInputStyle},
    },
    id::Id,
};
use twilight_util::builder::embed::EmbedBuilder;

use crate::{
    core::{
        http::{Request, Response, Transport},
        konst,
        model::{Hook, Interaction},
        timer::ManualTimer,
    },
    error::core::TransportError,
};

pub const APPLICATION_ID: u64 = 42;

/// Records every request; optionally fails initial callbacks.
#[derive(Default)]
pub struct SpyTransport {
    requests: Mutex<Vec<Request>>,
    fail_callbacks: bool,
}

impl SpyTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_callbacks() -> Arc<Self> {
        Arc::new(Self {
            fail_callbacks: true,
            ..Self::default()
        })
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for SpyTransport {
    fn execute(&self, request: Request) -> BoxFuture<'static, Result<Response, TransportError>> {
        let fail = self.fail_callbacks && request.route.is_callback();
        self.requests.lock().unwrap().push(request);

        let result = if fail {
            Err(TransportError::Other("simulated network error".into()))
        } else {
            Ok(Response::new(200, Vec::new()))
        };
        async move {
            tokio::task::yield_now().await;
            result
        }
        .boxed()
    }
}

pub fn interaction(id: u64, token: &str, kind: InteractionType) -> Interaction {
    Interaction::new(Id::new(id), Id::new(APPLICATION_ID), token, kind)
}

pub fn hook_for(interaction: Interaction, transport: &Arc<SpyTransport>) -> (ManualTimer, Hook) {
    let timer = ManualTimer::new();
    let hook = Hook::with_timer(
        interaction,
        transport.clone(),
        &timer,
        konst::gate::ACK_TIMEOUT,
    );
    (timer, hook)
}

pub fn embed(description: &str) -> Embed {
    EmbedBuilder::new().description(description).build()
}

pub fn text_input(custom_id: &str) -> TextInput {
    TextInput {
        custom_id: custom_id.into(),
        label: "Answer".into(),
        max_length: None,
        min_length: None,
        required: true.into(),
        placeholder: None,
        style: TextInputStyle::Short,
        value: None,
    }
}

pub fn input_row(custom_id: &str) -> Component {
    Component::ActionRow(ActionRow {
        components: vec![text_input(custom_id).into()],
    })
}

pub fn string_choice(name: &str) -> CommandOptionChoice {
    CommandOptionChoice {
        name: name.into(),
        name_localizations: None,
        value: CommandOptionChoiceValue::String(name.into()),
    }
}
