//! An exactly-once acknowledgment gate for chat platform interactions.
//!
//! Every inbound interaction must be acknowledged exactly once, within a short
//! window, with one response out of a closed set of kinds. Only after that
//! acknowledgment succeeds does the token-scoped follow-up channel open.
//! [`Hook`] wraps an [`Interaction`] together with its [`AckGate`] and enforces
//! that contract locally, before anything reaches the network.

mod core;
mod error;
#[cfg(test)]
mod test_util;

pub use crate::{
    core::{
        config::{Config, ConfigBuilder},
        http::{Body, Client, MessageTarget, Method, Request, Response, Route, Transport},
        konst,
        model::{
            AckGate, AttachmentMetadata, Autocomplete, AutocompleteBuilder, AutocompleteData,
            CallbackAction, EditData, Followup, FollowupAction, FollowupBuilder, FollowupFuture,
            GateStatus, Gated, Hook, Interaction, Message, MessageBuilder, MessageData,
            MessageEdit, MessageKind, Modal, ModalBuilder, ModalData, ResponseData, ResponseKind,
            UpdateMessage, UpdateMessageBuilder, payload,
        },
        timer::{ManualTimer, Timer, TimerHandle, TimerTask, TokioTimer},
        validate,
    },
    error::{
        BuildError,
        core::{
            AckError, ConfigError, EncodeError, FollowupError, FollowupResult, RespondError,
            RespondResult, TransportError, ValidationError,
        },
    },
};
