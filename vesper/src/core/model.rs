mod gate;
mod hook;
mod interaction;
pub mod payload;
mod response;

pub use gate::{AckGate, GateStatus, Gated};
pub use hook::{FollowupFuture, Hook};
pub use interaction::Interaction;
pub use response::{
    AttachmentMetadata, Autocomplete, AutocompleteBuilder, AutocompleteData, CallbackAction,
    EditData, Followup, FollowupAction, FollowupBuilder, Message, MessageBuilder, MessageData,
    MessageEdit, MessageKind, Modal, ModalBuilder, ModalData, ResponseData, ResponseKind,
    UpdateMessage, UpdateMessageBuilder,
};
