mod callback;
mod data;
mod followup;
mod initial;
mod kind;

pub use callback::CallbackAction;
pub use data::{
    AttachmentMetadata, AutocompleteData, EditData, MessageData, MessageEdit, ModalData,
    ResponseData,
};
pub use followup::{
    FollowupAction,
    create::{Followup, FollowupBuilder},
    update::{UpdateMessage, UpdateMessageBuilder},
};
pub use initial::{
    autocomplete::{Autocomplete, AutocompleteBuilder},
    message::{Message, MessageBuilder, MessageKind},
    modal::{Modal, ModalBuilder},
};
pub use kind::ResponseKind;
