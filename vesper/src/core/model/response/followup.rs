pub mod create;
pub mod update;

use super::{MessageData, MessageEdit};
use crate::{
    core::{
        http::{Body, MessageTarget, Request, Route},
        model::{Interaction, payload},
        validate,
    },
    error::core::{EncodeError, ValidationError},
};

/// A token-scoped operation that may only run once the interaction has been
/// acknowledged.
#[derive(Debug, Clone, PartialEq)]
pub enum FollowupAction {
    Create(MessageData),
    Update {
        target: MessageTarget,
        edit: MessageEdit,
    },
    Delete(MessageTarget),
    Get(MessageTarget),
}

impl FollowupAction {
    /// # Errors
    /// if a new message is empty, or any message exceeds its bounds
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Create(data) => validate::new_message(data),
            Self::Update { edit, .. } => validate::message_edit(edit),
            Self::Delete(_) | Self::Get(_) => Ok(()),
        }
    }

    /// Where the operation goes. Always addressed by the interaction's token,
    /// never by its id.
    #[must_use]
    pub fn route(&self, interaction: &Interaction) -> Route {
        let application_id = interaction.application_id;
        let token = interaction.token.clone();
        match *self {
            Self::Create(_) => Route::CreateFollowup {
                application_id,
                token,
            },
            Self::Update { target, .. } => Route::UpdateMessage {
                application_id,
                token,
                target,
            },
            Self::Delete(target) => Route::DeleteMessage {
                application_id,
                token,
                target,
            },
            Self::Get(target) => Route::GetMessage {
                application_id,
                token,
                target,
            },
        }
    }

    /// # Errors
    /// if the payload fails to serialise
    pub fn encode(&self) -> Result<Body, EncodeError> {
        match self {
            Self::Create(data) => payload::encode_document(&data.to_response_data(), data.files()),
            Self::Update { edit, .. } => {
                payload::encode_document(&edit.to_edit_data(), edit.files())
            }
            Self::Delete(_) | Self::Get(_) => Ok(Body::Empty),
        }
    }

    /// # Errors
    /// if the payload fails to serialise
    pub fn request(&self, interaction: &Interaction) -> Result<Request, EncodeError> {
        Ok(Request::new(self.route(interaction), self.encode()?))
    }
}

#[cfg(test)]
mod test {
    use twilight_model::{application::interaction::InteractionType, id::Id};

    use super::FollowupAction;
    use crate::{
        core::{
            http::{Body, MessageTarget, Route},
            model::{MessageData, MessageEdit},
        },
        error::core::ValidationError,
        test_util::{APPLICATION_ID, interaction},
    };

    #[test]
    fn create_body_is_the_bare_data_document() {
        let interaction = interaction(9, "T", InteractionType::ApplicationCommand);
        let request = FollowupAction::Create(MessageData::content("done"))
            .request(&interaction)
            .unwrap();

        assert_eq!(
            request.route,
            Route::CreateFollowup {
                application_id: Id::new(APPLICATION_ID),
                token: "T".into()
            }
        );
        assert_eq!(request.body, Body::Json(br#"{"content":"done"}"#.to_vec()));
    }

    #[test]
    fn get_and_delete_have_no_body() {
        let interaction = interaction(9, "T", InteractionType::ApplicationCommand);
        for action in [
            FollowupAction::Get(MessageTarget::Original),
            FollowupAction::Delete(MessageTarget::Followup(Id::new(5))),
        ] {
            assert_eq!(action.request(&interaction).unwrap().body, Body::Empty);
        }
    }

    #[test]
    fn empty_followups_are_rejected_but_empty_edits_are_not() {
        assert_eq!(
            FollowupAction::Create(MessageData::default()).validate(),
            Err(ValidationError::EmptyMessage)
        );
        let edit = FollowupAction::Update {
            target: MessageTarget::Original,
            edit: MessageEdit::default(),
        };
        assert!(edit.validate().is_ok());
    }
}
