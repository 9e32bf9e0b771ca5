use serde::{Deserialize, Serialize};

/// The type of an initial interaction response, serialised as its wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ResponseKind {
    Pong,
    ChannelMessageWithSource,
    DeferredChannelMessageWithSource,
    DeferredUpdateMessage,
    UpdateMessage,
    ApplicationCommandAutocompleteResult,
    Modal,
    PremiumRequired,
    LaunchActivity,
    Unknown(u8),
}

impl ResponseKind {
    pub const PONG: u8 = 1;
    pub const CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;
    pub const DEFERRED_CHANNEL_MESSAGE_WITH_SOURCE: u8 = 5;
    pub const DEFERRED_UPDATE_MESSAGE: u8 = 6;
    pub const UPDATE_MESSAGE: u8 = 7;
    pub const APPLICATION_COMMAND_AUTOCOMPLETE_RESULT: u8 = 8;
    pub const MODAL: u8 = 9;
    pub const PREMIUM_REQUIRED: u8 = 10;
    pub const LAUNCH_ACTIVITY: u8 = 12;

    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Pong => Self::PONG,
            Self::ChannelMessageWithSource => Self::CHANNEL_MESSAGE_WITH_SOURCE,
            Self::DeferredChannelMessageWithSource => Self::DEFERRED_CHANNEL_MESSAGE_WITH_SOURCE,
            Self::DeferredUpdateMessage => Self::DEFERRED_UPDATE_MESSAGE,
            Self::UpdateMessage => Self::UPDATE_MESSAGE,
            Self::ApplicationCommandAutocompleteResult => {
                Self::APPLICATION_COMMAND_AUTOCOMPLETE_RESULT
            }
            Self::Modal => Self::MODAL,
            Self::PremiumRequired => Self::PREMIUM_REQUIRED,
            Self::LaunchActivity => Self::LAUNCH_ACTIVITY,
            Self::Unknown(code) => code,
        }
    }

    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<u8> for ResponseKind {
    fn from(value: u8) -> Self {
        match value {
            Self::PONG => Self::Pong,
            Self::CHANNEL_MESSAGE_WITH_SOURCE => Self::ChannelMessageWithSource,
            Self::DEFERRED_CHANNEL_MESSAGE_WITH_SOURCE => Self::DeferredChannelMessageWithSource,
            Self::DEFERRED_UPDATE_MESSAGE => Self::DeferredUpdateMessage,
            Self::UPDATE_MESSAGE => Self::UpdateMessage,
            Self::APPLICATION_COMMAND_AUTOCOMPLETE_RESULT => {
                Self::ApplicationCommandAutocompleteResult
            }
            Self::MODAL => Self::Modal,
            Self::PREMIUM_REQUIRED => Self::PremiumRequired,
            Self::LAUNCH_ACTIVITY => Self::LaunchActivity,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<ResponseKind> for u8 {
    fn from(value: ResponseKind) -> Self {
        value.code()
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::ResponseKind;

    #[rstest]
    #[case(ResponseKind::Pong, 1)]
    #[case(ResponseKind::ChannelMessageWithSource, 4)]
    #[case(ResponseKind::DeferredChannelMessageWithSource, 5)]
    #[case(ResponseKind::DeferredUpdateMessage, 6)]
    #[case(ResponseKind::UpdateMessage, 7)]
    #[case(ResponseKind::ApplicationCommandAutocompleteResult, 8)]
    #[case(ResponseKind::Modal, 9)]
    #[case(ResponseKind::PremiumRequired, 10)]
    #[case(ResponseKind::LaunchActivity, 12)]
    fn known_codes(#[case] kind: ResponseKind, #[case] code: u8) {
        assert_eq!(kind.code(), code);
        assert_eq!(ResponseKind::from(code), kind);
        assert!(kind.is_known());
        assert_eq!(serde_json::to_string(&kind).unwrap(), code.to_string());
    }

    #[rstest]
    #[case(0)]
    #[case(2)]
    #[case(3)]
    #[case(11)]
    #[case(u8::MAX)]
    fn unrecognised_codes_are_preserved(#[case] code: u8) {
        let kind = ResponseKind::from(code);
        assert_eq!(kind, ResponseKind::Unknown(code));
        assert!(!kind.is_known());
        assert_eq!(u8::from(kind), code);

        let parsed = serde_json::from_str::<ResponseKind>(&code.to_string()).unwrap();
        assert_eq!(parsed, kind);
    }
}
