use std::time::{Duration, SystemTime, UNIX_EPOCH};

use twilight_model::{
    application::interaction::InteractionType,
    id::{
        Id,
        marker::{ApplicationMarker, InteractionMarker},
    },
};

use crate::core::konst;

/// An inbound interaction, as handed over by the event-delivery layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    pub id: Id<InteractionMarker>,
    pub application_id: Id<ApplicationMarker>,
    pub token: Box<str>,
    pub kind: InteractionType,
    pub data: Option<serde_json::Value>,
}

impl Interaction {
    pub fn new(
        id: Id<InteractionMarker>,
        application_id: Id<ApplicationMarker>,
        token: impl Into<Box<str>>,
        kind: InteractionType,
    ) -> Self {
        Self {
            id,
            application_id,
            token: token.into(),
            kind,
            data: None,
        }
    }

    /// When the interaction was created, read off its snowflake id.
    #[must_use]
    pub fn created_at(&self) -> SystemTime {
        let ms = (self.id.get() >> konst::discord::SNOWFLAKE_TIMESTAMP_SHIFT)
            + konst::discord::EPOCH_MS;
        UNIX_EPOCH + Duration::from_millis(ms)
    }

    /// Whether the token has outlived its lifetime at `now`. The remote side
    /// is the authority on this; the answer is informational.
    #[must_use]
    pub fn is_expired_at(&self, now: SystemTime) -> bool {
        now.duration_since(self.created_at())
            .is_ok_and(|age| age >= konst::gate::TOKEN_LIFETIME)
    }
}

impl From<&twilight_model::application::interaction::Interaction> for Interaction {
    fn from(value: &twilight_model::application::interaction::Interaction) -> Self {
        Self {
            id: value.id,
            application_id: value.application_id,
            token: value.token.as_str().into(),
            kind: value.kind,
            data: value
                .data
                .as_ref()
                .and_then(|data| serde_json::to_value(data).ok()),
        }
    }
}

#[cfg(test)]
mod test {
    use std::time::{Duration, UNIX_EPOCH};

    use rstest::rstest;
    use twilight_model::{application::interaction::InteractionType, id::Id};

    use super::Interaction;
    use crate::core::konst;

    fn with_timestamp(ms_since_platform_epoch: u64) -> Interaction {
        let id = (ms_since_platform_epoch << konst::discord::SNOWFLAKE_TIMESTAMP_SHIFT) | 0b1010;
        Interaction::new(
            Id::new(id),
            Id::new(1),
            "token",
            InteractionType::ApplicationCommand,
        )
    }

    #[test]
    fn created_at_reads_the_snowflake() {
        let interaction = with_timestamp(1_000);
        assert_eq!(
            interaction.created_at(),
            UNIX_EPOCH + Duration::from_millis(konst::discord::EPOCH_MS + 1_000)
        );
    }

    #[rstest]
    #[case(Duration::ZERO, false)]
    #[case(Duration::from_secs(14 * 60 + 59), false)]
    #[case(konst::gate::TOKEN_LIFETIME, true)]
    #[case(Duration::from_secs(3600), true)]
    fn expiry_follows_token_lifetime(#[case] age: Duration, #[case] expired: bool) {
        let interaction = with_timestamp(5_000);
        let now = interaction.created_at() + age;
        assert_eq!(interaction.is_expired_at(now), expired);
    }

    #[test]
    fn clock_skew_is_not_expiry() {
        let interaction = with_timestamp(5_000);
        let before = interaction.created_at() - Duration::from_secs(1);
        assert!(!interaction.is_expired_at(before));
    }
}
