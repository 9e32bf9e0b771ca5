use twilight_model::application::{
    command::{CommandOptionChoice, CommandOptionChoiceValue, CommandOptionType},
    interaction::InteractionType,
};
use vesper_ext::{
    as_chars::AsChars,
    bounds::{CheckBounds, OutOfBounds},
    pretty::truncate::PrettyTruncator,
};

use crate::{
    core::{
        konst::limits,
        model::{AutocompleteData, MessageData, MessageEdit, ModalData, ResponseKind},
    },
    error::core::ValidationError,
};

type ValidationResult = Result<(), ValidationError>;

fn preview(value: &str) -> String {
    value.pretty_truncate(limits::ERROR_PREVIEW_LENGTH).into_owned()
}

fn count_at_most(
    count: usize,
    max: usize,
    error: impl FnOnce(usize, usize) -> ValidationError,
) -> ValidationResult {
    count
        .check_at_most(max)
        .map(|_| ())
        .map_err(|OutOfBounds { value, max, .. }| error(value, max))
}

fn message_parts(
    content: Option<&str>,
    embeds: usize,
    rows: usize,
    attachments: usize,
) -> ValidationResult {
    if let Some(content) = content {
        count_at_most(
            content.char_len(),
            limits::MESSAGE_CONTENT_LENGTH_MAX,
            |len, max| ValidationError::ContentLength { len, max },
        )?;
    }
    count_at_most(embeds, limits::MESSAGE_EMBEDS_MAX, |count, max| {
        ValidationError::EmbedCount { count, max }
    })?;
    count_at_most(rows, limits::MESSAGE_ACTION_ROWS_MAX, |count, max| {
        ValidationError::ActionRowCount { count, max }
    })?;
    count_at_most(attachments, limits::MESSAGE_ATTACHMENTS_MAX, |count, max| {
        ValidationError::AttachmentCount { count, max }
    })
}

/// Bounds shared by replies, updates and new followups.
///
/// # Errors
/// if the content, embeds, action rows or attachments exceed their limits
pub fn message(data: &MessageData) -> ValidationResult {
    message_parts(
        data.content.as_deref(),
        data.embeds.as_ref().map_or(0, Vec::len),
        data.components.as_ref().map_or(0, Vec::len),
        data.files().len(),
    )
}

/// Like [`message`], but the message must also have something to show.
///
/// # Errors
/// if [`message`] fails, or the message is empty
pub fn new_message(data: &MessageData) -> ValidationResult {
    message(data)?;
    if !data.has_body() {
        return Err(ValidationError::EmptyMessage);
    }
    Ok(())
}

/// # Errors
/// if any field being set exceeds its limit
pub fn message_edit(edit: &MessageEdit) -> ValidationResult {
    message_parts(
        edit.content.as_ref().and_then(Option::as_deref),
        edit.embeds.as_ref().and_then(Option::as_ref).map_or(0, Vec::len),
        edit.components
            .as_ref()
            .and_then(Option::as_ref)
            .map_or(0, Vec::len),
        edit.files().len(),
    )
}

fn choice_name(name: &str) -> ValidationResult {
    name.char_len()
        .check_bounds(limits::CHOICE_NAME_LENGTH_MIN, limits::CHOICE_NAME_LENGTH_MAX)
        .map(|_| ())
        .map_err(|OutOfBounds { value, min, max }| ValidationError::ChoiceNameLength {
            name: preview(name),
            len: value,
            min,
            max,
        })
}

const fn value_kind(value: &CommandOptionChoiceValue) -> &'static str {
    match value {
        CommandOptionChoiceValue::String(_) => "string",
        CommandOptionChoiceValue::Integer(_) => "integer",
        CommandOptionChoiceValue::Number(_) => "number",
    }
}

#[expect(clippy::cast_precision_loss)]
fn number_in_range(value: f64) -> ValidationResult {
    let (min, max) = (limits::MIN_NEGATIVE_NUMBER, limits::MAX_POSITIVE_NUMBER);
    value
        .check_bounds(min as f64, max as f64)
        .map(|_| ())
        .map_err(|_| ValidationError::ChoiceValueRange { value, min, max })
}

#[expect(clippy::cast_precision_loss)]
fn integer_in_range(value: i64) -> ValidationResult {
    let (min, max) = (limits::MIN_NEGATIVE_NUMBER, limits::MAX_POSITIVE_NUMBER);
    value
        .check_bounds(min, max)
        .map(|_| ())
        .map_err(|_| ValidationError::ChoiceValueRange {
            value: value as f64,
            min,
            max,
        })
}

fn choice_value(
    option_type: CommandOptionType,
    value: &CommandOptionChoiceValue,
) -> ValidationResult {
    let mismatch = || ValidationError::ChoiceTypeMismatch {
        expected: option_type,
        found: value_kind(value),
    };

    match (option_type, value) {
        (CommandOptionType::String, CommandOptionChoiceValue::String(s)) => s
            .char_len()
            .check_bounds(limits::CHOICE_VALUE_LENGTH_MIN, limits::CHOICE_VALUE_LENGTH_MAX)
            .map(|_| ())
            .map_err(|OutOfBounds { value, min, max }| ValidationError::ChoiceValueLength {
                value: preview(s),
                len: value,
                min,
                max,
            }),
        (CommandOptionType::Integer, CommandOptionChoiceValue::Integer(i))
        | (CommandOptionType::Number, CommandOptionChoiceValue::Integer(i)) => integer_in_range(*i),
        (CommandOptionType::Number, CommandOptionChoiceValue::Number(n)) => number_in_range(*n),
        (CommandOptionType::String | CommandOptionType::Integer | CommandOptionType::Number, _) => {
            Err(mismatch())
        }
        (other, _) => Err(ValidationError::UnsupportedOptionType(other)),
    }
}

/// # Errors
/// if there are too many choices, or any choice has a bad name or a value
/// that disagrees with `option_type`
pub fn choices(
    option_type: CommandOptionType,
    choices: &[CommandOptionChoice],
) -> ValidationResult {
    count_at_most(choices.len(), limits::COMMAND_CHOICES_MAX, |count, max| {
        ValidationError::ChoiceCount { count, max }
    })?;
    choices.iter().try_for_each(|choice| {
        choice_name(&choice.name)?;
        choice_value(option_type, &choice.value)
    })
}

/// # Errors
/// see [`choices`]
#[inline]
pub fn autocomplete(data: &AutocompleteData) -> ValidationResult {
    choices(data.option_type, &data.choices)
}

/// # Errors
/// if the custom id, title or number of rows is out of bounds
pub fn modal(data: &ModalData) -> ValidationResult {
    data.custom_id
        .char_len()
        .check_bounds(limits::MODAL_CUSTOM_ID_LENGTH_MIN, limits::MODAL_CUSTOM_ID_LENGTH_MAX)
        .map_err(|OutOfBounds { value, min, max }| ValidationError::ModalCustomIdLength {
            len: value,
            min,
            max,
        })?;
    data.title
        .char_len()
        .check_bounds(limits::MODAL_TITLE_LENGTH_MIN, limits::MODAL_TITLE_LENGTH_MAX)
        .map_err(|OutOfBounds { value, min, max }| ValidationError::ModalTitleLength {
            len: value,
            min,
            max,
        })?;
    data.components
        .len()
        .check_bounds(limits::MODAL_COMPONENTS_MIN, limits::MODAL_COMPONENTS_MAX)
        .map(|_| ())
        .map_err(|OutOfBounds { value, min, max }| ValidationError::ModalComponentCount {
            count: value,
            min,
            max,
        })
}

/// Whether a response of `kind` may acknowledge an interaction of type
/// `interaction`.
///
/// # Errors
/// if `kind` is unknown or not accepted for `interaction`
pub fn compatibility(kind: ResponseKind, interaction: InteractionType) -> ValidationResult {
    let accepted = match kind {
        ResponseKind::Unknown(_) => return Err(ValidationError::UnknownKind(kind)),
        ResponseKind::Pong => interaction == InteractionType::Ping,
        _ if interaction == InteractionType::Ping => false,
        ResponseKind::ApplicationCommandAutocompleteResult => {
            interaction == InteractionType::ApplicationCommandAutocomplete
        }
        _ if interaction == InteractionType::ApplicationCommandAutocomplete => false,
        ResponseKind::UpdateMessage | ResponseKind::DeferredUpdateMessage => matches!(
            interaction,
            InteractionType::MessageComponent | InteractionType::ModalSubmit
        ),
        ResponseKind::Modal => interaction != InteractionType::ModalSubmit,
        ResponseKind::ChannelMessageWithSource
        | ResponseKind::DeferredChannelMessageWithSource
        | ResponseKind::PremiumRequired
        | ResponseKind::LaunchActivity => true,
    };

    if accepted {
        return Ok(());
    }
    Err(ValidationError::IncompatibleKind { kind, interaction })
}
