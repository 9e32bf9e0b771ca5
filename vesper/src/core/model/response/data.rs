use serde::Serialize;
use twilight_model::{
    application::command::{CommandOptionChoice, CommandOptionType},
    channel::message::{AllowedMentions, Component, Embed, MessageFlags},
    http::attachment::Attachment,
};

/// The body of a message-bearing response: a reply, an update or a followup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageData {
    pub allowed_mentions: Option<AllowedMentions>,
    pub attachments: Option<Vec<Attachment>>,
    pub components: Option<Vec<Component>>,
    pub content: Option<String>,
    pub embeds: Option<Vec<Embed>>,
    /// The supported flags are [`MessageFlags::SUPPRESS_EMBEDS`] and
    /// [`MessageFlags::EPHEMERAL`].
    pub flags: Option<MessageFlags>,
    pub tts: Option<bool>,
}

impl MessageData {
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn files(&self) -> &[Attachment] {
        self.attachments.as_deref().unwrap_or_default()
    }

    /// Whether any of content, embeds, components or attachments is present.
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.is_empty())
            || self.embeds.as_deref().is_some_and(|e| !e.is_empty())
            || self.components.as_deref().is_some_and(|c| !c.is_empty())
            || !self.files().is_empty()
    }

    #[must_use]
    pub fn to_response_data(&self) -> ResponseData {
        ResponseData {
            allowed_mentions: self.allowed_mentions.clone(),
            attachments: AttachmentMetadata::collect(self.files()),
            components: self.components.clone(),
            content: self.content.clone(),
            embeds: self.embeds.clone(),
            flags: self.flags,
            tts: self.tts,
            ..ResponseData::default()
        }
    }
}

/// Changes to an existing message.
///
/// The outer [`None`] leaves a field untouched, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageEdit {
    pub allowed_mentions: Option<AllowedMentions>,
    pub attachments: Option<Vec<Attachment>>,
    pub components: Option<Option<Vec<Component>>>,
    pub content: Option<Option<String>>,
    pub embeds: Option<Option<Vec<Embed>>>,
}

impl MessageEdit {
    #[must_use]
    pub fn files(&self) -> &[Attachment] {
        self.attachments.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn to_edit_data(&self) -> EditData {
        EditData {
            allowed_mentions: self.allowed_mentions.clone(),
            attachments: AttachmentMetadata::collect(self.files()),
            components: self.components.clone(),
            content: self.content.clone(),
            embeds: self.embeds.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AutocompleteData {
    /// The type of the option being completed. Every choice value must agree
    /// with it.
    pub option_type: CommandOptionType,
    pub choices: Vec<CommandOptionChoice>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalData {
    pub custom_id: String,
    pub title: String,
    pub components: Vec<Component>,
}

/// What the JSON document says about an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentMetadata {
    pub id: u64,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AttachmentMetadata {
    /// Metadata is only sent when it says more than the multipart part names
    /// already do.
    fn collect(attachments: &[Attachment]) -> Option<Vec<Self>> {
        attachments
            .iter()
            .any(|a| a.description.is_some())
            .then(|| attachments.iter().map(Self::from).collect())
    }
}

impl From<&Attachment> for AttachmentMetadata {
    fn from(value: &Attachment) -> Self {
        Self {
            id: value.id,
            filename: value.filename.clone(),
            description: value.description.clone(),
        }
    }
}

/// The `data` document of an initial response, also used verbatim as the
/// body of a new followup.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponseData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<AttachmentMetadata>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<CommandOptionChoice>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Embed>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts: Option<bool>,
}

/// The body of a message edit. A cleared field is sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<AttachmentMetadata>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Option<Vec<Component>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Option<Vec<Embed>>>,
}

#[cfg(test)]
mod test {
    use twilight_model::http::attachment::Attachment;

    use super::{MessageData, MessageEdit};

    #[test]
    fn attachment_metadata_needs_a_description() {
        let mut data = MessageData::content("hi");
        data.attachments = Some(vec![Attachment::from_bytes(
            String::from("a.txt"),
            b"a".to_vec(),
            0,
        )]);
        assert_eq!(data.to_response_data().attachments, None);

        let mut described = Attachment::from_bytes(String::from("b.txt"), b"b".to_vec(), 1);
        described.description = Some(String::from("second file"));
        data.attachments.get_or_insert_with(Vec::new).push(described);

        let metadata = data.to_response_data().attachments.unwrap();
        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata[0].filename, "a.txt");
        assert_eq!(metadata[1].description.as_deref(), Some("second file"));
    }

    #[test]
    fn has_body_ignores_empty_fields() {
        assert!(!MessageData::default().has_body());
        assert!(!MessageData::content("").has_body());
        assert!(MessageData::content("x").has_body());
    }

    #[test]
    fn cleared_edit_fields_serialise_as_null() {
        let edit = MessageEdit {
            content: Some(None),
            embeds: Some(Some(Vec::new())),
            ..MessageEdit::default()
        };
        let json = serde_json::to_string(&edit.to_edit_data()).unwrap();
        assert_eq!(json, r#"{"content":null,"embeds":[]}"#);
    }
}
