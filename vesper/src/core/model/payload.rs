//! Request body encoding.
//!
//! A document is serialised exactly once. Without attachments the bytes are
//! the body; with attachments the very same bytes become the `payload_json`
//! part, so both encodings carry identical JSON.

use std::hash::{DefaultHasher, Hash, Hasher};

use serde::Serialize;
use twilight_model::http::attachment::Attachment;

use super::{ResponseData, ResponseKind};
use crate::{core::http::Body, error::core::EncodeError};

#[derive(Serialize)]
struct Envelope<'a> {
    #[serde(rename = "type")]
    kind: ResponseKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a ResponseData>,
}

/// Encodes an initial response as `{"type": <code>, "data": <data>}`.
///
/// # Errors
/// if the document fails to serialise
pub fn encode_callback(
    kind: ResponseKind,
    data: Option<&ResponseData>,
    files: &[Attachment],
) -> Result<Body, EncodeError> {
    encode_document(&Envelope { kind, data }, files)
}

/// Encodes any document, switching to multipart when there are files.
///
/// # Errors
/// if the document fails to serialise
pub fn encode_document<T: Serialize + ?Sized>(
    document: &T,
    files: &[Attachment],
) -> Result<Body, EncodeError> {
    let json = serde_json::to_vec(document)?;
    if files.is_empty() {
        return Ok(Body::Json(json));
    }

    let boundary = boundary_for(&json, files);
    let bytes = Multipart::new(&boundary).build(&json, files);
    Ok(Body::Multipart { boundary, bytes })
}

/// Picks a boundary derived from the content, re-salting until it does not
/// occur anywhere inside the parts.
fn boundary_for(json: &[u8], files: &[Attachment]) -> String {
    let mut salt = 0_u64;
    loop {
        let mut hasher = DefaultHasher::new();
        json.hash(&mut hasher);
        for file in files {
            file.id.hash(&mut hasher);
            file.filename.hash(&mut hasher);
            file.file.hash(&mut hasher);
        }
        salt.hash(&mut hasher);

        let boundary = format!("vesper-boundary-{:016x}", hasher.finish());
        let needle = boundary.as_bytes();
        let collides = contains(json, needle) || files.iter().any(|f| contains(&f.file, needle));
        if !collides {
            return boundary;
        }
        salt += 1;
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn escape_filename(filename: &str) -> String {
    let mut escaped = String::with_capacity(filename.len());
    for c in filename.chars() {
        match c {
            '"' => escaped.push_str("%22"),
            '\r' => escaped.push_str("%0D"),
            '\n' => escaped.push_str("%0A"),
            '\\' => escaped.push_str("\\\\"),
            c => escaped.push(c),
        }
    }
    escaped
}

struct Multipart<'a> {
    boundary: &'a str,
    buf: Vec<u8>,
}

impl<'a> Multipart<'a> {
    const fn new(boundary: &'a str) -> Self {
        Self {
            boundary,
            buf: Vec::new(),
        }
    }

    fn part(&mut self, disposition: &str, content_type: &str, body: &[u8]) {
        self.buf.extend_from_slice(b"--");
        self.buf.extend_from_slice(self.boundary.as_bytes());
        self.buf.extend_from_slice(b"\r\nContent-Disposition: form-data; ");
        self.buf.extend_from_slice(disposition.as_bytes());
        self.buf.extend_from_slice(b"\r\nContent-Type: ");
        self.buf.extend_from_slice(content_type.as_bytes());
        self.buf.extend_from_slice(b"\r\n\r\n");
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\r\n");
    }

    fn build(mut self, json: &[u8], files: &[Attachment]) -> Vec<u8> {
        for file in files {
            let disposition = format!(
                r#"name="files[{}]"; filename="{}""#,
                file.id,
                escape_filename(&file.filename)
            );
            self.part(&disposition, "application/octet-stream", &file.file);
        }
        self.part(r#"name="payload_json""#, "application/json", json);

        self.buf.extend_from_slice(b"--");
        self.buf.extend_from_slice(self.boundary.as_bytes());
        self.buf.extend_from_slice(b"--\r\n");
        self.buf
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;
    use twilight_model::http::attachment::Attachment;

    use super::{contains, encode_callback, encode_document, escape_filename};
    use crate::core::{
        http::Body,
        model::{MessageData, ResponseData, ResponseKind},
    };

    fn file(name: &str, bytes: &[u8], id: u64) -> Attachment {
        Attachment::from_bytes(String::from(name), bytes.to_vec(), id)
    }

    fn data_of(json: &[u8]) -> String {
        let value = serde_json::from_slice::<serde_json::Value>(json).unwrap();
        serde_json::to_string(&value["data"]).unwrap()
    }

    /// Splits a multipart body into `(headers, body)` pairs.
    fn parts(boundary: &str, bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        let delimiter = format!("--{boundary}");
        let closing = format!("--{boundary}--\r\n");
        assert!(text.ends_with(&closing));

        text[..text.len() - closing.len()]
            .split(&delimiter)
            .filter(|p| !p.is_empty())
            .map(|p| {
                let p = p.strip_prefix("\r\n").unwrap();
                let (headers, body) = p.split_once("\r\n\r\n").unwrap();
                let body = body.strip_suffix("\r\n").unwrap();
                (String::from(headers), body.as_bytes().to_vec())
            })
            .collect()
    }

    #[test]
    fn reply_without_attachments_is_plain_json() {
        let data = MessageData::content("hi").to_response_data();
        let body =
            encode_callback(ResponseKind::ChannelMessageWithSource, Some(&data), &[]).unwrap();

        assert_eq!(body, Body::Json(br#"{"type":4,"data":{"content":"hi"}}"#.to_vec()));
    }

    #[rstest]
    #[case(ResponseKind::Pong, r#"{"type":1}"#)]
    #[case(ResponseKind::DeferredUpdateMessage, r#"{"type":6}"#)]
    #[case(ResponseKind::LaunchActivity, r#"{"type":12}"#)]
    fn data_is_omitted_when_absent(#[case] kind: ResponseKind, #[case] expected: &str) {
        let body = encode_callback(kind, None, &[]).unwrap();
        assert_eq!(body.bytes(), expected.as_bytes());
    }

    #[test]
    fn data_bytes_are_identical_in_both_encodings() {
        let mut message = MessageData::content("the same content");
        message.tts = Some(false);
        let plain = encode_callback(
            ResponseKind::ChannelMessageWithSource,
            Some(&message.to_response_data()),
            &[],
        )
        .unwrap();

        message.attachments = Some(vec![file("log.txt", b"line one\nline two", 0)]);
        let multipart = encode_callback(
            ResponseKind::ChannelMessageWithSource,
            Some(&message.to_response_data()),
            message.files(),
        )
        .unwrap();

        let Body::Json(plain) = plain else {
            panic!("expected a json body");
        };
        let Body::Multipart { boundary, bytes } = multipart else {
            panic!("expected a multipart body");
        };
        let parts = parts(&boundary, &bytes);
        let (_, payload_json) = parts.last().unwrap();

        assert_eq!(payload_json, &plain);
        assert_eq!(data_of(payload_json), data_of(&plain));
    }

    #[test]
    fn multipart_emits_files_in_order_then_payload_json() {
        let files = [file("a.png", b"AAAA", 7), file("b.png", b"BB", 3)];
        let body = encode_document(&ResponseData::default(), &files).unwrap();

        let Body::Multipart { boundary, bytes } = &body else {
            panic!("expected a multipart body");
        };
        assert_eq!(
            body.content_type().unwrap(),
            format!("multipart/form-data; boundary={boundary}")
        );

        let parts = parts(boundary, bytes);
        assert_eq!(parts.len(), 3);
        assert!(parts[0].0.contains(r#"name="files[7]"; filename="a.png""#));
        assert!(parts[0].0.contains("application/octet-stream"));
        assert_eq!(parts[0].1, b"AAAA");
        assert!(parts[1].0.contains(r#"name="files[3]"; filename="b.png""#));
        assert_eq!(parts[1].1, b"BB");
        assert!(parts[2].0.contains(r#"name="payload_json""#));
        assert!(parts[2].0.contains("application/json"));
        assert_eq!(parts[2].1, b"{}");
    }

    #[test]
    fn boundary_is_deterministic() {
        let files = [file("a.txt", b"abc", 0)];
        let first = encode_document(&ResponseData::default(), &files).unwrap();
        let second = encode_document(&ResponseData::default(), &files).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn boundary_never_occurs_in_content() {
        let files = [file("a.txt", b"abc", 0)];
        let Body::Multipart { boundary, .. } =
            encode_document(&ResponseData::default(), &files).unwrap()
        else {
            panic!("expected a multipart body");
        };

        let poisoned = [file("a.txt", boundary.as_bytes(), 0)];
        let Body::Multipart {
            boundary: other, ..
        } = encode_document(&ResponseData::default(), &poisoned).unwrap()
        else {
            panic!("expected a multipart body");
        };
        assert!(!contains(&poisoned[0].file, other.as_bytes()));
    }

    #[rstest]
    #[case("plain.txt", "plain.txt")]
    #[case(r#"quote".txt"#, "quote%22.txt")]
    #[case("line\r\nbreak", "line%0D%0Abreak")]
    fn filenames_are_escaped(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_filename(input), expected);
    }
}
