use std::{fmt::Display, sync::Arc};

use futures::{FutureExt, future::BoxFuture};
use serde::de::DeserializeOwned;
use tracing::Instrument;
use twilight_model::id::{
    Id,
    marker::{ApplicationMarker, InteractionMarker, MessageMarker},
};

use crate::{
    core::config::Config,
    error::core::TransportError,
};

/// The message a token-scoped request acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageTarget {
    Original,
    Followup(Id<MessageMarker>),
}

impl Display for MessageTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Original => f.write_str("@original"),
            Self::Followup(message_id) => message_id.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(value: Method) -> Self {
        match value {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Patch => Self::PATCH,
            Method::Delete => Self::DELETE,
        }
    }
}

/// Every endpoint this crate talks to.
///
/// Only the initial callback is addressed by the interaction id; everything
/// after it is addressed by the application id and the interaction token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    InteractionCallback {
        interaction_id: Id<InteractionMarker>,
        token: Box<str>,
    },
    CreateFollowup {
        application_id: Id<ApplicationMarker>,
        token: Box<str>,
    },
    GetMessage {
        application_id: Id<ApplicationMarker>,
        token: Box<str>,
        target: MessageTarget,
    },
    UpdateMessage {
        application_id: Id<ApplicationMarker>,
        token: Box<str>,
        target: MessageTarget,
    },
    DeleteMessage {
        application_id: Id<ApplicationMarker>,
        token: Box<str>,
        target: MessageTarget,
    },
}

impl Route {
    #[must_use]
    pub const fn method(&self) -> Method {
        match self {
            Self::InteractionCallback { .. } | Self::CreateFollowup { .. } => Method::Post,
            Self::GetMessage { .. } => Method::Get,
            Self::UpdateMessage { .. } => Method::Patch,
            Self::DeleteMessage { .. } => Method::Delete,
        }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::InteractionCallback { token, .. }
            | Self::CreateFollowup { token, .. }
            | Self::GetMessage { token, .. }
            | Self::UpdateMessage { token, .. }
            | Self::DeleteMessage { token, .. } => token,
        }
    }

    #[must_use]
    pub const fn is_callback(&self) -> bool {
        matches!(self, Self::InteractionCallback { .. })
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::InteractionCallback {
                interaction_id,
                token,
            } => format!("/interactions/{interaction_id}/{token}/callback"),
            Self::CreateFollowup {
                application_id,
                token,
            } => format!("/webhooks/{application_id}/{token}"),
            Self::GetMessage {
                application_id,
                token,
                target,
            }
            | Self::UpdateMessage {
                application_id,
                token,
                target,
            }
            | Self::DeleteMessage {
                application_id,
                token,
                target,
            } => format!("/webhooks/{application_id}/{token}/messages/{target}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Empty,
    Json(Vec<u8>),
    Multipart { boundary: String, bytes: Vec<u8> },
}

impl Body {
    #[must_use]
    pub fn content_type(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Json(_) => Some(String::from("application/json")),
            Self::Multipart { boundary, .. } => {
                Some(format!("multipart/form-data; boundary={boundary}"))
            }
        }
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Empty => &[],
            Self::Json(bytes) | Self::Multipart { bytes, .. } => bytes,
        }
    }

    fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Self::Empty => None,
            Self::Json(bytes) | Self::Multipart { bytes, .. } => Some(bytes),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub route: Route,
    pub body: Body,
}

impl Request {
    #[must_use]
    pub const fn new(route: Route, body: Body) -> Self {
        Self { route, body }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    #[must_use]
    pub const fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Deserialises the body, e.g. into a
    /// [`Message`](twilight_model::channel::Message).
    ///
    /// # Errors
    /// if the body is not valid JSON for `T`
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// The outbound HTTP collaborator.
///
/// Implementations own rate limiting and retries; the returned future must
/// not borrow `self`.
pub trait Transport: Send + Sync + 'static {
    fn execute(&self, request: Request) -> BoxFuture<'static, Result<Response, TransportError>>;
}

/// The default [`Transport`], backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    api_base: Arc<str>,
}

impl Client {
    /// # Errors
    /// if the underlying TLS backend could not be initialised
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').into(),
        })
    }

    fn url(&self, route: &Route) -> String {
        format!("{}{}", self.api_base, route.path())
    }
}

impl Transport for Client {
    fn execute(&self, request: Request) -> BoxFuture<'static, Result<Response, TransportError>> {
        let Request { route, body } = request;
        let method = route.method();
        let url = self.url(&route);
        let content_type = body.content_type();

        let mut builder = self.http.request(method.into(), url);
        if let Some(content_type) = content_type {
            builder = builder.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        if let Some(bytes) = body.into_bytes() {
            builder = builder.body(bytes);
        }

        let span = tracing::debug_span!("request", ?method, callback = route.is_callback());
        async move {
            tracing::trace!("sending request");
            let response = builder.send().await?;
            let status = response.status();
            let body = response.bytes().await?.to_vec();

            if !status.is_success() {
                tracing::debug!(%status, "request failed");
                return Err(TransportError::Status {
                    status: status.as_u16(),
                    body: String::from_utf8_lossy(&body).into_owned(),
                });
            }

            tracing::trace!(%status, "request succeeded");
            Ok(Response::new(status.as_u16(), body))
        }
        .instrument(span)
        .boxed()
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;
    use twilight_model::id::Id;

    use super::{Body, Method, MessageTarget, Route};

    const TOKEN: &str = "aW50ZXJhY3Rpb24";

    #[rstest]
    #[case(
        Route::InteractionCallback { interaction_id: Id::new(7), token: TOKEN.into() },
        Method::Post,
        "/interactions/7/aW50ZXJhY3Rpb24/callback",
    )]
    #[case(
        Route::CreateFollowup { application_id: Id::new(3), token: TOKEN.into() },
        Method::Post,
        "/webhooks/3/aW50ZXJhY3Rpb24",
    )]
    #[case(
        Route::GetMessage {
            application_id: Id::new(3),
            token: TOKEN.into(),
            target: MessageTarget::Original,
        },
        Method::Get,
        "/webhooks/3/aW50ZXJhY3Rpb24/messages/@original",
    )]
    #[case(
        Route::UpdateMessage {
            application_id: Id::new(3),
            token: TOKEN.into(),
            target: MessageTarget::Followup(Id::new(99)),
        },
        Method::Patch,
        "/webhooks/3/aW50ZXJhY3Rpb24/messages/99",
    )]
    #[case(
        Route::DeleteMessage {
            application_id: Id::new(3),
            token: TOKEN.into(),
            target: MessageTarget::Original,
        },
        Method::Delete,
        "/webhooks/3/aW50ZXJhY3Rpb24/messages/@original",
    )]
    fn route_method_and_path(
        #[case] route: Route,
        #[case] method: Method,
        #[case] path: &str,
    ) {
        assert_eq!(route.method(), method);
        assert_eq!(route.path(), path);
        assert_eq!(route.token(), TOKEN);
    }

    #[rstest]
    #[case(Body::Empty, None)]
    #[case(Body::Json(b"{}".to_vec()), Some("application/json"))]
    #[case(
        Body::Multipart { boundary: String::from("b0"), bytes: Vec::new() },
        Some("multipart/form-data; boundary=b0"),
    )]
    fn body_content_type(#[case] body: Body, #[case] expected: Option<&str>) {
        assert_eq!(body.content_type().as_deref(), expected);
    }
}
