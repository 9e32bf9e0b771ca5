use std::{
    fmt::Debug,
    pin::Pin,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    task::{Context, Poll},
    time::{Duration, SystemTime},
};

use futures::{
    FutureExt,
    future::{self, BoxFuture},
};
use tokio::sync::oneshot;
use tracing::Instrument;
use twilight_model::{
    application::command::CommandOptionType,
    channel::{Message as ChannelMessage, message::MessageFlags},
    id::{Id, marker::MessageMarker},
};

use super::{
    AckGate, AutocompleteBuilder, CallbackAction, FollowupAction, FollowupBuilder, GateStatus,
    Gated, Interaction, MessageBuilder, MessageKind, ModalBuilder, UpdateMessageBuilder,
};
use crate::{
    core::{
        config::Config,
        http::{MessageTarget, Request, Response, Route, Transport},
        konst,
        timer::{Timer, TokioTimer},
    },
    error::core::{AckError, FollowupError, FollowupResult, RespondError, RespondResult},
};

struct HookInner {
    interaction: Interaction,
    gate: Arc<AckGate>,
    transport: Arc<dyn Transport>,
    ephemeral: AtomicBool,
}

/// The handle through which an interaction is acknowledged and followed up.
///
/// Cloning a hook is cheap; every clone shares the same gate.
#[derive(Clone)]
pub struct Hook {
    inner: Arc<HookInner>,
}

impl Hook {
    /// Creates a hook whose acknowledgment times out after
    /// [`ACK_TIMEOUT`](konst::gate::ACK_TIMEOUT).
    ///
    /// # Panics
    /// when called outside of a tokio runtime
    pub fn new(interaction: Interaction, transport: Arc<dyn Transport>) -> Self {
        Self::with_timer(interaction, transport, &TokioTimer, konst::gate::ACK_TIMEOUT)
    }

    /// # Panics
    /// when called outside of a tokio runtime
    pub fn from_config(
        interaction: Interaction,
        transport: Arc<dyn Transport>,
        config: &Config,
    ) -> Self {
        Self::with_timer(interaction, transport, &TokioTimer, config.ack_timeout)
    }

    pub fn with_timer(
        interaction: Interaction,
        transport: Arc<dyn Transport>,
        timer: &dyn Timer,
        timeout: Duration,
    ) -> Self {
        tracing::trace!(interaction_id = %interaction.id, kind = ?interaction.kind, "new hook");
        Self {
            inner: Arc::new(HookInner {
                interaction,
                gate: AckGate::arm(timeout, timer),
                transport,
                ephemeral: AtomicBool::new(false),
            }),
        }
    }

    #[must_use]
    pub fn interaction(&self) -> &Interaction {
        &self.inner.interaction
    }

    #[must_use]
    pub fn gate(&self) -> &Arc<AckGate> {
        &self.inner.gate
    }

    #[must_use]
    pub fn is_acknowledged(&self) -> bool {
        self.inner.gate.is_acknowledged()
    }

    #[must_use]
    pub fn status(&self) -> GateStatus {
        self.inner.gate.status()
    }

    /// Whether the interaction token has outlived its lifetime. Only
    /// informational: the remote side decides.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.inner.interaction.is_expired_at(SystemTime::now())
    }

    /// Makes replies, deferrals and followups built from this hook ephemeral
    /// unless they set their own flags.
    pub fn set_ephemeral(&self, ephemeral: bool) {
        self.inner.ephemeral.store(ephemeral, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_ephemeral(&self) -> bool {
        self.inner.ephemeral.load(Ordering::Relaxed)
    }

    pub(super) fn default_flags(&self) -> Option<MessageFlags> {
        self.is_ephemeral().then_some(MessageFlags::EPHEMERAL)
    }

    /// Acknowledges the interaction with `action`.
    ///
    /// Validation, encoding and the claim on the acknowledgment all happen
    /// before this returns, so a rejected action never reaches the transport.
    /// Only the request itself is left to the returned future, which resolves
    /// to this hook so that followups can be chained.
    pub fn submit(&self, action: CallbackAction) -> BoxFuture<'static, RespondResult<Self>> {
        let kind = action.kind();
        let span = tracing::debug_span!(
            "respond",
            interaction_id = %self.inner.interaction.id,
            ?kind,
        );

        let request = match span.in_scope(|| self.prepare(&action)) {
            Ok(request) => request,
            Err(e) => {
                span.in_scope(|| tracing::debug!(error = %e, "rejected acknowledgment"));
                return future::ready(Err(e)).boxed();
            }
        };

        let hook = self.clone();
        async move { hook.acknowledge(request).await }
            .instrument(span)
            .boxed()
    }

    fn prepare(&self, action: &CallbackAction) -> RespondResult<Request> {
        let gate = &self.inner.gate;
        let interaction = &self.inner.interaction;

        if gate.is_acknowledged() {
            return Err(RespondError::AlreadyAcknowledged);
        }
        action.validate(interaction.kind)?;
        let body = action.encode()?;
        if let Some(cause) = gate.failure() {
            return Err(cause.into());
        }
        if gate.try_ack() {
            return Err(RespondError::AlreadyAcknowledged);
        }

        let route = Route::InteractionCallback {
            interaction_id: interaction.id,
            token: interaction.token.clone(),
        };
        Ok(Request::new(route, body))
    }

    async fn acknowledge(self, request: Request) -> RespondResult<Self> {
        match self.inner.transport.execute(request).await {
            Ok(_) => {
                if !self.inner.gate.ready() {
                    tracing::warn!("interaction was acknowledged after its gate had failed");
                }
                tracing::debug!("acknowledged interaction");
                Ok(self)
            }
            Err(e) => {
                let cause = AckError::Transport(Arc::new(e));
                self.inner.gate.fail(cause.clone());
                Err(cause.into())
            }
        }
    }

    /// Runs `action` once the interaction has been acknowledged.
    ///
    /// Validation and encoding happen immediately; if either fails, the
    /// returned future resolves to that error without anything being queued.
    pub fn followup_submit(&self, action: FollowupAction) -> FollowupFuture {
        let (sender, receiver) = oneshot::channel();

        match self.prepare_followup(&action) {
            Ok(request) => {
                tracing::trace!(route = ?request.route.method(), "submitting followup");
                self.inner.gate.enqueue_or_run(Box::new(QueuedFollowup {
                    request,
                    transport: self.inner.transport.clone(),
                    sender,
                }));
            }
            Err(e) => {
                let _ = sender.send(Err(e));
            }
        }

        FollowupFuture { receiver }
    }

    fn prepare_followup(&self, action: &FollowupAction) -> FollowupResult<Request> {
        action.validate()?;
        Ok(action.request(&self.inner.interaction)?)
    }

    pub fn reply(&self) -> MessageBuilder<'_> {
        MessageBuilder::new(self, MessageKind::Reply)
    }

    pub fn reply_ephemeral(&self, content: impl Into<String>) -> MessageBuilder<'_> {
        self.reply().flags(MessageFlags::EPHEMERAL).content(content)
    }

    pub fn update(&self) -> MessageBuilder<'_> {
        MessageBuilder::new(self, MessageKind::Update)
    }

    pub fn defer(&self) -> BoxFuture<'static, RespondResult<Self>> {
        self.submit(CallbackAction::DeferredReply {
            ephemeral: self.is_ephemeral(),
        })
    }

    pub fn defer_ephemeral(&self) -> BoxFuture<'static, RespondResult<Self>> {
        self.submit(CallbackAction::DeferredReply { ephemeral: true })
    }

    pub fn defer_update(&self) -> BoxFuture<'static, RespondResult<Self>> {
        self.submit(CallbackAction::DeferredUpdate)
    }

    pub fn modal(
        &self,
        custom_id: impl Into<String>,
        title: impl Into<String>,
    ) -> ModalBuilder<'_> {
        ModalBuilder::new(self, custom_id.into(), title.into())
    }

    pub fn autocomplete(&self, option_type: CommandOptionType) -> AutocompleteBuilder<'_> {
        AutocompleteBuilder::new(self, option_type)
    }

    pub fn premium_required(&self) -> BoxFuture<'static, RespondResult<Self>> {
        self.submit(CallbackAction::PremiumRequired)
    }

    pub fn launch_activity(&self) -> BoxFuture<'static, RespondResult<Self>> {
        self.submit(CallbackAction::LaunchActivity)
    }

    pub fn pong(&self) -> BoxFuture<'static, RespondResult<Self>> {
        self.submit(CallbackAction::Pong)
    }

    pub fn followup(&self) -> FollowupBuilder<'_> {
        FollowupBuilder::new(self)
    }

    pub fn update_original(&self) -> UpdateMessageBuilder<'_> {
        UpdateMessageBuilder::new(self, MessageTarget::Original)
    }

    pub fn update_followup(
        &self,
        message_id: impl Into<Id<MessageMarker>>,
    ) -> UpdateMessageBuilder<'_> {
        UpdateMessageBuilder::new(self, MessageTarget::Followup(message_id.into()))
    }

    pub fn delete_original(&self) -> BoxFuture<'static, FollowupResult<()>> {
        self.followup_submit(FollowupAction::Delete(MessageTarget::Original))
            .map(|r| r.map(|_| ()))
            .boxed()
    }

    pub fn delete_followup(
        &self,
        message_id: impl Into<Id<MessageMarker>>,
    ) -> BoxFuture<'static, FollowupResult<()>> {
        let target = MessageTarget::Followup(message_id.into());
        self.followup_submit(FollowupAction::Delete(target))
            .map(|r| r.map(|_| ()))
            .boxed()
    }

    /// Retrieves the message the acknowledgment produced.
    pub fn original(&self) -> BoxFuture<'static, FollowupResult<ChannelMessage>> {
        self.followup_submit(FollowupAction::Get(MessageTarget::Original))
            .message()
    }
}

impl Debug for Hook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hook")
            .field("interaction", &self.inner.interaction)
            .field("gate", &self.inner.gate)
            .finish_non_exhaustive()
    }
}

struct QueuedFollowup {
    request: Request,
    transport: Arc<dyn Transport>,
    sender: oneshot::Sender<FollowupResult<Response>>,
}

impl Gated for QueuedFollowup {
    fn run(self: Box<Self>) -> BoxFuture<'static, ()> {
        let Self {
            request,
            transport,
            sender,
        } = *self;
        let span = tracing::debug_span!("followup", method = ?request.route.method());

        async move {
            let result = transport.execute(request).await.map_err(FollowupError::from);
            if let Err(ref e) = result {
                tracing::debug!(error = %e, "followup failed");
            }
            let _ = sender.send(result);
        }
        .instrument(span)
        .boxed()
    }

    fn fail(self: Box<Self>, cause: AckError) {
        let _ = self.sender.send(Err(cause.into()));
    }
}

/// Resolves once a submitted followup has run or has been failed by its gate.
#[must_use = "futures do nothing unless polled"]
pub struct FollowupFuture {
    receiver: oneshot::Receiver<FollowupResult<Response>>,
}

impl FollowupFuture {
    /// Deserialises the response into the message it describes.
    pub fn message(self) -> BoxFuture<'static, FollowupResult<ChannelMessage>> {
        async move { Ok(self.await?.json()?) }.boxed()
    }
}

impl Future for FollowupFuture {
    type Output = FollowupResult<Response>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.receiver.poll_unpin(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(FollowupError::Abandoned)),
            Poll::Pending => Poll::Pending,
        }
    }
}
