//! The actor runtime (C8): props-registry-backed spawning, a live-actor
//! map, dead-letter routing and supervisor-policy-driven restarts.
//!
//! `ActorSystem` is a single concrete, cloneable handle (cheap `Arc`
//! clone) rather than generic over a message type or a broker, unlike the
//! message-type-specific mailboxes and actor refs underneath it. Per-actor
//! generic state (`ActorRef<A::Message>`, the factory closure) is erased
//! behind `Box<dyn Any + Send + Sync>` at exactly one boundary — the
//! live-actor map — and recovered by downcasting at the generic call
//! sites (`actor_of`, `tell`, `ask`) that already know `A`.

// Layer 1: Standard library imports
use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

// Layer 3: Internal module imports
use crate::actor::{Actor, ActorContext, ActorMailboxSender, ActorRef, ReceiveOutcome};
use crate::dead_letter::{DeadLetter, DeadLetterQueue, DeadLetterReason};
use crate::mailbox::traits::{MailboxError, MailboxReceiver};
use crate::mailbox::{AtomicMetrics, BoundedMailbox, UnboundedMailbox};
use crate::message::{AskReplyHandle, Envelope, EnvelopeBody, Message, SystemSignal};
use crate::monitoring::{ActorEvent, ActorEventKind, InMemoryMonitor, Monitor, MonitoringConfig, SystemEvent, SystemEventKind};
use crate::props::{MailboxKind, PropId, PropsError, PropsRegistry, ResolvedProps};
use crate::supervisor::{RestartBackoff, SupervisorPolicy};
use crate::util::{ActorId, ActorPath};

use super::config::SystemConfig;
use super::errors::SystemError;

/// A future that delivers a `SystemSignal` to a live actor without the
/// caller knowing its message type. Built once at spawn time, when the
/// message type is still in scope.
type StopFuture = Pin<Box<dyn Future<Output = Result<(), MailboxError>> + Send>>;

/// One half of the bounded/unbounded mailbox receiver pair, held by the
/// actor's own task. Erased behind a 2-variant enum for the same reason
/// [`ActorMailboxSender`] is: there are exactly two concrete receivers,
/// so a closed enum reads better than `Box<dyn MailboxReceiver<M>>` (§6.2).
enum ActorMailboxReceiver<M: Message> {
    Bounded(BoundedMailbox<M, AtomicMetrics>),
    Unbounded(UnboundedMailbox<M, AtomicMetrics>),
}

impl<M: Message> ActorMailboxReceiver<M> {
    async fn recv(&mut self) -> Option<Envelope<M>> {
        match self {
            Self::Bounded(mailbox) => mailbox.recv().await,
            Self::Unbounded(mailbox) => mailbox.recv().await,
        }
    }
}

fn build_mailbox<M: Message>(kind: MailboxKind) -> (ActorMailboxReceiver<M>, ActorMailboxSender<M>) {
    match kind {
        MailboxKind::Bounded(capacity, strategy) => {
            let (mailbox, sender) = BoundedMailbox::with_backpressure_and_metrics(capacity, strategy, AtomicMetrics::new());
            (ActorMailboxReceiver::Bounded(mailbox), ActorMailboxSender::Bounded(sender))
        }
        MailboxKind::Unbounded => {
            let (mailbox, sender) = UnboundedMailbox::with_metrics(AtomicMetrics::new());
            (ActorMailboxReceiver::Unbounded(mailbox), ActorMailboxSender::Unbounded(sender))
        }
    }
}

/// An actor's current incarnation, as held in the live-actor map.
struct LiveActor {
    prop_id: PropId,
    /// Downcasts to `ActorRef<A::Message>` at the call site that inserted it.
    actor_ref: Box<dyn Any + Send + Sync>,
    /// Sends a `SystemSignal` to this incarnation.
    stop: Arc<dyn Fn(SystemSignal) -> StopFuture + Send + Sync>,
    join_handle: JoinHandle<()>,
}

struct Inner {
    config: SystemConfig,
    props: PropsRegistry,
    live: DashMap<ActorPath, LiveActor>,
    dead_letters: DeadLetterQueue,
    shutting_down: AtomicBool,
    actor_events: InMemoryMonitor<ActorEvent>,
    system_events: InMemoryMonitor<SystemEvent>,
}

/// Handle to the actor runtime. Cheap to clone (an `Arc` underneath);
/// every [`ActorContext`] carries one so actors can spawn children and
/// address siblings.
#[derive(Clone)]
pub struct ActorSystem {
    inner: Arc<Inner>,
}

impl ActorSystem {
    /// Build a new, empty system. No actors are live until `actor_of` (or
    /// `tell`, which spawns lazily) is called.
    pub fn new(config: SystemConfig) -> Self {
        let monitoring = MonitoringConfig {
            enabled: config.enable_metrics,
            ..MonitoringConfig::default()
        };
        let system = Self {
            inner: Arc::new(Inner {
                dead_letters: DeadLetterQueue::new(config.dead_letter_capacity),
                config,
                props: PropsRegistry::new(),
                live: DashMap::new(),
                shutting_down: AtomicBool::new(false),
                actor_events: InMemoryMonitor::new(monitoring.clone()),
                system_events: InMemoryMonitor::new(monitoring),
            }),
        };
        info!("actor system created");
        system
    }

    /// Register a factory under `prop_id`. Re-registering the same actor
    /// type and mailbox shape under an id already in use is a no-op.
    ///
    /// `mailbox_kind` of `None` falls back to the system's configured
    /// `default_mailbox` (§6 `defaultMailbox`) rather than to any fixed
    /// shape, so a system built with a custom `SystemConfig` applies that
    /// choice to every prop that doesn't ask for something more specific.
    pub fn register_prop<A, F>(
        &self,
        prop_id: impl Into<PropId>,
        factory: F,
        mailbox_kind: impl Into<Option<MailboxKind>>,
        default_policy: Option<SupervisorPolicy>,
    ) -> Result<(), SystemError>
    where
        A: Actor,
        F: Fn() -> A + Send + Sync + 'static,
    {
        let mailbox_kind = mailbox_kind.into().unwrap_or(self.inner.config.default_mailbox);
        self.inner
            .props
            .register::<A, F>(prop_id, factory, mailbox_kind, default_policy)
            .map_err(|error| match error {
                PropsError::Conflict(id) => SystemError::PropsConflict(id),
                PropsError::NotFound(id) => SystemError::PropNotRegistered(id),
            })
    }

    /// Resolve `path` to a live `ActorRef`, spawning a fresh incarnation
    /// from `A`'s default props id if nothing is live there yet.
    ///
    /// Idempotent: a second call with the same `A` at the same path
    /// returns the existing reference. A call naming a different actor
    /// type than what is already live at `path` fails instead of
    /// replacing it.
    pub async fn actor_of<A: Actor>(&self, path: ActorPath) -> Result<ActorRef<A::Message>, SystemError> {
        let prop_id = PropsRegistry::default_prop_id::<A>();
        self.actor_of_with_prop::<A>(path, &prop_id).await
    }

    /// Like [`actor_of`](Self::actor_of), resolving `prop_id` explicitly
    /// rather than `A`'s default id — needed to host more than one
    /// incarnation shape of the same actor type (e.g. a worker pool).
    pub async fn actor_of_with_prop<A: Actor>(&self, path: ActorPath, prop_id: &str) -> Result<ActorRef<A::Message>, SystemError> {
        if self.inner.shutting_down.load(Ordering::SeqCst) {
            return Err(SystemError::ShuttingDown);
        }

        if let Some(existing) = self.inner.live.get(&path) {
            return downcast_or_conflict::<A>(&path, prop_id, &existing.prop_id, &existing.actor_ref);
        }

        let resolved = self
            .inner
            .props
            .lookup::<A>(prop_id)
            .ok_or_else(|| SystemError::PropNotRegistered(prop_id.to_string()))?;

        if self.inner.config.max_actors > 0 && self.inner.live.len() >= self.inner.config.max_actors {
            return Err(SystemError::ActorLimitExceeded {
                current: self.inner.live.len(),
                max: self.inner.config.max_actors,
            });
        }

        let (actor_ref, join_handle) = self.spawn_incarnation::<A>(path.clone(), resolved);
        let stop_ref = actor_ref.clone();
        let stop: Arc<dyn Fn(SystemSignal) -> StopFuture + Send + Sync> = Arc::new(move |signal| {
            let actor_ref = stop_ref.clone();
            Box::pin(async move { actor_ref.tell_system(signal).await })
        });

        match self.inner.live.entry(path.clone()) {
            Entry::Occupied(occupied) => {
                // Lost the race to another concurrent spawn; abort our
                // incarnation and defer to whichever one got there first.
                join_handle.abort();
                let winner = occupied.get();
                downcast_or_conflict::<A>(&path, prop_id, &winner.prop_id, &winner.actor_ref)
            }
            Entry::Vacant(vacant) => {
                vacant.insert(LiveActor {
                    prop_id: prop_id.to_string(),
                    actor_ref: Box::new(actor_ref.clone()),
                    stop,
                    join_handle,
                });
                Ok(actor_ref)
            }
        }
    }

    /// Resolve a path string to a live `ActorRef`, or `None` if nothing is
    /// live there. No wildcards; an exact-match lookup only.
    pub fn actor_selection<M: Message>(&self, path: &str) -> Option<ActorRef<M>> {
        let path = ActorPath::parse(path);
        self.inner.live.get(&path).and_then(|entry| entry.actor_ref.downcast_ref::<ActorRef<M>>().cloned())
    }

    /// Every live actor path that is a descendant of `path` (not `path`
    /// itself). There is no automatic parent-child supervision; this is
    /// purely a prefix query over the live-actor map.
    pub fn children(&self, path: &ActorPath) -> Vec<ActorPath> {
        let parent_segments = path.segments();
        self.inner
            .live
            .iter()
            .map(|entry| entry.key().clone())
            .filter(|candidate| {
                let candidate_segments = candidate.segments();
                candidate_segments.len() > parent_segments.len()
                    && candidate_segments[..parent_segments.len()] == parent_segments[..]
            })
            .collect()
    }

    /// Fire-and-forget delivery to `path`, lazily spawning `A`'s default
    /// incarnation there if nothing is live yet.
    pub async fn tell<A: Actor>(&self, path: ActorPath, message: A::Message) -> Result<(), SystemError> {
        let prop_id = PropsRegistry::default_prop_id::<A>();
        self.tell_with_prop::<A>(path, &prop_id, message).await
    }

    /// Like [`tell`](Self::tell), resolving `prop_id` explicitly.
    pub async fn tell_with_prop<A: Actor>(&self, path: ActorPath, prop_id: &str, message: A::Message) -> Result<(), SystemError> {
        if self.inner.shutting_down.load(Ordering::SeqCst) {
            return Err(SystemError::ShuttingDown);
        }
        let actor_ref = self.actor_of_with_prop::<A>(path.clone(), prop_id).await?;
        let debug_repr = format!("{message:?}");
        let message_type = A::Message::MESSAGE_TYPE;

        match actor_ref.tell(message).await {
            Ok(()) => Ok(()),
            Err(mailbox_error) => {
                self.record_undelivered(&path, debug_repr, message_type, &mailbox_error);
                Err(SystemError::from_mailbox_error(mailbox_error, path))
            }
        }
    }

    /// Deliver a message built from an `AskReplyHandle<R>`, awaiting the
    /// actor's reply up to `timeout`. The actor is expected to complete
    /// the handle from inside `receive`; if it never does, the ask times
    /// out independently of whatever the actor is doing.
    pub async fn ask<A, R>(&self, path: ActorPath, build: impl FnOnce(AskReplyHandle<R>) -> A::Message, timeout: Duration) -> Result<R, SystemError>
    where
        A: Actor,
        R: Send + 'static,
    {
        let prop_id = PropsRegistry::default_prop_id::<A>();
        self.ask_with_prop::<A, R>(path, &prop_id, build, timeout).await
    }

    /// Like [`ask`](Self::ask), resolving `prop_id` explicitly.
    pub async fn ask_with_prop<A, R>(
        &self,
        path: ActorPath,
        prop_id: &str,
        build: impl FnOnce(AskReplyHandle<R>) -> A::Message,
        timeout: Duration,
    ) -> Result<R, SystemError>
    where
        A: Actor,
        R: Send + 'static,
    {
        if self.inner.shutting_down.load(Ordering::SeqCst) {
            return Err(SystemError::ShuttingDown);
        }
        let actor_ref = self.actor_of_with_prop::<A>(path.clone(), prop_id).await?;

        let (reply_tx, reply_rx) = oneshot::channel();
        let message = build(AskReplyHandle::new(reply_tx));
        let debug_repr = format!("{message:?}");
        let deadline = Utc::now() + chrono::Duration::from_std(timeout).unwrap_or_else(|_| chrono::Duration::seconds(i64::MAX / 2));
        let envelope = Envelope::new(message).with_ask_deadline(deadline);

        if let Err(mailbox_error) = actor_ref.tell_envelope(envelope).await {
            self.record_undelivered(&path, debug_repr, A::Message::MESSAGE_TYPE, &mailbox_error);
            return Err(SystemError::from_mailbox_error(mailbox_error, path));
        }

        match tokio::time::timeout(timeout, reply_rx).await {
            Ok(Ok(Ok(value))) => Ok(value),
            Ok(Ok(Err(failure))) => Err(SystemError::AskFailed { path, reason: failure.to_string() }),
            Ok(Err(_)) | Err(_) => Err(SystemError::AskTimeout { path, timeout }),
        }
    }

    /// Snapshot of up to `limit` most recent dead letters, newest first.
    /// Does not drain the queue.
    pub fn get_dead_letters(&self, limit: usize) -> Vec<DeadLetter> {
        self.inner.dead_letters.recent(limit)
    }

    /// Like [`shutdown_await`](Self::shutdown_await), using the system's
    /// configured `shutdown_timeout` (§6 `shutdownTimeout`) instead of an
    /// explicit one.
    pub async fn shutdown(&self) -> bool {
        self.shutdown_await(self.inner.config.shutdown_timeout).await
    }

    /// Begin an orderly shutdown: reject new `tell`/`ask`/`actor_of`
    /// calls, `PoisonPill` every live actor, and wait up to `timeout` for
    /// the live-actor map to empty. Actors still running past the
    /// deadline are force-aborted. Returns whether every actor stopped
    /// cleanly before the deadline.
    pub async fn shutdown_await(&self, timeout: Duration) -> bool {
        self.inner.shutting_down.store(true, Ordering::SeqCst);
        let _ = self
            .inner
            .system_events
            .record(SystemEvent {
                timestamp: Utc::now(),
                event_kind: SystemEventKind::Shutdown,
                metadata: Default::default(),
            })
            .await;

        let stops: Vec<_> = self.inner.live.iter().map(|entry| entry.stop.clone()).collect();
        for stop in stops {
            let _ = stop(SystemSignal::PoisonPill).await;
        }

        let deadline = tokio::time::Instant::now() + timeout;
        while !self.inner.live.is_empty() {
            if tokio::time::Instant::now() >= deadline {
                warn!(remaining = self.inner.live.len(), "shutdown deadline reached; force-terminating remaining actors");
                for entry in self.inner.live.iter() {
                    entry.join_handle.abort();
                }
                self.inner.live.clear();
                return false;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        true
    }

    fn record_undelivered(&self, path: &ActorPath, message: String, message_type: &'static str, error: &MailboxError) {
        let reason = match error {
            MailboxError::Closed => DeadLetterReason::DeliveryToTerminated,
            MailboxError::Full { .. } | MailboxError::BackpressureApplied { .. } | MailboxError::TtlExpired { .. } => DeadLetterReason::MailboxFull,
        };
        self.inner.dead_letters.record(DeadLetter::new(message, message_type, path.clone(), reason));
    }

    /// Spawn the tokio task that owns one incarnation of `A` at `path`:
    /// builds its mailbox, constructs the actor via its factory, runs the
    /// §4.5 lifecycle sequence, and deregisters itself from the live-actor
    /// map on exit.
    fn spawn_incarnation<A: Actor>(&self, path: ActorPath, resolved: ResolvedProps<A>) -> (ActorRef<A::Message>, JoinHandle<()>) {
        let (receiver, sender) = build_mailbox::<A::Message>(resolved.mailbox_kind);
        let actor_ref = ActorRef::new(path.clone(), sender);
        let system = self.clone();
        let policy = resolved.default_policy.clone().unwrap_or_default();

        let join_handle = tokio::spawn(run_actor::<A>(system, path, receiver, actor_ref.clone(), resolved.factory, policy));

        (actor_ref, join_handle)
    }

    pub(crate) fn dead_letters(&self) -> &DeadLetterQueue {
        &self.inner.dead_letters
    }

    pub(crate) fn init_restart_limit(&self) -> u32 {
        self.inner.config.init_restart_limit
    }

    pub(crate) async fn record_actor_event(&self, actor_id: ActorId, event_kind: ActorEventKind) {
        let _ = self
            .inner
            .actor_events
            .record(ActorEvent {
                timestamp: Utc::now(),
                actor_id,
                event_kind,
                metadata: Default::default(),
            })
            .await;
    }

    async fn deregister(&self, path: &ActorPath) {
        self.inner.live.remove(path);
    }
}

/// Downcast a live-actor-map entry's erased `actor_ref` back to
/// `ActorRef<A::Message>`, or report the path conflict if the entry was
/// registered under a different `prop_id` than the caller expects.
fn downcast_or_conflict<A: Actor>(
    path: &ActorPath,
    expected_prop_id: &str,
    found_prop_id: &str,
    actor_ref: &(dyn Any + Send + Sync),
) -> Result<ActorRef<A::Message>, SystemError> {
    if found_prop_id != expected_prop_id {
        return Err(SystemError::ActorPathConflict {
            path: path.clone(),
            expected: expected_prop_id.to_string(),
            found: found_prop_id.to_string(),
        });
    }
    actor_ref.downcast_ref::<ActorRef<A::Message>>().cloned().ok_or_else(|| SystemError::ActorPathConflict {
        path: path.clone(),
        expected: expected_prop_id.to_string(),
        found: found_prop_id.to_string(),
    })
}

/// What the receive loop should do after one pass over the mailbox.
enum LoopExit<E> {
    /// The mailbox is closed, or a `PoisonPill`/`Terminate` arrived.
    Stopped,
    /// `receive` returned an error; apply the actor's `SupervisorPolicy`.
    Failed(E),
}

/// The per-incarnation task body: constructs the actor, runs `pre_start`
/// (or `post_restart` after a failure), loops over the mailbox per §4.5,
/// and on failure either restarts a fresh incarnation in place or stops
/// for good, per the actor's [`SupervisorPolicy`].
async fn run_actor<A: Actor>(
    system: ActorSystem,
    path: ActorPath,
    mut receiver: ActorMailboxReceiver<A::Message>,
    self_ref: ActorRef<A::Message>,
    factory: Arc<dyn Fn() -> A + Send + Sync>,
    policy: SupervisorPolicy,
) {
    let mut backoff = policy.new_backoff_tracker();
    let mut init_failures: u32 = 0;
    let mut is_restart = false;

    loop {
        let mut actor = factory();
        let actor_id = ActorId::new();
        let mut ctx = ActorContext::new(path.clone(), actor_id, self_ref.clone(), system.clone());
        system.record_actor_event(actor_id, ActorEventKind::Spawned).await;

        let start_result = if is_restart {
            actor.post_restart(&mut ctx).await
        } else {
            actor.pre_start(&mut ctx).await
        };

        if let Err(init_error) = start_result {
            init_failures += 1;
            error!(path = %path, error = %init_error, "actor failed to start");
            if init_failures > system.init_restart_limit() {
                warn!(path = %path, "init-restart limit exceeded; stopping actor");
                system.deregister(&path).await;
                return;
            }
            if !apply_policy_and_wait(&policy, &mut backoff).await {
                system.deregister(&path).await;
                return;
            }
            is_restart = true;
            continue;
        }

        system.record_actor_event(actor_id, ActorEventKind::Started).await;

        let exit = loop {
            let envelope = match receiver.recv().await {
                Some(envelope) => envelope,
                None => break LoopExit::Stopped,
            };

            if envelope.is_ask_expired() {
                let message_type = A::Message::MESSAGE_TYPE;
                let repr = envelope.payload().map(|payload| format!("{payload:?}")).unwrap_or_default();
                system
                    .dead_letters()
                    .record(DeadLetter::new(repr, message_type, path.clone(), DeadLetterReason::AskExpired));
                continue;
            }

            match envelope.into_body() {
                EnvelopeBody::System(SystemSignal::PoisonPill) => break LoopExit::Stopped,
                EnvelopeBody::System(SystemSignal::Terminate) => break LoopExit::Stopped,
                EnvelopeBody::User(payload) => {
                    let message_type = A::Message::MESSAGE_TYPE;
                    match actor.receive(payload, &mut ctx).await {
                        Ok(ReceiveOutcome::Handled) => {
                            system
                                .record_actor_event(actor_id, ActorEventKind::MessageProcessed { message_type, duration_micros: 0 })
                                .await;
                        }
                        Ok(ReceiveOutcome::Unhandled) => {
                            system.dead_letters().record(DeadLetter::new(
                                format!("<{message_type}>"),
                                message_type,
                                path.clone(),
                                DeadLetterReason::UnhandledMessage,
                            ));
                        }
                        Err(error) => {
                            error!(path = %path, error = %error, "actor receive failed");
                            system.record_actor_event(actor_id, ActorEventKind::ErrorOccurred { error: error.to_string() }).await;
                            break LoopExit::Failed(error);
                        }
                    }
                }
            }
        };

        match exit {
            LoopExit::Stopped => {
                let _ = actor.post_stop(&mut ctx).await;
                system.record_actor_event(actor_id, ActorEventKind::Stopped).await;
                drain_to_dead_letters(&mut receiver, &path, &system).await;
                system.deregister(&path).await;
                return;
            }
            LoopExit::Failed(failure) => {
                let _ = actor.pre_restart(&failure, &mut ctx).await;

                match &policy {
                    SupervisorPolicy::Stop => {
                        system.deregister(&path).await;
                        return;
                    }
                    SupervisorPolicy::Restart => {
                        debug!(path = %path, "restarting actor");
                        is_restart = true;
                    }
                    SupervisorPolicy::RestartWithBackoff { .. } => {
                        if !apply_policy_and_wait(&policy, &mut backoff).await {
                            warn!(path = %path, "restart budget exhausted; stopping actor");
                            system.deregister(&path).await;
                            return;
                        }
                        is_restart = true;
                    }
                }
            }
        }
    }
}

/// Wait the backoff-implied delay (if any) before a restart, recording
/// the attempt. Returns `false` when the policy's retry budget has been
/// exhausted and the actor should stop instead of restarting again.
async fn apply_policy_and_wait(policy: &SupervisorPolicy, backoff: &mut Option<RestartBackoff>) -> bool {
    match (policy, backoff.as_mut()) {
        (SupervisorPolicy::Stop, _) => false,
        (SupervisorPolicy::Restart, _) => true,
        (SupervisorPolicy::RestartWithBackoff { .. }, Some(tracker)) => {
            if tracker.is_limit_exceeded() {
                return false;
            }
            let delay = tracker.calculate_delay();
            tracker.record_restart();
            tokio::time::sleep(delay).await;
            true
        }
        (SupervisorPolicy::RestartWithBackoff { .. }, None) => true,
    }
}

/// On shutdown, drain whatever is left in the mailbox to dead letters
/// rather than silently discarding it (§4.5 step 5, §4.7).
async fn drain_to_dead_letters<M: Message>(receiver: &mut ActorMailboxReceiver<M>, path: &ActorPath, system: &ActorSystem) {
    while let Some(envelope) = receiver.recv().await {
        if let Some(payload) = envelope.payload() {
            system
                .dead_letters()
                .record(DeadLetter::new(format!("{payload:?}"), M::MESSAGE_TYPE, path.clone(), DeadLetterReason::ShutdownInFlight));
        }
    }
}
