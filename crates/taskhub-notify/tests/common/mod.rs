//! Shared test helpers: stub transports and engine assembly.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;

use taskhub_core::AppError;
use taskhub_core::config::delivery::DeliveryConfig;
use taskhub_core::config::rate_limit::RateLimitConfig;
use taskhub_core::result::AppResult;
use taskhub_core::types::id::UserId;
use taskhub_entity::notification::{
    DeliveryMethod, Notification, NotificationDraft, NotificationKind, Priority,
};
use taskhub_notify::channels::{
    ChannelAdapter, EmailAdapter, EmailTransport, PushOutcome, RealtimeAdapter,
    RealtimeBroadcaster,
};
use taskhub_notify::delivery::DeliveryService;
use taskhub_notify::limiter::MemoryRateLimiter;
use taskhub_notify::metrics::MemoryMetricsSink;
use taskhub_notify::query::QueryService;
use taskhub_notify::store::MemoryNotificationStore;

/// Broadcaster whose online flag and scripted failures are test-controlled.
pub struct StubBroadcaster {
    online: AtomicBool,
    /// Push errors to return before succeeding.
    failures_remaining: AtomicU32,
    /// Pushes accepted so far.
    pub accepted: AtomicU32,
}

impl StubBroadcaster {
    pub fn online() -> Self {
        Self {
            online: AtomicBool::new(true),
            failures_remaining: AtomicU32::new(0),
            accepted: AtomicU32::new(0),
        }
    }

    pub fn offline() -> Self {
        let stub = Self::online();
        stub.online.store(false, Ordering::SeqCst);
        stub
    }

    pub fn failing_times(times: u32) -> Self {
        let stub = Self::online();
        stub.failures_remaining.store(times, Ordering::SeqCst);
        stub
    }
}

#[async_trait]
impl RealtimeBroadcaster for StubBroadcaster {
    async fn broadcast(
        &self,
        _notification: &Notification,
        _user_id: UserId,
    ) -> AppResult<PushOutcome> {
        if self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(AppError::internal("push gateway error"));
        }
        if !self.online.load(Ordering::SeqCst) {
            return Ok(PushOutcome::RecipientOffline);
        }
        self.accepted.fetch_add(1, Ordering::SeqCst);
        Ok(PushOutcome::Accepted)
    }
}

/// Email transport that fails a scripted number of times, then succeeds.
pub struct StubEmailTransport {
    failures_remaining: AtomicU32,
    /// Mails accepted so far.
    pub sent: AtomicU32,
}

impl StubEmailTransport {
    pub fn reliable() -> Self {
        Self::failing_times(0)
    }

    pub fn failing_times(times: u32) -> Self {
        Self {
            failures_remaining: AtomicU32::new(times),
            sent: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl EmailTransport for StubEmailTransport {
    async fn send(&self, _notification: &Notification, _user_id: UserId) -> AppResult<()> {
        if self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(AppError::internal("smtp 451 temporary failure"));
        }
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Fully assembled engine over in-memory implementations.
pub struct TestEngine {
    pub delivery: DeliveryService,
    pub query: QueryService,
    pub store: Arc<MemoryNotificationStore>,
    pub broadcaster: Arc<StubBroadcaster>,
    pub email: Arc<StubEmailTransport>,
}

/// Build an engine with the given stubs and the default 5-per-minute
/// rate limit.
pub fn engine(broadcaster: StubBroadcaster, email: StubEmailTransport) -> TestEngine {
    engine_with_limit(broadcaster, email, RateLimitConfig::default())
}

/// Build an engine with a custom rate-limit configuration.
pub fn engine_with_limit(
    broadcaster: StubBroadcaster,
    email: StubEmailTransport,
    rate_limit: RateLimitConfig,
) -> TestEngine {
    let store = Arc::new(MemoryNotificationStore::new());
    let metrics = Arc::new(MemoryMetricsSink::new());
    let limiter = Arc::new(MemoryRateLimiter::new(&rate_limit));
    let broadcaster = Arc::new(broadcaster);
    let email = Arc::new(email);

    // Short backoff keeps transient-retry tests fast.
    let config = DeliveryConfig {
        max_retries: 1,
        transient_backoff_ms: 10,
        channel_timeout_ms: 1_000,
    };

    let adapters: Vec<Arc<dyn ChannelAdapter>> = vec![
        Arc::new(RealtimeAdapter::new(broadcaster.clone() as Arc<dyn RealtimeBroadcaster>)),
        Arc::new(EmailAdapter::new(email.clone() as Arc<dyn EmailTransport>)),
    ];

    let delivery = DeliveryService::new(
        store.clone(),
        limiter,
        adapters,
        metrics.clone(),
        config,
    );
    let query = QueryService::new(store.clone(), metrics);

    TestEngine {
        delivery,
        query,
        store,
        broadcaster,
        email,
    }
}

/// A well-formed draft for the given user and channels.
pub fn draft(user_id: UserId, methods: Vec<DeliveryMethod>) -> NotificationDraft {
    NotificationDraft {
        user_id,
        kind: NotificationKind::TaskAssigned,
        title: "New Task".to_string(),
        message: "You have been assigned a new task".to_string(),
        priority: Priority::High,
        delivery_methods: methods,
        metadata: Some(serde_json::json!({ "task_id": "t-42", "action": "assigned" })),
    }
}
