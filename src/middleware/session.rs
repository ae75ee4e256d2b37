use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "hr_session";

/// Which screen a browsing session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavState {
    #[default]
    Listing,
    ViewingDetail(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Info,
    Warning,
    Error,
}

/// One-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

/// Sessions untouched for this long are dropped the next time one starts.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(2 * 60 * 60);

#[derive(Debug, Clone)]
pub struct Session {
    pub nav: NavState,
    pub flash: Option<Flash>,
    last_seen: Instant,
}

impl Session {
    fn new(now: Instant) -> Self {
        Self {
            nav: NavState::default(),
            flash: None,
            last_seen: now,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_timeout(SESSION_IDLE_TIMEOUT)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            idle_timeout,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        self.sessions.lock().expect("session store mutex poisoned")
    }

    fn with_session<R>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> R) -> R {
        let now = Instant::now();
        let mut guard = self.lock();
        let session = guard.entry(id).or_insert_with(|| Session::new(now));
        session.last_seen = now;
        f(session)
    }

    /// Starts a session, first dropping every idle one.
    pub fn create(&self) -> Uuid {
        self.create_at(Instant::now())
    }

    fn create_at(&self, now: Instant) -> Uuid {
        let idle_timeout = self.idle_timeout;
        let mut guard = self.lock();
        let before = guard.len();
        guard.retain(|_, s| now.saturating_duration_since(s.last_seen) < idle_timeout);
        let evicted = before - guard.len();
        if evicted > 0 {
            tracing::debug!(evicted, "Dropped idle browsing sessions");
        }

        let id = Uuid::new_v4();
        guard.insert(id, Session::new(now));
        id
    }

    /// Marks a known, non-idle session as seen. Idle sessions are dropped and
    /// reported as unknown.
    pub fn resume(&self, id: Uuid) -> bool {
        self.resume_at(id, Instant::now())
    }

    fn resume_at(&self, id: Uuid, now: Instant) -> bool {
        let mut guard = self.lock();
        let fresh = match guard.get(&id) {
            Some(s) => now.saturating_duration_since(s.last_seen) < self.idle_timeout,
            None => return false,
        };
        if fresh {
            if let Some(s) = guard.get_mut(&id) {
                s.last_seen = now;
            }
        } else {
            guard.remove(&id);
        }
        fresh
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn nav(&self, id: Uuid) -> NavState {
        self.with_session(id, |s| s.nav)
    }

    pub fn set_nav(&self, id: Uuid, nav: NavState) {
        self.with_session(id, |s| s.nav = nav);
    }

    pub fn set_flash(&self, id: Uuid, flash: Flash) {
        self.with_session(id, |s| s.flash = Some(flash));
    }

    pub fn take_flash(&self, id: Uuid) -> Option<Flash> {
        self.with_session(id, |s| s.flash.take())
    }
}

/// Per-request view of the caller's session, inserted by [`session_middleware`].
#[derive(Clone, Debug)]
pub struct SessionHandle {
    id: Uuid,
    store: SessionStore,
}

impl SessionHandle {
    pub fn new(id: Uuid, store: SessionStore) -> Self {
        Self { id, store }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn nav(&self) -> NavState {
        self.store.nav(self.id)
    }

    pub fn view_detail(&self, candidate_id: i64) {
        self.store.set_nav(self.id, NavState::ViewingDetail(candidate_id));
    }

    pub fn back_to_list(&self) {
        self.store.set_nav(self.id, NavState::Listing);
    }

    pub fn flash(&self, flash: Flash) {
        self.store.set_flash(self.id, flash);
    }

    pub fn take_flash(&self) -> Option<Flash> {
        self.store.take_flash(self.id)
    }
}

pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

pub async fn session_middleware(
    State(store): State<SessionStore>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let known = session_id_from_headers(req.headers()).filter(|id| store.resume(*id));
    let (id, is_new) = match known {
        Some(id) => (id, false),
        None => (store.create(), true),
    };

    req.extensions_mut().insert(SessionHandle::new(id, store));
    let mut response = next.run(req).await;

    if is_new {
        tracing::debug!(session_id = %id, "Started browsing session");
        let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id);
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}
