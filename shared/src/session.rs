use futures_signals::signal::{Mutable, Signal, SignalExt};

use crate::constants::ApiProfile;
use crate::error::ApiError;
use crate::storage::Storage;
use crate::transport::{fetch_json, HttpRequest, Transport};
use crate::types::{AuthResponse, CredentialsForm, LoginRequest, RegisterRequest, Session, User};
use crate::validate::{validate_login, validate_register};

/// Owns the bearer token and the signed-in user.
pub struct SessionManager<S: Storage> {
    profile: &'static ApiProfile,
    storage: S,
    current: Mutable<Option<Session>>,
}

impl<S: Storage> SessionManager<S> {
    pub fn new(profile: &'static ApiProfile, storage: S) -> Self {
        Self { profile, storage, current: Mutable::new(None) }
    }

    pub fn profile(&self) -> &'static ApiProfile {
        self.profile
    }

    pub fn current(&self) -> Option<Session> {
        self.current.get_cloned()
    }

    pub fn token(&self) -> Option<String> {
        self.current.lock_ref().as_ref().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.current.lock_ref().as_ref().map(|s| s.user.clone())
    }

    pub fn user_signal(&self) -> impl Signal<Item=Option<User>> {
        self.current.signal_ref(|s| s.as_ref().map(|s| s.user.clone()))
    }

    pub fn is_authenticated_signal(&self) -> impl Signal<Item=bool> {
        self.current.signal_ref(Option::is_some).dedupe()
    }

    pub async fn login<T: Transport + ?Sized>(&self, transport: &T, form: &CredentialsForm) -> Result<Session, ApiError> {
        validate_login(form)?;
        let data = LoginRequest {
            username: form.username.trim().to_string(),
            password: form.password.clone(),
        };
        let response: AuthResponse = fetch_json(transport, HttpRequest::post(self.profile.login, &data)?).await?;
        Ok(self.establish(response.into()))
    }

    pub async fn register<T: Transport + ?Sized>(&self, transport: &T, form: &CredentialsForm) -> Result<Session, ApiError> {
        validate_register(form, self.profile)?;
        let data = RegisterRequest {
            username: form.username.trim().to_string(),
            email: if self.profile.collect_email { form.email.as_deref().map(|e| e.trim().to_string()) } else { None },
            password: form.password.clone(),
        };
        let response: AuthResponse = fetch_json(transport, HttpRequest::post(self.profile.register, &data)?).await?;
        Ok(self.establish(response.into()))
    }

    pub fn logout(&self) {
        if self.current.lock_ref().is_some() {
            log::info!("session closed");
        }
        self.clear();
    }

    /// Reads the persisted session; anything incomplete or rejected is discarded.
    pub async fn restore<T: Transport + ?Sized>(&self, transport: &T) -> Option<Session> {
        let token = self.storage.get(self.profile.token_key).filter(|t| !t.is_empty())?;

        let stored_user = match self.profile.user_key {
            Some(key) => match self.storage.get(key).and_then(|raw| serde_json::from_str::<User>(&raw).ok()) {
                Some(user) => Some(user),
                None => {
                    log::warn!("stored user is missing or malformed, discarding session");
                    self.clear();
                    return None;
                }
            },
            None => None,
        };

        let user = match self.profile.me {
            Some(path) => match fetch_json::<User, _>(transport, HttpRequest::get(path).bearer(Some(&token))).await {
                Ok(user) => user,
                Err(err) => {
                    log::warn!("stored token rejected: {err}");
                    self.clear();
                    return None;
                }
            },
            None => stored_user.unwrap_or_default(),
        };

        let session = Session { token, user };
        self.current.set(Some(session.clone()));
        log::info!("session restored for {}", session.user.username);
        Some(session)
    }

    fn establish(&self, session: Session) -> Session {
        self.storage.set(self.profile.token_key, &session.token);
        if let Some(key) = self.profile.user_key {
            match serde_json::to_string(&session.user) {
                Ok(raw) => self.storage.set(key, &raw),
                Err(err) => log::error!("persist user: {:?}", err),
            }
        }
        log::info!("signed in as {}", session.user.username);
        self.current.set(Some(session.clone()));
        session
    }

    fn clear(&self) {
        self.storage.remove(self.profile.token_key);
        if let Some(key) = self.profile.user_key {
            self.storage.remove(key);
        }
        self.current.set(None);
    }
}
