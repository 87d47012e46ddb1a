//! Single-credential login gate with durable ("remember me") and
//! transient session storage.

use serde::{Deserialize, Serialize};

use crate::store::kv::KeyValueStore;

pub const USER_KEY: &str = "user";
pub const REMEMBER_ME_KEY: &str = "rememberMe";

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The persisted session object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    MissingFields,
    InvalidEmailAndPassword,
    InvalidEmail,
    InvalidPassword,
    NotConfigured,
}

impl AuthFailure {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingFields => "missing_fields",
            Self::InvalidEmailAndPassword => "invalid_credentials",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidPassword => "invalid_password",
            Self::NotConfigured => "credentials_not_configured",
        }
    }
}

impl std::fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields => write!(f, "Please fill in all fields"),
            Self::InvalidEmailAndPassword => write!(f, "Invalid email and password"),
            Self::InvalidEmail => write!(f, "Invalid email"),
            Self::InvalidPassword => write!(f, "Invalid password"),
            Self::NotConfigured => write!(
                f,
                "No credentials configured (set TASKBOARD_AUTH_EMAIL and TASKBOARD_AUTH_PASSWORD)"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginResult {
    Success(Session),
    Failure(AuthFailure),
}

impl LoginResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Compare a submitted pair against the configured one.
pub fn check_credentials(
    configured: Option<&Credentials>,
    email: &str,
    password: &str,
) -> Result<(), AuthFailure> {
    if email.is_empty() || password.is_empty() {
        return Err(AuthFailure::MissingFields);
    }
    let Some(expected) = configured else {
        return Err(AuthFailure::NotConfigured);
    };
    match (email == expected.email, password == expected.password) {
        (true, true) => Ok(()),
        (false, false) => Err(AuthFailure::InvalidEmailAndPassword),
        (false, true) => Err(AuthFailure::InvalidEmail),
        (true, false) => Err(AuthFailure::InvalidPassword),
    }
}

/// Owns the session state. Storage errors are logged and treated as an
/// absent session; nothing here fails hard.
pub struct SessionGate<D, T> {
    durable: D,
    transient: T,
    credentials: Option<Credentials>,
    session: Option<Session>,
    remembered: bool,
}

impl<D: KeyValueStore, T: KeyValueStore> SessionGate<D, T> {
    /// Build the gate and hydrate any stored session: durable first, then transient.
    pub fn open(durable: D, transient: T, credentials: Option<Credentials>) -> Self {
        let mut gate = Self {
            durable,
            transient,
            credentials,
            session: None,
            remembered: false,
        };
        gate.hydrate();
        gate
    }

    fn hydrate(&mut self) {
        let durable = read_session(&self.durable);
        let transient = read_session(&self.transient);
        match (durable, transient) {
            (Stored::Valid(session), _) => {
                self.session = Some(session);
                self.remembered = true;
            }
            (Stored::Corrupt, _) | (Stored::Absent, Stored::Corrupt) => {
                tracing::warn!("stored session is corrupt, discarding");
                self.clear_stores();
            }
            (Stored::Absent, Stored::Valid(session)) => self.session = Some(session),
            (Stored::Absent, Stored::Absent) => {}
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// True when the current session came from (or was written to) the durable store.
    pub fn is_remembered(&self) -> bool {
        self.session.is_some() && self.remembered
    }

    pub fn login(&mut self, email: &str, password: &str, remember_me: bool) -> LoginResult {
        if let Err(failure) = check_credentials(self.credentials.as_ref(), email, password) {
            tracing::info!(code = failure.code(), "login rejected");
            return LoginResult::Failure(failure);
        }

        self.clear_stores();
        let session = Session {
            email: email.to_string(),
        };
        match serde_json::to_string(&session) {
            Ok(json) => {
                let written = if remember_me {
                    self.durable
                        .set(USER_KEY, &json)
                        .and_then(|()| self.durable.set(REMEMBER_ME_KEY, "true"))
                } else {
                    self.transient.set(USER_KEY, &json)
                };
                if let Err(e) = written {
                    tracing::warn!(error = %e, "failed to persist session");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to encode session"),
        }

        self.session = Some(session.clone());
        self.remembered = remember_me;
        LoginResult::Success(session)
    }

    pub fn logout(&mut self) {
        self.clear_stores();
        self.session = None;
        self.remembered = false;
    }

    fn clear_stores(&mut self) {
        let results = [
            self.durable.remove(USER_KEY),
            self.durable.remove(REMEMBER_ME_KEY),
            self.transient.remove(USER_KEY),
        ];
        for result in results {
            if let Err(e) = result {
                tracing::warn!(error = %e, "failed to clear stored session");
            }
        }
    }
}

enum Stored {
    Absent,
    Corrupt,
    Valid(Session),
}

fn read_session<K: KeyValueStore>(kv: &K) -> Stored {
    let raw = match kv.get(USER_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Stored::Absent,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read stored session");
            return Stored::Absent;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(session) => Stored::Valid(session),
        Err(_) => Stored::Corrupt,
    }
}
