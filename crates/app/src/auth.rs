use dioxus::prelude::*;
use shared_types::{Action, AuthUser, UserRole};

/// Global authentication state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub current_user: Signal<Option<AuthUser>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            current_user: Signal::new(None),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.read().is_some()
    }

    pub fn set_user(&mut self, user: AuthUser) {
        self.current_user.set(Some(user));
    }

    pub fn clear_auth(&mut self) {
        self.current_user.set(None);
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

/// The current user's resolved role. Unauthenticated renders resolve to
/// Driver, the least-privileged role — the guard redirects before any
/// driver-only control could act.
pub fn use_user_role() -> UserRole {
    let auth = use_auth();
    let binding = auth.current_user.read();
    binding.as_ref().map(|u| u.role()).unwrap_or_default()
}

/// Whether the current user may perform `action`, per the central
/// permission table.
pub fn use_can(action: Action) -> bool {
    use_user_role().can(action)
}

/// Session loss is the one failure with a forced side effect: clear local
/// state and navigate to the login page. Returns `true` when the error was
/// an auth failure and has been handled.
pub fn redirect_on_auth_failure(auth: &mut AuthState, error_string: &str) -> bool {
    if !shared_types::AppError::is_auth_failure(error_string) {
        return false;
    }
    auth.clear_auth();
    navigator().push(crate::routes::Route::Login { redirect: None });
    true
}
