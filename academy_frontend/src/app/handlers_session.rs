use log::error;

use crate::api::ApiError;
use crate::models::{Role, SigninResponse};
use crate::session::Session;

use super::state::{LoginState, PostsState, RosterState, ViewState};
use super::AcademyApp;

impl AcademyApp {
    pub(super) fn handle_signed_in(&mut self, result: Result<SigninResponse, ApiError>) {
        self.login.submitting = false;
        match result {
            Ok(response) => {
                let session = Session {
                    token: response.token,
                    user_id: response.id,
                };
                if let Err(err) = self.store.save(&session) {
                    error!("failed to persist session: {err:#}");
                }
                self.session = Some(session);
                self.login = LoginState::default();
                self.view = ViewState::Posts;
                self.spawn_load_posts();
            }
            Err(err) => {
                self.login.error = Some(err.to_string());
            }
        }
    }

    pub(super) fn handle_registered(&mut self, result: Result<(), ApiError>) {
        self.login.submitting = false;
        match result {
            Ok(()) => {
                self.login = LoginState::default();
                self.info_banner = Some("Account created. Sign in to continue.".into());
            }
            Err(err) => {
                self.login.error = Some(err.to_string());
            }
        }
    }

    /// The backend rejected our token. Ignore duplicates from requests that
    /// were already in flight when the session ended.
    pub(super) fn handle_auth_failure(&mut self) {
        if self.session.is_some() {
            self.force_logout(Some("Your session has expired. Sign in again.".into()));
        }
    }

    /// The single logout path: drop the persisted token, reset every screen
    /// and land on the login card, optionally with a notice explaining why.
    pub(super) fn force_logout(&mut self, notice: Option<String>) {
        if let Err(err) = self.store.clear() {
            error!("failed to clear stored session: {err:#}");
        }
        self.session = None;
        self.posts = PostsState::default();
        self.students = RosterState::new(Role::Aluno);
        self.teachers = RosterState::new(Role::Professor);
        self.login = LoginState::default();
        self.login.error = notice;
        self.view = ViewState::Login;
    }

    pub(super) fn logout(&mut self) {
        self.force_logout(None);
        self.info_banner = Some("Signed out.".into());
    }
}
