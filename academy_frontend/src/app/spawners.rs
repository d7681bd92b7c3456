use crate::api::ApiError;
use crate::models::{
    birth_to_wire, CreatePersonPayload, Person, Post, PostPayload, Role, UpdatePersonPayload,
};

use super::state::PAGE_SIZE;
use super::tasks::{self, PersonSaveRequest};
use super::AcademyApp;

impl AcademyApp {
    /// Fails the action locally when there is no session; no request leaves
    /// the machine without a token.
    fn require_token(&mut self) -> Option<String> {
        match self.session.as_ref() {
            Some(session) => Some(session.token.clone()),
            None => {
                self.force_logout(Some(ApiError::SessionMissing.to_string()));
                None
            }
        }
    }

    pub(super) fn spawn_signin(&mut self) {
        let username = self.login.username.trim().to_string();
        let password = self.login.password.clone();
        if username.is_empty() || password.is_empty() {
            self.login.error = Some("Enter your username and password.".into());
            return;
        }
        self.login.submitting = true;
        self.login.error = None;
        tasks::signin(self.api.clone(), self.tx.clone(), username, password);
    }

    pub(super) fn spawn_register(&mut self) {
        let username = self.login.username.trim().to_string();
        let password = self.login.password.clone();
        let name = self.login.name.trim().to_string();
        let email = self.login.email.trim().to_string();
        if username.is_empty() || password.is_empty() || name.is_empty() || email.is_empty() {
            self.login.error = Some("Fill in all required fields.".into());
            return;
        }
        let payload = CreatePersonPayload {
            name,
            email,
            birth: birth_to_wire(self.login.birth.trim()),
            username,
            role: self.login.role,
            password: Some(password),
        };
        self.login.submitting = true;
        self.login.error = None;
        tasks::register(self.api.clone(), self.tx.clone(), payload);
    }

    pub(super) fn spawn_load_posts(&mut self) {
        let Some(token) = self.require_token() else {
            return;
        };
        let Some(generation) = self.posts.list.begin() else {
            return;
        };
        tasks::load_posts(self.api.clone(), self.tx.clone(), token, generation);
    }

    pub(super) fn spawn_save_post(&mut self) {
        let missing = self.posts.form.missing_fields();
        if !missing.is_empty() {
            self.posts.form.error = Some(format!("Fill in: {}.", missing.join(", ")));
            return;
        }
        let Some(token) = self.require_token() else {
            return;
        };
        // Authorship comes from the id stored at signin.
        let author_id = self
            .session
            .as_ref()
            .and_then(|session| session.user_id.as_deref())
            .and_then(|id| id.parse::<i64>().ok());
        let Some(author_id) = author_id else {
            self.posts.form.error = Some("Session is incomplete. Sign in again.".into());
            return;
        };
        let payload = PostPayload {
            title: self.posts.form.title.trim().to_string(),
            subject: self.posts.form.subject.trim().to_string(),
            content: self.posts.form.content.trim().to_string(),
            author_id,
        };
        let editing_id = self.posts.form.editing_id.clone();
        self.posts.form.submitting = true;
        self.posts.form.error = None;
        tasks::save_post(self.api.clone(), self.tx.clone(), token, editing_id, payload);
    }

    pub(super) fn request_delete_post(&mut self, post: Post) {
        self.posts.pending_delete = Some(post);
    }

    pub(super) fn confirm_delete_post(&mut self) {
        let Some(post) = self.posts.pending_delete.take() else {
            return;
        };
        let Some(token) = self.require_token() else {
            return;
        };
        tasks::delete_post(self.api.clone(), self.tx.clone(), token, post.id);
    }

    pub(super) fn cancel_delete_post(&mut self) {
        self.posts.pending_delete = None;
    }

    pub(super) fn spawn_load_persons(&mut self, role: Role, page_index: u32, replace: bool) {
        let Some(token) = self.require_token() else {
            return;
        };
        let roster = self.roster_mut(role);
        if !replace && !roster.list.has_more {
            return;
        }
        let Some(generation) = roster.list.begin() else {
            return;
        };
        tasks::load_persons(
            self.api.clone(),
            self.tx.clone(),
            token,
            role,
            page_index,
            PAGE_SIZE,
            replace,
            generation,
        );
    }

    pub(super) fn spawn_load_more_persons(&mut self, role: Role) {
        let next_page = self.roster_mut(role).list.page + 1;
        self.spawn_load_persons(role, next_page, false);
    }

    pub(super) fn spawn_save_person(&mut self, role: Role) {
        let missing = self.roster_mut(role).form.missing_fields();
        if !missing.is_empty() {
            self.roster_mut(role).form.error =
                Some(format!("Fill in: {}.", missing.join(", ")));
            return;
        }
        let Some(token) = self.require_token() else {
            return;
        };
        let roster = self.roster_mut(role);
        let form = &roster.form;
        let request = match form.editing_id {
            Some(user_id) => PersonSaveRequest::Update {
                user_id,
                payload: UpdatePersonPayload {
                    username: form.username.trim().to_string(),
                    role,
                    name: form.name.trim().to_string(),
                    birth: birth_to_wire(form.birth.trim()),
                    email: form.email.trim().to_string(),
                },
            },
            None => {
                let password = form.password.trim();
                PersonSaveRequest::Create(CreatePersonPayload {
                    name: form.name.trim().to_string(),
                    email: form.email.trim().to_string(),
                    birth: birth_to_wire(form.birth.trim()),
                    username: form.username.trim().to_string(),
                    role,
                    password: (!password.is_empty()).then(|| password.to_string()),
                })
            }
        };
        roster.form.submitting = true;
        roster.form.error = None;
        tasks::save_person(self.api.clone(), self.tx.clone(), token, role, request);
    }

    pub(super) fn request_delete_person(&mut self, role: Role, person: Person) {
        self.roster_mut(role).pending_delete = Some(person);
    }

    pub(super) fn confirm_delete_person(&mut self, role: Role) {
        let Some(person) = self.roster_mut(role).pending_delete.take() else {
            return;
        };
        let Some(token) = self.require_token() else {
            return;
        };
        tasks::delete_person(
            self.api.clone(),
            self.tx.clone(),
            token,
            role,
            person.user_id,
        );
    }

    pub(super) fn cancel_delete_person(&mut self, role: Role) {
        self.roster_mut(role).pending_delete = None;
    }
}
