use crate::api::ApiError;
use crate::models::{Page, Person, Post, Role, SigninResponse};

use super::AcademyApp;

/// Results coming back from the worker threads. Every variant carries the
/// `Result` of exactly one backend call; the pump below routes it to the
/// matching handler.
pub enum AppMessage {
    SignedIn(Result<SigninResponse, ApiError>),
    Registered(Result<(), ApiError>),
    PostsLoaded {
        generation: u64,
        result: Result<Vec<Post>, ApiError>,
    },
    PostSaved(Result<(), ApiError>),
    PostDeleted(Result<(), ApiError>),
    PersonsLoaded {
        role: Role,
        generation: u64,
        page_index: u32,
        replace: bool,
        result: Result<Page<Person>, ApiError>,
    },
    PersonSaved {
        role: Role,
        result: Result<(), ApiError>,
    },
    PersonDeleted {
        role: Role,
        result: Result<(), ApiError>,
    },
}

pub(super) fn process_messages(app: &mut AcademyApp) {
    while let Ok(message) = app.rx.try_recv() {
        match message {
            AppMessage::SignedIn(result) => app.handle_signed_in(result),
            AppMessage::Registered(result) => app.handle_registered(result),
            AppMessage::PostsLoaded { generation, result } => {
                app.handle_posts_loaded(generation, result)
            }
            AppMessage::PostSaved(result) => app.handle_post_saved(result),
            AppMessage::PostDeleted(result) => app.handle_post_deleted(result),
            AppMessage::PersonsLoaded {
                role,
                generation,
                page_index,
                replace,
                result,
            } => app.handle_persons_loaded(role, generation, page_index, replace, result),
            AppMessage::PersonSaved { role, result } => app.handle_person_saved(role, result),
            AppMessage::PersonDeleted { role, result } => app.handle_person_deleted(role, result),
        }
    }
}
