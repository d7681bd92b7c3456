use std::sync::mpsc::Sender;
use std::thread;

use log::error;

use crate::api::ApiClient;
use crate::models::{CreatePersonPayload, PostPayload, Role, UpdatePersonPayload};

use super::messages::AppMessage;

/// Create vs. update is decided by which payload the form produced; the
/// worker just issues the matching verb.
pub enum PersonSaveRequest {
    Create(CreatePersonPayload),
    Update {
        user_id: i64,
        payload: UpdatePersonPayload,
    },
}

pub fn signin(api: ApiClient, tx: Sender<AppMessage>, username: String, password: String) {
    thread::spawn(move || {
        let result = api.signin(&username, &password);
        if tx.send(AppMessage::SignedIn(result)).is_err() {
            error!("failed to send SignedIn message");
        }
    });
}

pub fn register(api: ApiClient, tx: Sender<AppMessage>, payload: CreatePersonPayload) {
    thread::spawn(move || {
        let result = api.register(&payload);
        if tx.send(AppMessage::Registered(result)).is_err() {
            error!("failed to send Registered message");
        }
    });
}

pub fn load_posts(api: ApiClient, tx: Sender<AppMessage>, token: String, generation: u64) {
    thread::spawn(move || {
        let result = api.list_posts(&token);
        if tx.send(AppMessage::PostsLoaded { generation, result }).is_err() {
            error!("failed to send PostsLoaded message");
        }
    });
}

pub fn save_post(
    api: ApiClient,
    tx: Sender<AppMessage>,
    token: String,
    editing_id: Option<String>,
    payload: PostPayload,
) {
    thread::spawn(move || {
        let result = match editing_id {
            Some(post_id) => api.update_post(&token, &post_id, &payload),
            None => api.create_post(&token, &payload),
        };
        if tx.send(AppMessage::PostSaved(result)).is_err() {
            error!("failed to send PostSaved message");
        }
    });
}

pub fn delete_post(api: ApiClient, tx: Sender<AppMessage>, token: String, post_id: String) {
    thread::spawn(move || {
        let result = api.delete_post(&token, &post_id);
        if tx.send(AppMessage::PostDeleted(result)).is_err() {
            error!("failed to send PostDeleted message");
        }
    });
}

pub fn load_persons(
    api: ApiClient,
    tx: Sender<AppMessage>,
    token: String,
    role: Role,
    page_index: u32,
    size: usize,
    replace: bool,
    generation: u64,
) {
    thread::spawn(move || {
        let result = api.list_persons(&token, role, page_index, size);
        let message = AppMessage::PersonsLoaded {
            role,
            generation,
            page_index,
            replace,
            result,
        };
        if tx.send(message).is_err() {
            error!("failed to send PersonsLoaded message");
        }
    });
}

pub fn save_person(
    api: ApiClient,
    tx: Sender<AppMessage>,
    token: String,
    role: Role,
    request: PersonSaveRequest,
) {
    thread::spawn(move || {
        let result = match request {
            PersonSaveRequest::Create(payload) => api.create_person(&token, &payload),
            PersonSaveRequest::Update { user_id, payload } => {
                api.update_person(&token, user_id, &payload)
            }
        };
        if tx.send(AppMessage::PersonSaved { role, result }).is_err() {
            error!("failed to send PersonSaved message");
        }
    });
}

pub fn delete_person(
    api: ApiClient,
    tx: Sender<AppMessage>,
    token: String,
    role: Role,
    user_id: i64,
) {
    thread::spawn(move || {
        let result = api.delete_person(&token, user_id);
        if tx.send(AppMessage::PersonDeleted { role, result }).is_err() {
            error!("failed to send PersonDeleted message");
        }
    });
}
