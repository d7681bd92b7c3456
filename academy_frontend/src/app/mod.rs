use std::sync::mpsc::{self, Receiver, Sender};

use chrono::{DateTime, Utc};
use eframe::egui::{self, Context, RichText};
use log::error;

use crate::api::ApiClient;
use crate::models::Role;
use crate::session::{Session, SessionStore};

mod handlers_people;
mod handlers_posts;
mod handlers_session;
mod messages;
mod spawners;
mod state;
mod tasks;
mod ui;

use messages::AppMessage;
use state::{LoginState, PostsState, RosterState, ViewState};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

pub struct AcademyApp {
    api: ApiClient,
    store: SessionStore,
    session: Option<Session>,
    tx: Sender<AppMessage>,
    rx: Receiver<AppMessage>,
    view: ViewState,
    login: LoginState,
    posts: PostsState,
    students: RosterState,
    teachers: RosterState,
    base_url_input: String,
    info_banner: Option<String>,
}

impl AcademyApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let default_url =
            std::env::var("ACADEMY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api = ApiClient::new(default_url).unwrap_or_else(|err| {
            error!("failed to initialise API client: {err}");
            ApiClient::new(DEFAULT_API_URL).expect("fallback API client")
        });
        Self::with_parts(api, SessionStore::open())
    }

    fn with_parts(api: ApiClient, store: SessionStore) -> Self {
        let (tx, rx) = mpsc::channel();
        let session = store.get();
        let view = if session.is_some() {
            ViewState::Posts
        } else {
            ViewState::Login
        };
        let base_url_input = api.base_url().to_string();
        let mut app = Self {
            api,
            store,
            session,
            tx,
            rx,
            view,
            login: LoginState::default(),
            posts: PostsState::default(),
            students: RosterState::new(Role::Aluno),
            teachers: RosterState::new(Role::Professor),
            base_url_input,
            info_banner: None,
        };
        if app.session.is_some() {
            app.spawn_load_posts();
        }
        app
    }

    fn process_messages(&mut self) {
        messages::process_messages(self);
    }

    fn open_posts(&mut self) {
        self.view = ViewState::Posts;
        self.spawn_load_posts();
    }

    fn open_roster(&mut self, role: Role) {
        self.view = ViewState::Roster(role);
        self.spawn_load_persons(role, 0, true);
    }

    fn render_top_bar(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Blog Academy").strong().size(18.0));
                ui.separator();
                if self.session.is_some() {
                    if ui
                        .selectable_label(self.view == ViewState::Posts, "Posts")
                        .clicked()
                    {
                        self.open_posts();
                    }
                    if ui
                        .selectable_label(self.view == ViewState::Roster(Role::Aluno), "Students")
                        .clicked()
                    {
                        self.open_roster(Role::Aluno);
                    }
                    if ui
                        .selectable_label(
                            self.view == ViewState::Roster(Role::Professor),
                            "Teachers",
                        )
                        .clicked()
                    {
                        self.open_roster(Role::Professor);
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Sign out").clicked() {
                            self.logout();
                        }
                    });
                } else {
                    ui.label("API server");
                    ui.text_edit_singleline(&mut self.base_url_input);
                    if ui.button("Apply").clicked() {
                        match self.api.set_base_url(self.base_url_input.clone()) {
                            Ok(()) => {
                                self.info_banner = Some("API URL updated".into());
                            }
                            Err(err) => {
                                self.info_banner = Some(format!("Failed to update URL: {err}"));
                            }
                        }
                    }
                }
            });

            if let Some(message) = self.info_banner.clone() {
                let mut dismiss = false;
                egui::Frame::group(ui.style())
                    .fill(ui.visuals().extreme_bg_color)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(message.as_str());
                            if ui.button("Dismiss").clicked() {
                                dismiss = true;
                            }
                        });
                    });
                if dismiss {
                    self.info_banner = None;
                }
            }
        });
    }
}

impl eframe::App for AcademyApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.process_messages();
        self.render_top_bar(ctx);

        match self.view {
            ViewState::Login => {
                egui::CentralPanel::default().show(ctx, |ui| self.render_login(ui));
            }
            ViewState::Posts => {
                egui::CentralPanel::default().show(ctx, |ui| self.render_posts(ui));
                self.render_post_form_dialog(ctx);
                self.render_post_delete_dialog(ctx);
            }
            ViewState::Roster(role) => {
                egui::CentralPanel::default().show(ctx, |ui| self.render_roster(ui, role));
                self.render_person_form_dialog(ctx, role);
                self.render_person_delete_dialog(ctx, role);
            }
        }
    }
}

fn format_timestamp(ts: &str) -> String {
    DateTime::parse_from_rfc3339(ts)
        .map(|dt| {
            dt.with_timezone(&Utc)
                .format("%Y-%m-%d %H:%M UTC")
                .to_string()
        })
        .unwrap_or_else(|_| ts.to_string())
}
