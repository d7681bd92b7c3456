use eframe::egui::{self, Align2, Color32, Context};

use crate::models::Role;

use super::super::state::{PersonFormState, PostFormState};
use super::super::AcademyApp;

impl AcademyApp {
    pub(crate) fn render_post_form_dialog(&mut self, ctx: &Context) {
        if !self.posts.form.open {
            return;
        }

        let mut submit = false;
        let mut cancel = false;
        let title = if self.posts.form.editing_id.is_some() {
            "Edit post"
        } else {
            "New post"
        };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .default_width(420.0)
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                if let Some(err) = &self.posts.form.error {
                    ui.colored_label(Color32::LIGHT_RED, err);
                }
                ui.label("Title");
                ui.text_edit_singleline(&mut self.posts.form.title);
                ui.label("Subject");
                ui.text_edit_singleline(&mut self.posts.form.subject);
                ui.label("Content");
                ui.add(
                    egui::TextEdit::multiline(&mut self.posts.form.content)
                        .desired_rows(6)
                        .hint_text("Write the article..."),
                );
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if self.posts.form.submitting {
                        ui.add(egui::Spinner::new());
                    } else if ui.button("Save").clicked() {
                        submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if submit {
            self.spawn_save_post();
        }
        if cancel {
            self.posts.form = PostFormState::default();
        }
    }

    pub(crate) fn render_post_delete_dialog(&mut self, ctx: &Context) {
        let Some(title) = self
            .posts
            .pending_delete
            .as_ref()
            .map(|post| post.title.clone())
        else {
            return;
        };

        let mut confirm = false;
        let mut cancel = false;

        egui::Window::new("Delete post")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(format!("Delete \"{title}\"?"));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        confirm = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if confirm {
            self.confirm_delete_post();
        }
        if cancel {
            self.cancel_delete_post();
        }
    }

    pub(crate) fn render_person_form_dialog(&mut self, ctx: &Context, role: Role) {
        if !self.roster_mut(role).form.open {
            return;
        }

        let mut submit = false;
        let mut cancel = false;

        let roster = self.roster_mut(role);
        let title = if roster.form.editing_id.is_some() {
            format!("Edit {}", role.singular_label())
        } else {
            format!("New {}", role.singular_label())
        };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .default_width(420.0)
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                if let Some(err) = &roster.form.error {
                    ui.colored_label(Color32::LIGHT_RED, err);
                }
                ui.label("Full name");
                ui.text_edit_singleline(&mut roster.form.name);
                ui.label("Email");
                ui.add(
                    egui::TextEdit::singleline(&mut roster.form.email)
                        .hint_text("someone@mail.com"),
                );
                ui.label("Birth date");
                ui.add(
                    egui::TextEdit::singleline(&mut roster.form.birth).hint_text("DD/MM/YYYY"),
                );
                ui.label("Username");
                ui.text_edit_singleline(&mut roster.form.username);
                if roster.form.editing_id.is_none() {
                    ui.label("Password");
                    ui.add(
                        egui::TextEdit::singleline(&mut roster.form.password).password(true),
                    );
                }
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if roster.form.submitting {
                        ui.add(egui::Spinner::new());
                    } else if ui.button("Save").clicked() {
                        submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if submit {
            self.spawn_save_person(role);
        }
        if cancel {
            self.roster_mut(role).form = PersonFormState::default();
        }
    }

    pub(crate) fn render_person_delete_dialog(&mut self, ctx: &Context, role: Role) {
        let Some(name) = self
            .roster_mut(role)
            .pending_delete
            .as_ref()
            .map(|person| person.name.clone())
        else {
            return;
        };

        let mut confirm = false;
        let mut cancel = false;

        egui::Window::new(format!("Delete {}", role.singular_label()))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(format!("Remove \"{name}\" from the roster?"));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        confirm = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if confirm {
            self.confirm_delete_person(role);
        }
        if cancel {
            self.cancel_delete_person(role);
        }
    }
}
