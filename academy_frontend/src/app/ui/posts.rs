use eframe::egui::{self, Color32, RichText};

use crate::models::Post;

use super::super::state::filter_rows;
use super::super::{format_timestamp, AcademyApp};

impl AcademyApp {
    pub(crate) fn render_posts(&mut self, ui: &mut egui::Ui) {
        ui.heading("Blog");
        ui.label(RichText::new("Latest updates").weak());
        ui.add_space(8.0);

        let mut open_create = false;
        let mut refresh = false;
        let mut edit_target: Option<Post> = None;
        let mut delete_target: Option<Post> = None;

        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.posts.search).hint_text("Search articles"),
            );
            if ui.button("New post").clicked() {
                open_create = true;
            }
            if ui.button("Refresh").clicked() {
                refresh = true;
            }
        });
        ui.add_space(8.0);

        if self.posts.list.loading && self.posts.list.items.is_empty() {
            ui.add(egui::Spinner::new());
        }
        if let Some(err) = &self.posts.list.error {
            ui.colored_label(Color32::LIGHT_RED, err);
            if ui.button("Retry").clicked() {
                refresh = true;
            }
            ui.separator();
        }

        let rows = filter_rows(&self.posts.list.items, &self.posts.search);
        if rows.is_empty() && !self.posts.list.loading {
            ui.label("No posts found.");
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            for post in &rows {
                egui::Frame::group(ui.style())
                    .fill(ui.visuals().extreme_bg_color)
                    .inner_margin(egui::vec2(12.0, 8.0))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&post.title).strong().size(18.0));
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.button("Delete").clicked() {
                                        delete_target = Some((*post).clone());
                                    }
                                    if ui.button("Edit").clicked() {
                                        edit_target = Some((*post).clone());
                                    }
                                },
                            );
                        });
                        ui.label(
                            RichText::new(post.subject.to_uppercase())
                                .small()
                                .color(Color32::from_rgb(96, 165, 250)),
                        );
                        ui.add_space(4.0);
                        ui.label(&post.content);
                        ui.add_space(4.0);
                        let mut footer = format_timestamp(&post.updatedat);
                        if let Some(author) = &post.author {
                            footer = format!("{footer} • {author}");
                        }
                        ui.label(RichText::new(footer).small().weak());
                    });
                ui.add_space(8.0);
            }
        });

        if open_create {
            self.posts.form.open_for_create();
        }
        if refresh {
            self.spawn_load_posts();
        }
        if let Some(post) = edit_target {
            self.posts.form.open_for_edit(&post);
        }
        if let Some(post) = delete_target {
            self.request_delete_post(post);
        }
    }
}
