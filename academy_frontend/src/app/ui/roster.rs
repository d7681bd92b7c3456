use eframe::egui::{self, Color32, RichText};

use crate::models::{birth_to_display, Person, Role};

use super::super::state::filter_rows;
use super::super::AcademyApp;

impl AcademyApp {
    pub(crate) fn render_roster(&mut self, ui: &mut egui::Ui, role: Role) {
        ui.heading(role.plural_label());
        ui.label(
            RichText::new(match role {
                Role::Aluno => "Student roster",
                Role::Professor => "Teaching staff",
            })
            .weak(),
        );
        ui.add_space(8.0);

        let mut open_create = false;
        let mut refresh = false;
        let mut load_more = false;
        let mut edit_target: Option<Person> = None;
        let mut delete_target: Option<Person> = None;

        let roster = self.roster_mut(role);

        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut roster.search)
                    .hint_text(format!("Search {}", role.plural_label().to_lowercase())),
            );
            if ui.button("Add").clicked() {
                open_create = true;
            }
            if ui.button("Refresh").clicked() {
                refresh = true;
            }
        });
        ui.add_space(8.0);

        if roster.list.loading && roster.list.items.is_empty() {
            ui.add(egui::Spinner::new());
        }
        if let Some(err) = &roster.list.error {
            ui.colored_label(Color32::LIGHT_RED, err);
            if ui.button("Retry").clicked() {
                refresh = true;
            }
            ui.separator();
        }

        let rows = filter_rows(&roster.list.items, &roster.search);
        if rows.is_empty() && !roster.list.loading {
            ui.label(format!("No {} found.", role.plural_label().to_lowercase()));
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            for person in &rows {
                egui::Frame::group(ui.style())
                    .fill(ui.visuals().extreme_bg_color)
                    .inner_margin(egui::vec2(12.0, 8.0))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&person.name).strong().size(16.0));
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.button("Delete").clicked() {
                                        delete_target = Some((*person).clone());
                                    }
                                    if ui.button("Edit").clicked() {
                                        edit_target = Some((*person).clone());
                                    }
                                },
                            );
                        });
                        ui.label(
                            RichText::new(&person.email)
                                .small()
                                .color(Color32::from_rgb(96, 165, 250)),
                        );
                        ui.label(format!("Username: {}", person.username));
                        ui.label(format!("Born: {}", birth_to_display(&person.birth)));
                    });
                ui.add_space(8.0);
            }

            if roster.list.has_more {
                ui.add_space(4.0);
                if roster.list.loading {
                    ui.add(egui::Spinner::new());
                } else if ui.button("Load more").clicked() {
                    load_more = true;
                }
            }
        });

        if open_create {
            self.roster_mut(role).form.open_for_create();
        }
        if refresh {
            self.spawn_load_persons(role, 0, true);
        }
        if load_more {
            self.spawn_load_more_persons(role);
        }
        if let Some(person) = edit_target {
            self.roster_mut(role).form.open_for_edit(&person);
        }
        if let Some(person) = delete_target {
            self.request_delete_person(role, person);
        }
    }
}
