use eframe::egui::{self, Color32, RichText};

use crate::models::Role;

use super::super::state::LoginState;
use super::super::AcademyApp;

impl AcademyApp {
    pub(crate) fn render_login(&mut self, ui: &mut egui::Ui) {
        let mut submit = false;
        let mut toggle = false;

        ui.vertical_centered(|ui| {
            ui.add_space(32.0);
            ui.set_max_width(360.0);

            ui.heading(if self.login.register {
                "Create account"
            } else {
                "Sign in"
            });
            ui.label(
                RichText::new(if self.login.register {
                    "Create your account to join Blog Academy."
                } else {
                    "Welcome back!"
                })
                .weak(),
            );
            ui.add_space(12.0);

            if let Some(err) = &self.login.error {
                ui.colored_label(Color32::LIGHT_RED, err);
                ui.add_space(6.0);
            }

            if self.login.register {
                ui.label("Account type");
                ui.horizontal(|ui| {
                    if ui
                        .selectable_label(self.login.role == Role::Professor, "PROFESSOR")
                        .clicked()
                    {
                        self.login.role = Role::Professor;
                    }
                    if ui
                        .selectable_label(self.login.role == Role::Aluno, "ALUNO")
                        .clicked()
                    {
                        self.login.role = Role::Aluno;
                    }
                });
                ui.add_space(6.0);

                ui.label("Full name");
                ui.text_edit_singleline(&mut self.login.name);
                ui.label("Birth date");
                ui.add(
                    egui::TextEdit::singleline(&mut self.login.birth).hint_text("DD/MM/YYYY"),
                );
                ui.label("Email");
                ui.text_edit_singleline(&mut self.login.email);
                ui.add_space(6.0);
            }

            ui.label("Username");
            ui.text_edit_singleline(&mut self.login.username);
            ui.label("Password");
            ui.add(egui::TextEdit::singleline(&mut self.login.password).password(true));
            ui.add_space(12.0);

            if self.login.submitting {
                ui.add(egui::Spinner::new());
            } else if ui
                .button(if self.login.register {
                    "Create account"
                } else {
                    "Sign in"
                })
                .clicked()
            {
                submit = true;
            }
            ui.add_space(8.0);
            if ui
                .link(if self.login.register {
                    "Already have an account? Sign in"
                } else {
                    "No account yet? Register"
                })
                .clicked()
            {
                toggle = true;
            }
        });

        if submit {
            if self.login.register {
                self.spawn_register();
            } else {
                self.spawn_signin();
            }
        }
        if toggle {
            // Switching modes clears the form, like the card it replaces.
            let register = !self.login.register;
            self.login = LoginState::default();
            self.login.register = register;
        }
    }
}
