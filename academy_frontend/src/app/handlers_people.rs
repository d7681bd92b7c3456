use crate::api::ApiError;
use crate::models::{Page, Person, Role};

use super::state::{PersonFormState, RosterState};
use super::AcademyApp;

impl AcademyApp {
    pub(super) fn roster_mut(&mut self, role: Role) -> &mut RosterState {
        match role {
            Role::Aluno => &mut self.students,
            Role::Professor => &mut self.teachers,
        }
    }

    pub(super) fn handle_persons_loaded(
        &mut self,
        role: Role,
        generation: u64,
        page_index: u32,
        replace: bool,
        result: Result<Page<Person>, ApiError>,
    ) {
        match result {
            Ok(page) => {
                self.roster_mut(role)
                    .list
                    .apply_page(generation, page, replace, page_index);
            }
            Err(err) if err.is_auth_error() => {
                self.handle_auth_failure();
            }
            Err(err) => {
                self.roster_mut(role).list.fail(generation, err.to_string());
            }
        }
    }

    pub(super) fn handle_person_saved(&mut self, role: Role, result: Result<(), ApiError>) {
        self.roster_mut(role).form.submitting = false;
        match result {
            Ok(()) => {
                let roster = self.roster_mut(role);
                roster.form = PersonFormState::default();
                self.info_banner = Some(format!("{} saved.", capitalized(role)));
                self.spawn_load_persons(role, 0, true);
            }
            Err(err) if err.is_auth_error() => {
                self.handle_auth_failure();
            }
            Err(err) => {
                self.roster_mut(role).form.error = Some(err.to_string());
            }
        }
    }

    pub(super) fn handle_person_deleted(&mut self, role: Role, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                self.info_banner = Some(format!("{} removed.", capitalized(role)));
                self.spawn_load_persons(role, 0, true);
            }
            Err(err) if err.is_auth_error() => {
                self.handle_auth_failure();
            }
            Err(err) => {
                self.roster_mut(role).list.error = Some(err.to_string());
            }
        }
    }
}

fn capitalized(role: Role) -> String {
    let label = role.singular_label();
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
