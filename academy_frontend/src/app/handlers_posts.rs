use crate::api::ApiError;
use crate::models::{Page, Post};

use super::state::PostFormState;
use super::AcademyApp;

impl AcademyApp {
    pub(super) fn handle_posts_loaded(
        &mut self,
        generation: u64,
        result: Result<Vec<Post>, ApiError>,
    ) {
        match result {
            Ok(posts) => {
                // The posts endpoint is unpaginated; every fetch replaces.
                let page = Page {
                    items: posts,
                    is_last: true,
                };
                self.posts.list.apply_page(generation, page, true, 0);
            }
            Err(err) if err.is_auth_error() => {
                self.handle_auth_failure();
            }
            Err(err) => {
                self.posts.list.fail(generation, err.to_string());
            }
        }
    }

    pub(super) fn handle_post_saved(&mut self, result: Result<(), ApiError>) {
        self.posts.form.submitting = false;
        match result {
            Ok(()) => {
                self.posts.form = PostFormState::default();
                self.info_banner = Some("Post saved.".into());
                self.spawn_load_posts();
            }
            Err(err) if err.is_auth_error() => {
                self.handle_auth_failure();
            }
            Err(err) => {
                self.posts.form.error = Some(err.to_string());
            }
        }
    }

    pub(super) fn handle_post_deleted(&mut self, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                self.info_banner = Some("Post deleted.".into());
                self.spawn_load_posts();
            }
            Err(err) if err.is_auth_error() => {
                self.handle_auth_failure();
            }
            Err(err) => {
                self.posts.list.error = Some(err.to_string());
            }
        }
    }
}
