use crate::models::{Page, Person, Post, Role, Searchable};

/// Which screen the central panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Login,
    Posts,
    Roster(Role),
}

/// How many rows a roster page requests.
pub const PAGE_SIZE: usize = 10;

/// Accumulated list state shared by every listed resource. Exactly one fetch
/// may be in flight at a time (`loading`); results are tagged with
/// `generation` so anything that finishes after a reset or logout is dropped
/// instead of resurrecting stale rows.
pub struct ListState<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<String>,
    generation: u64,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            has_more: false,
            loading: false,
            error: None,
            generation: 0,
        }
    }
}

impl<T> ListState<T> {
    /// Marks a fetch as started and returns its generation tag, or `None`
    /// when one is already running.
    pub fn begin(&mut self) -> Option<u64> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.error = None;
        self.generation += 1;
        Some(self.generation)
    }

    pub fn apply_page(&mut self, generation: u64, page: Page<T>, replace: bool, page_index: u32) {
        if generation != self.generation {
            return;
        }
        self.loading = false;
        self.error = None;
        if replace {
            self.items = page.items;
        } else {
            self.items.extend(page.items);
        }
        self.page = page_index;
        self.has_more = !page.is_last;
    }

    /// Accumulated rows stay untouched on failure.
    pub fn fail(&mut self, generation: u64, message: String) {
        if generation != self.generation {
            return;
        }
        self.loading = false;
        self.error = Some(message);
    }

    pub fn reset(&mut self) {
        self.items.clear();
        self.page = 0;
        self.has_more = false;
        self.loading = false;
        self.error = None;
        self.generation += 1;
    }
}

/// Case-insensitive substring filter over the accumulated rows. A blank
/// query returns everything in order; the server is never consulted.
pub fn filter_rows<'a, T: Searchable>(rows: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows.iter().collect();
    }
    rows.iter()
        .filter(|row| {
            row.search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Sign-in card state; doubles as the registration form when `register` is
/// toggled on.
pub struct LoginState {
    pub username: String,
    pub password: String,
    pub register: bool,
    pub role: Role,
    pub name: String,
    pub birth: String,
    pub email: String,
    pub submitting: bool,
    pub error: Option<String>,
}

impl Default for LoginState {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            register: false,
            role: Role::Aluno,
            name: String::new(),
            birth: String::new(),
            email: String::new(),
            submitting: false,
            error: None,
        }
    }
}

#[derive(Default)]
pub struct PersonFormState {
    pub open: bool,
    /// `user_id` of the person under edit; `None` means create.
    pub editing_id: Option<i64>,
    pub name: String,
    pub email: String,
    pub birth: String,
    pub username: String,
    pub password: String,
    pub submitting: bool,
    pub error: Option<String>,
}

impl PersonFormState {
    pub fn open_for_create(&mut self) {
        *self = Self::default();
        self.open = true;
    }

    /// The password box always starts blank, including on edit.
    pub fn open_for_edit(&mut self, person: &Person) {
        *self = Self::default();
        self.open = true;
        self.editing_id = Some(person.user_id);
        self.name = person.name.clone();
        self.email = person.email.clone();
        self.birth = crate::models::birth_to_display(&person.birth);
        self.username = person.username.clone();
    }

    /// Names of the required fields that are still blank. The password only
    /// counts when creating.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.birth.trim().is_empty() {
            missing.push("birth date");
        }
        if self.username.trim().is_empty() {
            missing.push("username");
        }
        if self.editing_id.is_none() && self.password.trim().is_empty() {
            missing.push("password");
        }
        missing
    }
}

#[derive(Default)]
pub struct PostFormState {
    pub open: bool,
    pub editing_id: Option<String>,
    pub title: String,
    pub subject: String,
    pub content: String,
    pub submitting: bool,
    pub error: Option<String>,
}

impl PostFormState {
    pub fn open_for_create(&mut self) {
        *self = Self::default();
        self.open = true;
    }

    pub fn open_for_edit(&mut self, post: &Post) {
        *self = Self::default();
        self.open = true;
        self.editing_id = Some(post.id.clone());
        self.title = post.title.clone();
        self.subject = post.subject.clone();
        self.content = post.content.clone();
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.subject.trim().is_empty() {
            missing.push("subject");
        }
        if self.content.trim().is_empty() {
            missing.push("content");
        }
        missing
    }
}

#[derive(Default)]
pub struct PostsState {
    pub list: ListState<Post>,
    pub search: String,
    pub form: PostFormState,
    pub pending_delete: Option<Post>,
}

/// One roster screen; instantiated once for students and once for teachers.
pub struct RosterState {
    pub role: Role,
    pub list: ListState<Person>,
    pub search: String,
    pub form: PersonFormState,
    pub pending_delete: Option<Person>,
}

impl RosterState {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            list: ListState::default(),
            search: String::new(),
            form: PersonFormState::default(),
            pending_delete: None,
        }
    }
}
