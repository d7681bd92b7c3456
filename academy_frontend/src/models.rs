use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Roles recognized by the backend. The wire strings are part of the REST
/// contract and appear both in payloads and in the `/person/role/{ROLE}`
/// path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "PROFESSOR")]
    Professor,
    #[serde(rename = "ALUNO")]
    Aluno,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Professor => "PROFESSOR",
            Role::Aluno => "ALUNO",
        }
    }

    pub fn plural_label(&self) -> &'static str {
        match self {
            Role::Professor => "Teachers",
            Role::Aluno => "Students",
        }
    }

    pub fn singular_label(&self) -> &'static str {
        match self {
            Role::Professor => "teacher",
            Role::Aluno => "student",
        }
    }
}

/// A student or teacher as returned by the roster endpoints.
///
/// `id` keys list rows; `user_id` is the identifier the mutation endpoints
/// expect. Both come from the backend and are kept verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub birth: String,
    pub username: String,
    #[serde(default)]
    pub role: Option<Role>,
}

/// A blog post. `createdat`/`updatedat` are the backend's field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub subject: String,
    #[serde(default)]
    pub createdat: String,
    #[serde(default)]
    pub updatedat: String,
    #[serde(default)]
    pub author_id: Option<i64>,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SigninRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SigninResponse {
    pub token: String,
    #[serde(default, deserialize_with = "id_as_string")]
    pub id: Option<String>,
}

/// Payload for POST /user (self-registration and admin create). The password
/// is only serialized when present.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePersonPayload {
    pub name: String,
    pub email: String,
    pub birth: String,
    pub username: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Payload for PUT /user/{id}. Deliberately has no password field.
#[derive(Debug, Clone, Serialize)]
pub struct UpdatePersonPayload {
    pub username: String,
    pub role: Role,
    pub name: String,
    pub birth: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostPayload {
    pub title: String,
    pub subject: String,
    pub content: String,
    pub author_id: i64,
}

/// One page of a listed resource, normalized from whatever shape the backend
/// chose to answer with.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub is_last: bool,
}

/// Accepts either a raw JSON array or a `{content: [...], last: bool}`
/// envelope. When the envelope carries no `last` flag, a page shorter than
/// the requested size counts as the final one.
pub fn normalize_page<T: DeserializeOwned>(
    value: serde_json::Value,
    requested_size: usize,
) -> Result<Page<T>, serde_json::Error> {
    let (raw_items, last_flag) = match value {
        serde_json::Value::Array(items) => (items, None),
        serde_json::Value::Object(mut map) => {
            let last_flag = map.get("last").and_then(serde_json::Value::as_bool);
            let raw_items = match map.remove("content") {
                Some(serde_json::Value::Array(items)) => items,
                _ => Vec::new(),
            };
            (raw_items, last_flag)
        }
        _ => (Vec::new(), None),
    };

    let items = raw_items
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<T>, _>>()?;
    let is_last = last_flag.unwrap_or(items.len() < requested_size);
    Ok(Page { items, is_last })
}

/// Accepts either a raw JSON array or a `{posts: [...]}` wrapper.
pub fn normalize_posts(value: serde_json::Value) -> Result<Vec<Post>, serde_json::Error> {
    let raw_items = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => match map.remove("posts") {
            Some(serde_json::Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    raw_items.into_iter().map(serde_json::from_value).collect()
}

/// `YYYY-MM-DD` (optionally with a trailing `T...` timestamp) to the
/// `DD/MM/YYYY` form shown in the UI. Unparseable input is passed through.
pub fn birth_to_display(wire: &str) -> String {
    if wire.is_empty() {
        return String::new();
    }
    let clean = wire.split('T').next().unwrap_or(wire);
    match NaiveDate::parse_from_str(clean, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => clean.to_string(),
    }
}

/// `DD/MM/YYYY` back to the `YYYY-MM-DD` wire form. Input that is not a
/// valid display date is passed through for the backend to reject.
pub fn birth_to_wire(display: &str) -> String {
    if !display.contains('/') {
        return display.to_string();
    }
    match NaiveDate::parse_from_str(display.trim(), "%d/%m/%Y") {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => display.to_string(),
    }
}

/// Text fields the client-side search box matches against.
pub trait Searchable {
    fn search_fields(&self) -> [&str; 3];
}

impl Searchable for Post {
    fn search_fields(&self) -> [&str; 3] {
        [&self.title, &self.content, &self.subject]
    }
}

impl Searchable for Person {
    fn search_fields(&self) -> [&str; 3] {
        [&self.name, &self.email, &self.username]
    }
}

fn id_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    // The backend has returned the user id both as a number and as a string.
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_person(id: i64) -> serde_json::Value {
        json!({
            "id": id,
            "user_id": id + 100,
            "name": format!("Person {id}"),
            "email": format!("person{id}@mail.com"),
            "birth": "2000-01-02",
            "username": format!("person{id}"),
            "role": "ALUNO"
        })
    }

    #[test]
    fn birth_round_trips_between_display_and_wire() {
        assert_eq!(birth_to_wire(&birth_to_display("1999-12-31")), "1999-12-31");
        assert_eq!(birth_to_display(&birth_to_wire("31/12/1999")), "31/12/1999");
    }

    #[test]
    fn birth_display_strips_timestamp_suffix() {
        assert_eq!(birth_to_display("2001-05-13T00:00:00.000Z"), "13/05/2001");
    }

    #[test]
    fn birth_helpers_pass_through_unparseable_input() {
        assert_eq!(birth_to_display("soon"), "soon");
        assert_eq!(birth_to_wire("99/99/9999"), "99/99/9999");
        assert_eq!(birth_to_display(""), "");
        assert_eq!(birth_to_wire(""), "");
    }

    #[test]
    fn normalize_page_accepts_raw_arrays() {
        let value = json!([sample_person(1), sample_person(2)]);
        let page: Page<Person> = normalize_page(value, 10).expect("valid page");
        assert_eq!(page.items.len(), 2);
        // Two rows against a requested size of ten means the listing is done.
        assert!(page.is_last);
    }

    #[test]
    fn normalize_page_reads_content_and_last() {
        let value = json!({
            "content": [sample_person(1)],
            "last": false,
            "totalElements": 42
        });
        let page: Page<Person> = normalize_page(value, 10).expect("valid page");
        assert_eq!(page.items.len(), 1);
        assert!(!page.is_last);
    }

    #[test]
    fn normalize_page_full_page_without_last_flag_has_more() {
        let rows: Vec<_> = (0..10).map(sample_person).collect();
        let page: Page<Person> = normalize_page(json!(rows), 10).expect("valid page");
        assert!(!page.is_last);
    }

    #[test]
    fn normalize_posts_accepts_array_and_wrapper() {
        let post = json!({
            "id": "p1",
            "title": "Intro",
            "content": "Welcome",
            "subject": "math",
            "createdat": "2024-01-01T10:00:00Z",
            "updatedat": "2024-01-02T10:00:00Z",
            "author_id": 7
        });
        let from_array = normalize_posts(json!([post.clone()])).expect("array shape");
        let from_wrapper = normalize_posts(json!({ "posts": [post] })).expect("wrapper shape");
        assert_eq!(from_array.len(), 1);
        assert_eq!(from_wrapper.len(), 1);
        assert_eq!(from_array[0].id, from_wrapper[0].id);
    }

    #[test]
    fn signin_id_tolerates_number_and_string() {
        let numeric: SigninResponse =
            serde_json::from_value(json!({"token": "t", "id": 7})).unwrap();
        let text: SigninResponse =
            serde_json::from_value(json!({"token": "t", "id": "7"})).unwrap();
        let absent: SigninResponse = serde_json::from_value(json!({"token": "t"})).unwrap();
        assert_eq!(numeric.id.as_deref(), Some("7"));
        assert_eq!(text.id.as_deref(), Some("7"));
        assert_eq!(absent.id, None);
    }

    #[test]
    fn update_payload_never_serializes_a_password() {
        let payload = UpdatePersonPayload {
            username: "ana".into(),
            role: Role::Aluno,
            name: "Ana".into(),
            birth: "2000-01-02".into(),
            email: "ana@mail.com".into(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["role"], "ALUNO");
    }

    #[test]
    fn create_payload_includes_password_only_when_present() {
        let mut payload = CreatePersonPayload {
            name: "Ana".into(),
            email: "ana@mail.com".into(),
            birth: "2000-01-02".into(),
            username: "ana".into(),
            role: Role::Professor,
            password: None,
        };
        let without = serde_json::to_value(&payload).unwrap();
        assert!(without.get("password").is_none());

        payload.password = Some("secret".into());
        let with = serde_json::to_value(&payload).unwrap();
        assert_eq!(with["password"], "secret");
        assert_eq!(with["role"], "PROFESSOR");
    }
}
