pub const USERNAME_MIN: usize = 3;
pub const PASSWORD_MIN: usize = 6;

pub const NOTE_TITLE_MAX: usize = 200;
pub const NOTE_CONTENT_MAX: usize = 5000;

pub const TODO_TITLE_MAX: usize = 255;
pub const TODO_DESCRIPTION_MAX: usize = 1000;

pub static HEADER_AUTHORIZATION: &'static str = "Authorization";
pub static HEADER_CONTENT_TYPE: &'static str = "Content-Type";
pub static CONTENT_TYPE_JSON: &'static str = "application/json";

pub static META_API_BASE: &'static str = "api-base";

/// Endpoints and storage keys of one application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiProfile {
    pub base_url: &'static str,
    pub register: &'static str,
    pub login: &'static str,
    /// Identity check used to revalidate a restored token.
    pub me: Option<&'static str>,
    pub collection: &'static str,
    pub token_key: &'static str,
    /// When set, the user object is persisted next to the token.
    pub user_key: Option<&'static str>,
    pub collect_email: bool,
    pub confirm_password: bool,
    /// Drop a fresh session when its first list fails for any reason.
    pub logout_on_list_failure: bool,
}

pub static NOTES_PROFILE: ApiProfile = ApiProfile {
    base_url: "http://localhost:8000",
    register: "/api/register",
    login: "/api/login",
    me: Some("/api/me"),
    collection: "/api/notes",
    token_key: "auth_token",
    user_key: None,
    collect_email: false,
    confirm_password: true,
    logout_on_list_failure: true,
};

pub static TODO_PROFILE: ApiProfile = ApiProfile {
    base_url: "",
    register: "/api/auth/register",
    login: "/api/auth/login",
    me: None,
    collection: "/api/todos",
    token_key: "token",
    user_key: Some("user"),
    collect_email: true,
    confirm_password: false,
    logout_on_list_failure: false,
};
