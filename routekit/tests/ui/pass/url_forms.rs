use routekit::{Presence, PresenceKind, Route};

pub struct UserPath {
    pub id: String,
}

pub struct FeedPath {
    pub page: u32,
}

fn user_url(p: &UserPath) -> String {
    format!("users/{}", p.id)
}

fn feed_url(p: Option<&FeedPath>) -> String {
    p.map(|p| format!("feed/{}", p.page))
        .unwrap_or_else(|| "feed".to_string())
}

fn version_url() -> String {
    "version".to_string()
}

#[derive(Route)]
#[route(name = "GET users", method = Get, url = "users", response = empty)]
pub struct Literal;

#[derive(Route)]
#[route(name = "GET health", method = GET, url = || "health".to_string(), response = empty)]
pub struct Computed;

#[derive(Route)]
#[route(name = "GET users/:id", method = get, response = empty)]
#[route(url = |p: &UserPath| format!("users/{}", p.id))]
pub struct RequiredClosure;

#[derive(Route)]
#[route(name = "GET feed", method = Get, response = empty)]
#[route(url = |p: Option<&FeedPath>| p.map(|p| p.page.to_string()).unwrap_or_default())]
pub struct OptionalClosure;

#[derive(Route)]
#[route(name = "GET users/:id/v2", method = Get, response = empty)]
#[route(url = user_url, path_params = UserPath)]
pub struct RequiredFn;

#[derive(Route)]
#[route(name = "GET feed/v2", method = Get, response = empty)]
#[route(url = feed_url, path_params = Option<FeedPath>)]
pub struct OptionalFn;

#[derive(Route)]
#[route(name = "GET version", method = Get, url = version_url, response = empty)]
pub struct ComputedFn;

fn kind<S: Presence>() -> PresenceKind {
    S::KIND
}

fn main() {
    assert_eq!(kind::<<Literal as Route>::PathParams>(), PresenceKind::Forbidden);
    assert_eq!(kind::<<Computed as Route>::PathParams>(), PresenceKind::Forbidden);
    assert_eq!(kind::<<ComputedFn as Route>::PathParams>(), PresenceKind::Forbidden);
    assert_eq!(kind::<<RequiredClosure as Route>::PathParams>(), PresenceKind::Required);
    assert_eq!(kind::<<RequiredFn as Route>::PathParams>(), PresenceKind::Required);
    assert_eq!(kind::<<OptionalClosure as Route>::PathParams>(), PresenceKind::Optional);
    assert_eq!(kind::<<OptionalFn as Route>::PathParams>(), PresenceKind::Optional);
    assert_eq!(Literal::url().as_literal(), Some("users"));
}
