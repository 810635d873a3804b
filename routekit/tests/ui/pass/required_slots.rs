use routekit::{ApiError, Dispatcher, HttpTransport, Route};

pub struct TeamPath {
    pub team: String,
}

#[derive(serde::Serialize)]
pub struct Search {
    pub q: String,
}

#[derive(serde::Serialize)]
pub struct NewUser {
    pub username: String,
}

#[derive(serde::Deserialize)]
pub struct User {
    pub id: String,
}

fn team_url(p: &TeamPath) -> String {
    format!("teams/{}/users", p.team)
}

#[derive(Route)]
#[route(name = "GET teams/:team/users", method = Get, response = json(Vec<User>))]
#[route(url = team_url, path_params = TeamPath, query_params = Search)]
pub struct TeamUsers;

#[derive(Route)]
#[route(name = "POST users", method = Post, url = "users")]
#[route(data = NewUser, response = json(User))]
pub struct CreateUser;

async fn team_users(api: Dispatcher<HttpTransport>) -> Result<Vec<User>, ApiError> {
    api.request(TeamUsers)
        .path_params(TeamPath { team: "core".into() })
        .query_params(Search { q: "ada".into() })
        .send()
        .await
}

async fn create_user(api: Dispatcher<HttpTransport>) -> Result<User, ApiError> {
    api.request(CreateUser)
        .data(NewUser { username: "ada".into() })
        .send()
        .await
}

fn main() {
    let _ = team_users;
    let _ = create_user;
}
