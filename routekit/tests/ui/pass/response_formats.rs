use routekit::response::{
    BinaryFormat, CsvFormat, EmptyFormat, HtmlFormat, JsonFormat, PlainTextFormat, XmlFormat,
    YamlFormat,
};
use routekit::{Forbidden, Optional, Required, RestMethod, Route};

#[derive(serde::Deserialize)]
pub struct User {
    pub id: String,
}

#[derive(serde::Serialize)]
pub struct Page {
    pub page: Option<u32>,
}

#[derive(serde::Serialize)]
pub struct NewUser {
    pub username: String,
}

#[derive(Route)]
#[route(name = "GET users.json", method = Get, url = "users.json", response = json(Vec<User>))]
#[route(query_params = Option<Page>, default_query(format = "json", limit = 50, pretty = true))]
pub struct Json;

#[derive(Route)]
#[route(name = "GET users.yaml", method = Get, url = "users.yaml", response = yaml(Vec<User>))]
pub struct Yaml;

#[derive(Route)]
#[route(name = "GET users.xml", method = Get, url = "users.xml", response = xml(User))]
pub struct Xml;

#[derive(Route)]
#[route(name = "GET readme", method = Get, url = "readme", response = text)]
pub struct Text;

#[derive(Route)]
#[route(name = "GET index", method = Get, url = "index", response = html)]
pub struct Html;

#[derive(Route)]
#[route(name = "GET export", method = Get, url = "export", response = csv)]
pub struct Csv;

#[derive(Route)]
#[route(name = "GET avatar", method = Get, url = "avatar", response = binary)]
pub struct Binary;

#[derive(Route)]
#[route(name = "POST users", method = Post, url = "users", response = empty)]
#[route(query_params = (), data = NewUser)]
pub struct Create;

fn same<A: 'static, B: 'static>() -> bool {
    std::any::TypeId::of::<A>() == std::any::TypeId::of::<B>()
}

fn main() {
    assert!(same::<<Json as Route>::Response, JsonFormat<Vec<User>>>());
    assert!(same::<<Json as Route>::QueryParams, Optional<Page>>());
    assert!(same::<<Yaml as Route>::Response, YamlFormat<Vec<User>>>());
    assert!(same::<<Xml as Route>::Response, XmlFormat<User>>());
    assert!(same::<<Text as Route>::Response, PlainTextFormat>());
    assert!(same::<<Html as Route>::Response, HtmlFormat>());
    assert!(same::<<Csv as Route>::Response, CsvFormat>());
    assert!(same::<<Binary as Route>::Response, BinaryFormat>());
    assert!(same::<<Create as Route>::Response, EmptyFormat>());
    assert!(same::<<Create as Route>::QueryParams, Forbidden>());
    assert!(same::<<Create as Route>::Data, Required<NewUser>>());

    assert_eq!(Create::METHOD, RestMethod::Post);
    let defaults = Json::default_query();
    assert_eq!(defaults["format"], "json");
    assert_eq!(defaults["limit"], "50");
    assert_eq!(defaults["pretty"], "true");
}
