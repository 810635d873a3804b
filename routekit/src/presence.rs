//! Presence rules for route slots.
//!
//! Every route declares three slots a caller may fill: path parameters,
//! query parameters and body data. Each slot is classified by a
//! [`Presence`] marker, and the marker decides what the call site must
//! write:
//!
//! | marker          | caller writes       | may be omitted |
//! |-----------------|---------------------|----------------|
//! | [`Required<T>`] | `T`                 | no             |
//! | [`Optional<T>`] | `Option<T>`         | yes            |
//! | [`Forbidden`]   | `Option<Never>`     | yes            |
//!
//! [`Never`] has no values, so the only thing that can be written into a
//! forbidden slot is `None`.
//!
//! The call builder tracks each slot with a typestate ([`Missing`] or
//! [`Present`]). `send` is only callable when every slot state implements
//! [`Fill`] for the route's marker, which is where a missing required value
//! turns into a compile error.
//!
//! ## Examples
//!
//! Omitting a required slot does not compile:
//!
//! ```rust,compile_fail
//! # use routekit::{Dispatcher, HttpTransport, Route};
//! # pub struct UserPath { pub id: String }
//! # #[derive(serde::Deserialize)] pub struct User { pub id: String }
//! #[derive(Route)]
//! #[route(name = "GET users/:id", method = Get, response = json(User))]
//! #[route(url = |p: &UserPath| format!("users/{}", p.id))]
//! pub struct GetUser;
//!
//! async fn run(api: Dispatcher<HttpTransport>) -> Result<(), routekit::ApiError> {
//!     api.request(GetUser).send().await?;
//!     Ok(())
//! }
//! ```
//!
//! The same holds for a required query slot left unset:
//!
//! ```rust,compile_fail
//! # use routekit::{Dispatcher, HttpTransport, Route};
//! # pub struct TeamPath { pub team: String }
//! # #[derive(serde::Serialize)] pub struct Search { pub q: String }
//! # #[derive(serde::Deserialize)] pub struct User { pub id: String }
//! # fn team_url(p: &TeamPath) -> String { format!("teams/{}/users", p.team) }
//! #[derive(Route)]
//! #[route(name = "GET teams/:team/users", method = Get, response = json(Vec<User>))]
//! #[route(url = team_url, path_params = TeamPath, query_params = Search)]
//! pub struct TeamUsers;
//!
//! async fn run(api: Dispatcher<HttpTransport>) -> Result<(), routekit::ApiError> {
//!     api.request(TeamUsers)
//!         .path_params(TeamPath { team: "core".into() })
//!         .send()
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! and for required body data:
//!
//! ```rust,compile_fail
//! # use routekit::{Dispatcher, HttpTransport, Route};
//! # #[derive(serde::Serialize)] pub struct NewUser { pub username: String }
//! # #[derive(serde::Deserialize)] pub struct User { pub id: String }
//! #[derive(Route)]
//! #[route(name = "POST users", method = Post, url = "users")]
//! #[route(data = NewUser, response = json(User))]
//! pub struct CreateUser;
//!
//! async fn run(api: Dispatcher<HttpTransport>) -> Result<(), routekit::ApiError> {
//!     api.request(CreateUser).send().await?;
//!     Ok(())
//! }
//! ```
//!
//! A required slot takes the value itself, so `None` is rejected:
//!
//! ```rust,compile_fail
//! # use routekit::{Dispatcher, HttpTransport, Route};
//! # pub struct TeamPath { pub team: String }
//! # #[derive(serde::Serialize)] pub struct Search { pub q: String }
//! # #[derive(serde::Deserialize)] pub struct User { pub id: String }
//! # fn team_url(p: &TeamPath) -> String { format!("teams/{}/users", p.team) }
//! #[derive(Route)]
//! #[route(name = "GET teams/:team/users", method = Get, response = json(Vec<User>))]
//! #[route(url = team_url, path_params = TeamPath, query_params = Search)]
//! pub struct TeamUsers;
//!
//! async fn run(api: Dispatcher<HttpTransport>) -> Result<(), routekit::ApiError> {
//!     api.request(TeamUsers)
//!         .path_params(TeamPath { team: "core".into() })
//!         .query_params(None)
//!         .send()
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! Writing a value into a forbidden slot does not compile either:
//!
//! ```rust,compile_fail
//! # use routekit::{Dispatcher, HttpTransport, Route};
//! # #[derive(serde::Serialize)] pub struct Page { pub page: String }
//! #[derive(Route)]
//! #[route(name = "GET users", method = Get, url = "users", response = empty)]
//! pub struct ListUsers;
//!
//! async fn run(api: Dispatcher<HttpTransport>) -> Result<(), routekit::ApiError> {
//!     let page = Page { page: "1".into() };
//!     api.request(ListUsers).query_params(Some(page)).send().await?;
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::{Serialize, Serializer};

/// Runtime view of a [`Presence`] marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum PresenceKind {
    /// The slot must be supplied.
    Required,
    /// The slot may be omitted or set to `None`.
    Optional,
    /// The slot can only be omitted or set to `None`.
    Forbidden,
}

/// Classification of a route slot.
///
/// `Value` is the type the route declares for the slot; `Input` is what the
/// caller hands to the call builder.
pub trait Presence: 'static {
    /// The declared type.
    type Value: Send + Sync + 'static;
    /// The type written at the call site.
    type Input: Send;
    /// Runtime classification of this marker.
    const KIND: PresenceKind;

    /// Turns caller input into the value that reaches the dispatcher.
    fn into_value(input: Self::Input) -> Option<Self::Value>;
}

/// The slot must be supplied and hold a `T`.
pub struct Required<T>(PhantomData<fn() -> T>);

/// The slot may be omitted, set to `None`, or set to `Some(T)`.
///
/// This is the home of "nullable" declarations and of types whose fields are
/// all optional: omitting the slot and passing `Some(T::default())` are both
/// legal and stay distinguishable for the dispatcher.
pub struct Optional<T>(PhantomData<fn() -> T>);

/// The route does not declare the slot at all.
pub enum Forbidden {}

/// A type with no values.
///
/// `Option<Never>` admits only `None`, which is how forbidden slots reject
/// anything but "null" at compile time.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Never {}

impl fmt::Debug for Never {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl Serialize for Never {
    fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
        match *self {}
    }
}

impl<T: Send + Sync + 'static> Presence for Required<T> {
    type Value = T;
    type Input = T;
    const KIND: PresenceKind = PresenceKind::Required;

    fn into_value(input: T) -> Option<T> {
        Some(input)
    }
}

impl<T: Send + Sync + 'static> Presence for Optional<T> {
    type Value = T;
    type Input = Option<T>;
    const KIND: PresenceKind = PresenceKind::Optional;

    fn into_value(input: Option<T>) -> Option<T> {
        input
    }
}

impl Presence for Forbidden {
    type Value = Never;
    type Input = Option<Never>;
    const KIND: PresenceKind = PresenceKind::Forbidden;

    fn into_value(input: Option<Never>) -> Option<Never> {
        input.map(|never| match never {})
    }
}

/// Typestate for a slot the caller has not touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Missing;

/// Typestate for a slot the caller has written.
#[derive(Debug, Clone)]
pub struct Present<I>(pub(crate) I);

/// A slot state that satisfies the route's presence rule for that slot.
#[diagnostic::on_unimplemented(
    message = "this route needs a value for a `{S}` slot before it can be sent",
    label = "slot state `{Self}` does not satisfy `{S}`",
    note = "set the slot with `.path_params(..)`, `.query_params(..)` or `.data(..)`"
)]
pub trait Fill<S: Presence> {
    /// Extracts the slot value, if any.
    fn fill(self) -> Option<S::Value>;
}

impl<T: Send + Sync + 'static> Fill<Optional<T>> for Missing {
    fn fill(self) -> Option<T> {
        None
    }
}

impl Fill<Forbidden> for Missing {
    fn fill(self) -> Option<Never> {
        None
    }
}

impl<S, I> Fill<S> for Present<I>
where
    S: Presence<Input = I>,
{
    fn fill(self) -> Option<S::Value> {
        S::into_value(self.0)
    }
}
