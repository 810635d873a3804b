//! Parsing of `#[route(...)]` attributes.
//!
//! Several `#[route(...)]` attributes may be stacked on one struct; their
//! keys are merged into a single [`RouteConfig`]. Setting the same key twice
//! is an error.

use proc_macro2::Span;
use syn::{
    meta::ParseNestedMeta, parenthesized, spanned::Spanned, Attribute, Error, Expr, ExprClosure,
    GenericArgument, Ident, Lit, LitStr, Pat, PathArguments, Result, Type,
};

/// Parsed route configuration from `#[route(...)]` attributes.
#[derive(Default)]
pub struct RouteConfig {
    /// Route name (required)
    pub name: Option<LitStr>,
    /// HTTP method (required)
    pub method: Option<HttpMethod>,
    /// URL rule (required)
    pub url: Option<Expr>,
    /// Explicit path-parameter type, for `url = some_fn`
    pub path_params: Option<Type>,
    /// Query-parameter type
    pub query_params: Option<Type>,
    /// Body data type
    pub data: Option<Type>,
    /// Response format (required)
    pub response: Option<ResponseDecl>,
    /// Default query parameters, in declaration order
    pub default_query: Vec<(String, String)>,
}

impl RouteConfig {
    /// Parse route configuration from a list of attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> Result<Self> {
        let mut config = RouteConfig::default();

        for attr in attrs {
            if attr.path().is_ident("route") {
                attr.parse_nested_meta(|meta| config.parse_key(meta))?;
            }
        }

        Ok(config)
    }

    fn parse_key(&mut self, meta: ParseNestedMeta) -> Result<()> {
        let key = meta
            .path
            .get_ident()
            .map(|i| i.to_string())
            .unwrap_or_default();

        match key.as_str() {
            "name" => {
                let value: LitStr = meta.value()?.parse()?;
                validate_name(&value)?;
                set_once(&mut self.name, value, &meta)
            }
            "method" => {
                let value: Ident = meta.value()?.parse()?;
                let method = HttpMethod::from_ident(&value)?;
                set_once(&mut self.method, method, &meta)
            }
            "url" => {
                let value: Expr = meta.value()?.parse()?;
                set_once(&mut self.url, value, &meta)
            }
            "path_params" => {
                let value: Type = meta.value()?.parse()?;
                set_once(&mut self.path_params, value, &meta)
            }
            "query_params" => {
                let value: Type = meta.value()?.parse()?;
                set_once(&mut self.query_params, value, &meta)
            }
            "data" => {
                let value: Type = meta.value()?.parse()?;
                set_once(&mut self.data, value, &meta)
            }
            "response" => {
                let input = meta.value()?;
                let ident: Ident = input.parse()?;
                let ty = if input.peek(syn::token::Paren) {
                    let content;
                    parenthesized!(content in input);
                    Some(content.parse::<Type>()?)
                } else {
                    None
                };
                let decl = ResponseDecl::new(&ident, ty)?;
                set_once(&mut self.response, decl, &meta)
            }
            "default_query" => meta.parse_nested_meta(|entry| {
                let key = entry
                    .path
                    .get_ident()
                    .map(|i| i.to_string())
                    .ok_or_else(|| entry.error("default query keys must be identifiers"))?;
                if self.default_query.iter().any(|(k, _)| *k == key) {
                    return Err(entry.error(format!("duplicate default query key `{key}`")));
                }
                let value: Lit = entry.value()?.parse()?;
                self.default_query.push((key, lit_to_string(&value)?));
                Ok(())
            }),
            _ => Err(meta.error(format!(
                "unknown route attribute: `{key}`. Expected one of: name, method, url, path_params, query_params, data, response, default_query"
            ))),
        }
    }

    /// Validate that required fields are present.
    ///
    /// All missing keys are reported together, at `span`.
    pub fn validate(&self, span: Span) -> Result<()> {
        let missing: Vec<&str> = [
            ("name", self.name.is_none()),
            ("method", self.method.is_none()),
            ("url", self.url.is_none()),
            ("response", self.response.is_none()),
        ]
        .into_iter()
        .filter_map(|(key, absent)| absent.then_some(key))
        .collect();

        if missing.is_empty() {
            return Ok(());
        }

        let list = missing
            .iter()
            .map(|k| format!("`{k}`"))
            .collect::<Vec<_>>()
            .join(", ");
        Err(Error::new(
            span,
            format!("missing required route attribute(s): {list}; every route needs a name, method, url and response"),
        ))
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, meta: &ParseNestedMeta) -> Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate route attribute"));
    }
    *slot = Some(value);
    Ok(())
}

fn validate_name(name: &LitStr) -> Result<()> {
    let value = name.value();
    if value.is_empty() {
        return Err(Error::new(name.span(), "route name cannot be empty"));
    }
    if value.trim() != value {
        return Err(Error::new(
            name.span(),
            "route name cannot start or end with whitespace",
        ));
    }
    if let Some(c) = value.chars().find(|c| c.is_control()) {
        return Err(Error::new(
            name.span(),
            format!("route name cannot contain control character {c:?}"),
        ));
    }
    Ok(())
}

fn lit_to_string(lit: &Lit) -> Result<String> {
    match lit {
        Lit::Str(s) => Ok(s.value()),
        Lit::Int(i) => Ok(i.base10_digits().to_string()),
        Lit::Float(f) => Ok(f.base10_digits().to_string()),
        Lit::Bool(b) => Ok(b.value.to_string()),
        other => Err(Error::new(
            other.span(),
            "default query values must be string, integer, float or bool literals",
        )),
    }
}

/// HTTP method for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    /// Parse from an identifier.
    pub fn from_ident(ident: &Ident) -> Result<Self> {
        match ident.to_string().as_str() {
            "Get" | "GET" | "get" => Ok(HttpMethod::Get),
            "Post" | "POST" | "post" => Ok(HttpMethod::Post),
            "Put" | "PUT" | "put" => Ok(HttpMethod::Put),
            "Patch" | "PATCH" | "patch" => Ok(HttpMethod::Patch),
            "Delete" | "DELETE" | "delete" => Ok(HttpMethod::Delete),
            "Head" | "HEAD" | "head" => Ok(HttpMethod::Head),
            "Options" | "OPTIONS" | "options" => Ok(HttpMethod::Options),
            "Trace" | "TRACE" | "trace" => Ok(HttpMethod::Trace),
            other => Err(Error::new(
                ident.span(),
                format!(
                    "unknown HTTP method: `{other}`. Expected one of: Get, Post, Put, Patch, Delete, Head, Options, Trace"
                ),
            )),
        }
    }
}

/// Response format for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Yaml,
    Xml,
    PlainText,
    Html,
    Csv,
    Binary,
    Empty,
}

impl ResponseFormat {
    /// Parse from an identifier.
    pub fn from_ident(ident: &Ident) -> Result<Self> {
        match ident.to_string().as_str() {
            "json" | "Json" | "JSON" => Ok(ResponseFormat::Json),
            "yaml" | "Yaml" | "YAML" => Ok(ResponseFormat::Yaml),
            "xml" | "Xml" | "XML" => Ok(ResponseFormat::Xml),
            "text" | "plain_text" | "PlainText" => Ok(ResponseFormat::PlainText),
            "html" | "Html" | "HTML" => Ok(ResponseFormat::Html),
            "csv" | "Csv" | "CSV" => Ok(ResponseFormat::Csv),
            "binary" | "Binary" | "bytes" => Ok(ResponseFormat::Binary),
            "empty" | "Empty" | "none" => Ok(ResponseFormat::Empty),
            other => Err(Error::new(
                ident.span(),
                format!(
                    "unknown response format: `{other}`. Expected one of: json(T), yaml(T), xml(T), text, html, csv, binary, empty"
                ),
            )),
        }
    }

    /// Returns true if this format deserializes into a caller-chosen type.
    pub fn is_typed(self) -> bool {
        matches!(
            self,
            ResponseFormat::Json | ResponseFormat::Yaml | ResponseFormat::Xml
        )
    }
}

/// A response format plus, for typed formats, the target type.
pub struct ResponseDecl {
    pub format: ResponseFormat,
    pub ty: Option<Type>,
}

impl ResponseDecl {
    fn new(ident: &Ident, ty: Option<Type>) -> Result<Self> {
        let format = ResponseFormat::from_ident(ident)?;
        match (format.is_typed(), &ty) {
            (true, None) => Err(Error::new(
                ident.span(),
                format!("`{ident}` responses need a target type, e.g. `{ident}(User)`"),
            )),
            (false, Some(ty)) => Err(Error::new(
                ty.span(),
                format!("`{ident}` responses do not take a type"),
            )),
            _ => Ok(Self { format, ty }),
        }
    }
}

/// How a slot's declared type maps onto a presence marker.
pub enum Slot {
    Required(Type),
    Optional(Type),
    Forbidden,
}

impl Slot {
    /// Classifies a declared `query_params` / `data` type: `Option<T>` is
    /// optional, `()` or no declaration is forbidden, anything else is
    /// required.
    pub fn from_declared(ty: Option<&Type>) -> Self {
        match ty {
            None => Slot::Forbidden,
            Some(Type::Tuple(tuple)) if tuple.elems.is_empty() => Slot::Forbidden,
            Some(ty) => match option_inner(ty) {
                Some(inner) => Slot::Optional(inner.clone()),
                None => Slot::Required(ty.clone()),
            },
        }
    }
}

/// The classified `url = ...` value.
pub enum UrlForm {
    /// `url = "users"`
    Literal(LitStr),
    /// `url = || ...` or a zero-argument function path
    Computed(Expr),
    /// `url = |p: &T| ...` or a function path with `path_params = T`
    Builder(Expr, Type),
    /// `url = |p: Option<&T>| ...` or a function path with
    /// `path_params = Option<T>`
    OptionalBuilder(Expr, Type),
}

impl UrlForm {
    /// Classifies the URL expression, consulting `path_params` for function
    /// paths.
    pub fn classify(url: &Expr, path_params: Option<&Type>) -> Result<Self> {
        match url {
            Expr::Lit(lit) => match &lit.lit {
                Lit::Str(s) => {
                    reject_path_params(path_params, "a literal url takes no path parameters")?;
                    Ok(UrlForm::Literal(s.clone()))
                }
                other => Err(Error::new(other.span(), "url literals must be strings")),
            },
            Expr::Closure(closure) => {
                reject_path_params(
                    path_params,
                    "`path_params` is taken from the url closure's parameter type",
                )?;
                classify_closure(closure)
            }
            Expr::Path(_) => Ok(match path_params.map(|ty| (ty, option_inner(ty))) {
                None => UrlForm::Computed(url.clone()),
                Some((_, Some(inner))) => UrlForm::OptionalBuilder(url.clone(), inner.clone()),
                Some((ty, None)) => UrlForm::Builder(url.clone(), ty.clone()),
            }),
            other => Err(Error::new(
                other.span(),
                "url must be a string literal, a closure or a function path",
            )),
        }
    }
}

fn reject_path_params(path_params: Option<&Type>, message: &str) -> Result<()> {
    match path_params {
        Some(ty) => Err(Error::new(ty.span(), message)),
        None => Ok(()),
    }
}

fn classify_closure(closure: &ExprClosure) -> Result<UrlForm> {
    let expr = Expr::Closure(closure.clone());
    let mut inputs = closure.inputs.iter();

    let Some(param) = inputs.next() else {
        return Ok(UrlForm::Computed(expr));
    };
    if let Some(extra) = inputs.next() {
        return Err(Error::new(
            extra.span(),
            "url closures take at most one parameter",
        ));
    }

    let Pat::Type(typed) = param else {
        return Err(Error::new(
            param.span(),
            "annotate the url closure parameter: `|p: &T|` or `|p: Option<&T>|`",
        ));
    };

    if let Type::Reference(reference) = typed.ty.as_ref() {
        return Ok(UrlForm::Builder(expr, (*reference.elem).clone()));
    }
    if let Some(Type::Reference(reference)) = option_inner(&typed.ty) {
        return Ok(UrlForm::OptionalBuilder(expr, (*reference.elem).clone()));
    }

    Err(Error::new(
        typed.ty.span(),
        "url closure parameters must be `&T` or `Option<&T>`",
    ))
}

/// Returns `T` for a type written as `Option<T>`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
