//! Code generation for `#[derive(Route)]`.
//!
//! Generated code refers to the runtime crate through absolute
//! `::routekit::` paths.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use crate::parse::{HttpMethod, ResponseFormat, ResponseDecl, Slot, UrlForm};

/// Generates the response format type for a route.
pub fn response_format_type(decl: &ResponseDecl) -> TokenStream {
    let ty = &decl.ty;
    match decl.format {
        ResponseFormat::Json => quote! { ::routekit::response::JsonFormat<#ty> },
        ResponseFormat::Yaml => quote! { ::routekit::response::YamlFormat<#ty> },
        ResponseFormat::Xml => quote! { ::routekit::response::XmlFormat<#ty> },
        ResponseFormat::PlainText => quote! { ::routekit::response::PlainTextFormat },
        ResponseFormat::Html => quote! { ::routekit::response::HtmlFormat },
        ResponseFormat::Csv => quote! { ::routekit::response::CsvFormat },
        ResponseFormat::Binary => quote! { ::routekit::response::BinaryFormat },
        ResponseFormat::Empty => quote! { ::routekit::response::EmptyFormat },
    }
}

/// Generates the identifier for an HTTP method.
pub fn http_method_ident(method: HttpMethod) -> Ident {
    match method {
        HttpMethod::Get => format_ident!("Get"),
        HttpMethod::Post => format_ident!("Post"),
        HttpMethod::Put => format_ident!("Put"),
        HttpMethod::Patch => format_ident!("Patch"),
        HttpMethod::Delete => format_ident!("Delete"),
        HttpMethod::Head => format_ident!("Head"),
        HttpMethod::Options => format_ident!("Options"),
        HttpMethod::Trace => format_ident!("Trace"),
    }
}

/// Generates the presence marker for a query or data slot.
pub fn slot_presence(slot: &Slot) -> TokenStream {
    match slot {
        Slot::Required(ty) => quote! { ::routekit::Required<#ty> },
        Slot::Optional(ty) => quote! { ::routekit::Optional<#ty> },
        Slot::Forbidden => quote! { ::routekit::Forbidden },
    }
}

/// Generates the path-parameter presence marker and the body of `url()`.
pub fn url_rule(form: &UrlForm) -> (TokenStream, TokenStream) {
    match form {
        UrlForm::Literal(lit) => (
            quote! { ::routekit::Forbidden },
            quote! { ::routekit::UrlRule::literal(#lit) },
        ),
        UrlForm::Computed(expr) => (
            quote! { ::routekit::Forbidden },
            quote! { ::routekit::UrlRule::computed(#expr) },
        ),
        UrlForm::Builder(expr, ty) => (
            quote! { ::routekit::Required<#ty> },
            quote! { ::routekit::UrlRule::builder(#expr) },
        ),
        UrlForm::OptionalBuilder(expr, ty) => (
            quote! { ::routekit::Optional<#ty> },
            quote! { ::routekit::UrlRule::optional_builder(#expr) },
        ),
    }
}

/// Generates a `default_query()` override, or nothing when the route has no
/// default query parameters.
pub fn default_query_fn(entries: &[(String, String)]) -> TokenStream {
    if entries.is_empty() {
        return TokenStream::new();
    }

    let inserts = entries.iter().map(|(key, value)| {
        quote! {
            query.insert(#key.to_string(), #value.to_string());
        }
    });

    quote! {
        fn default_query() -> ::routekit::QueryMap {
            let mut query = ::routekit::QueryMap::new();
            #(#inserts)*
            query
        }
    }
}
