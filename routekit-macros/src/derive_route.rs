//! Implementation of the `#[derive(Route)]` macro.
//!
//! This module validates the input struct, classifies the `#[route(...)]`
//! attributes and emits a `::routekit::Route` impl.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse2, Data, DeriveInput, Error, Fields, Result};

use crate::codegen::{
    default_query_fn, http_method_ident, response_format_type, slot_presence, url_rule,
};
use crate::parse::{RouteConfig, Slot, UrlForm};

/// Main implementation for the `#[derive(Route)]` macro.
pub fn derive_route_impl(input: TokenStream) -> TokenStream {
    match derive_route_inner(input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn derive_route_inner(input: TokenStream) -> Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;

    match &input.data {
        Data::Struct(data_struct) => {
            if !matches!(data_struct.fields, Fields::Unit) {
                return Err(Error::new_spanned(
                    &data_struct.fields,
                    "Route can only be derived on unit structs (e.g., `struct GetUser;`)",
                ));
            }
        }
        Data::Enum(_) => {
            return Err(Error::new_spanned(
                &input.ident,
                "Route cannot be derived on enums",
            ));
        }
        Data::Union(_) => {
            return Err(Error::new_spanned(
                &input.ident,
                "Route cannot be derived on unions",
            ));
        }
    }

    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "Route cannot be derived on generic structs",
        ));
    }

    let config = RouteConfig::from_attrs(&input.attrs)?;
    config.validate(input.ident.span())?;

    let (Some(name), Some(method), Some(url), Some(response)) =
        (&config.name, config.method, &config.url, &config.response)
    else {
        return Err(Error::new_spanned(&input.ident, "incomplete route declaration"));
    };

    let url_form = UrlForm::classify(url, config.path_params.as_ref())?;
    let (path_presence, url_body) = url_rule(&url_form);
    let query_presence = slot_presence(&Slot::from_declared(config.query_params.as_ref()));
    let data_presence = slot_presence(&Slot::from_declared(config.data.as_ref()));
    let response_type = response_format_type(response);
    let method = http_method_ident(method);
    let default_query = default_query_fn(&config.default_query);

    let ident = &input.ident;

    Ok(quote! {
        impl ::routekit::Route for #ident {
            const NAME: &'static str = #name;
            const METHOD: ::routekit::RestMethod = ::routekit::RestMethod::#method;
            type PathParams = #path_presence;
            type QueryParams = #query_presence;
            type Data = #data_presence;
            type Response = #response_type;

            fn url() -> ::routekit::UrlRule<Self::PathParams> {
                #url_body
            }

            #default_query
        }
    })
}
