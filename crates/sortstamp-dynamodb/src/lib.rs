//! Stores [`sortstamp_core`] timestamps as DynamoDB attributes.
//!
//! Every [`SortableTime`](sortstamp_core::SortableTime) is written as an `S`
//! attribute holding its fixed-width string, so a table using it as a sort key
//! orders items chronologically. See [`attribute::AttributeEncoding`].
//!
//! [`endpoint::EndpointOverrides`] points a DynamoDB client at another
//! endpoint, such as DynamoDB Local, while leaving other services on their
//! default resolution.

#![forbid(unsafe_code)]
#![warn(
    clippy::cargo,
    missing_docs,
    // clippy::missing_docs_in_private_items,
    clippy::nursery,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms,
)]
#![cfg_attr(doc, deny(rustdoc::all))]
#![allow(
    clippy::missing_errors_doc, // TODO clippy::missing_errors_doc
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
)]

/// Encoding timestamps as [`AttributeValue`]s.
pub mod attribute;
/// Endpoint overrides for DynamoDB clients.
pub mod endpoint;

pub use aws_sdk_dynamodb::types::AttributeValue;
pub use sortstamp_core;

pub use self::{
    attribute::{attribute_type_name, AttributeEncoding, AttributeError},
    endpoint::{
        Endpoint, EndpointConfig, EndpointNotFound, EndpointOverrides, DYNAMODB_SERVICE_ID,
    },
};
