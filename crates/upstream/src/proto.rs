//! Messages of the `book_service` protobuf package.
//!
//! Field tags match the upstream `.proto`. The serde derives give the JSON
//! shape used on the HTTP side: missing or `null` fields fall back to their
//! zero value and unknown fields are ignored.

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub about: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub isbn: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateBookRequest {
    #[serde(deserialize_with = "null_as_default")]
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[serde(deserialize_with = "null_as_default")]
    #[prost(string, tag = "2")]
    pub about: ::prost::alloc::string::String,
    #[serde(deserialize_with = "null_as_default")]
    #[prost(string, tag = "3")]
    pub isbn: ::prost::alloc::string::String,
}

/// Identifier of the book touched by a create, update or delete.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct IdTracker {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GetAllBooksRequest {
    #[prost(int32, tag = "1")]
    pub limit: i32,
    #[prost(int32, tag = "2")]
    pub offset: i32,
    #[prost(string, tag = "3")]
    pub search: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GetAllBooksResponse {
    #[prost(message, repeated, tag = "1")]
    pub books: ::prost::alloc::vec::Vec<Book>,
    #[prost(int32, tag = "2")]
    pub count: i32,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GetBookByIdRequest {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateBookRequest {
    #[serde(deserialize_with = "null_as_default")]
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[serde(deserialize_with = "null_as_default")]
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[serde(deserialize_with = "null_as_default")]
    #[prost(string, tag = "3")]
    pub about: ::prost::alloc::string::String,
    #[serde(deserialize_with = "null_as_default")]
    #[prost(string, tag = "4")]
    pub isbn: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteBookRequest {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
}
