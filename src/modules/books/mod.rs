pub mod models;
pub mod routes;
pub mod translate;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use book_gateway_kernel::{InitCtx, Module};
use book_gateway_upstream::BookService;

use routes::BookState;

/// Book endpoints, translated one-to-one onto the upstream Book service
pub struct BooksModule {
    state: BookState,
}

impl BooksModule {
    pub fn new(service: Arc<dyn BookService>, call_timeout: Duration) -> Self {
        Self {
            state: BookState::new(service, call_timeout),
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "book"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            upstream = %ctx.settings.book_service.endpoint(),
            "book module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "book module stopped");
        Ok(())
    }
}

fn envelope_schema(data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "code": { "type": "integer" },
            "message": { "type": "string" },
            "data": data
        },
        "required": ["code", "message", "data"]
    })
}

fn json_content(schema: serde_json::Value) -> serde_json::Value {
    serde_json::json!({ "application/json": { "schema": schema } })
}

fn error_response(description: &str) -> serde_json::Value {
    serde_json::json!({
        "description": description,
        "content": json_content(serde_json::json!({ "$ref": "#/components/schemas/ErrorResponse" }))
    })
}

fn schema_ref(name: &str) -> serde_json::Value {
    serde_json::json!({ "$ref": format!("#/components/schemas/{}", name) })
}

fn id_param() -> serde_json::Value {
    serde_json::json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    })
}

fn openapi_fragment() -> serde_json::Value {
    let tracker = json_content(envelope_schema(schema_ref("IdTracker")));

    serde_json::json!({
        "paths": {
            "/book": {
                "post": {
                    "summary": "Create book",
                    "tags": ["Book"],
                    "requestBody": {
                        "required": true,
                        "content": json_content(schema_ref("CreateBookRequest"))
                    },
                    "responses": {
                        "201": { "description": "Book created", "content": tracker.clone() },
                        "400": error_response("Bad request"),
                        "500": error_response("Book service error")
                    }
                },
                "get": {
                    "summary": "List books",
                    "tags": ["Book"],
                    "parameters": [
                        { "name": "limit", "in": "query", "required": false, "schema": { "type": "integer", "default": 10 } },
                        { "name": "offset", "in": "query", "required": false, "schema": { "type": "integer", "default": 0 } },
                        { "name": "search", "in": "query", "required": false, "schema": { "type": "string" } }
                    ],
                    "responses": {
                        "200": {
                            "description": "Books",
                            "content": json_content(envelope_schema(schema_ref("GetAllBooksResponse")))
                        },
                        "400": error_response("Bad request"),
                        "500": error_response("Book service error")
                    }
                }
            },
            "/book/{id}": {
                "get": {
                    "summary": "Get book",
                    "tags": ["Book"],
                    "parameters": [id_param()],
                    "responses": {
                        "200": {
                            "description": "Book",
                            "content": json_content(envelope_schema(schema_ref("Book")))
                        },
                        "500": error_response("Book service error, including unknown id")
                    }
                },
                "put": {
                    "summary": "Update book",
                    "tags": ["Book"],
                    "parameters": [id_param()],
                    "requestBody": {
                        "required": true,
                        "content": json_content(schema_ref("UpdateBookRequest"))
                    },
                    "responses": {
                        "201": { "description": "Book updated", "content": tracker.clone() },
                        "400": error_response("Bad request"),
                        "500": error_response("Book service error")
                    }
                },
                "delete": {
                    "summary": "Delete book",
                    "tags": ["Book"],
                    "parameters": [id_param()],
                    "responses": {
                        "200": { "description": "Book deleted", "content": tracker },
                        "500": error_response("Book service error")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "about": { "type": "string" },
                        "isbn": { "type": "string" }
                    }
                },
                "CreateBookRequest": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "about": { "type": "string" },
                        "isbn": { "type": "string" }
                    }
                },
                "UpdateBookRequest": {
                    "type": "object",
                    "description": "Any `id` in the body is replaced by the path id",
                    "properties": {
                        "name": { "type": "string" },
                        "about": { "type": "string" },
                        "isbn": { "type": "string" }
                    }
                },
                "GetAllBooksResponse": {
                    "type": "object",
                    "properties": {
                        "books": { "type": "array", "items": { "$ref": "#/components/schemas/Book" } },
                        "count": { "type": "integer" }
                    }
                },
                "IdTracker": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" }
                    }
                }
            }
        }
    })
}

/// Create a new instance of the book module
pub fn create_module(service: Arc<dyn BookService>, call_timeout: Duration) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(service, call_timeout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_fragment_covers_every_route() {
        let fragment = openapi_fragment();
        let paths = &fragment["paths"];

        for method in ["post", "get"] {
            assert!(paths["/book"].get(method).is_some(), "/book {}", method);
        }
        for method in ["get", "put", "delete"] {
            assert!(paths["/book/{id}"].get(method).is_some(), "/book/{{id}} {}", method);
        }
        assert!(paths["/book/{id}"]["get"]["responses"].get("404").is_none());
        assert_eq!(
            fragment["components"]["schemas"]["IdTracker"]["properties"]["id"]["type"],
            "string"
        );
    }
}
