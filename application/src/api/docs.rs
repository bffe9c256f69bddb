//! Static API documentation handler.

use axum::Json;
use serde_json::{json, Value};

/// `GET /docs` handler.
///
/// Returns a static JSON description of the API surface.
#[expect(clippy::unused_async, reason = "`async` is required by routing")]
#[tracing::instrument(skip_all, fields(http.route = "GET /docs"))]
pub async fn docs() -> Json<Value> {
    Json(json!({
        "message": "Real Estate API Documentation",
        "routes": [
            {
                "method": "POST",
                "route": "/auth/signup",
                "description": "Register a new user",
            },
            {
                "method": "POST",
                "route": "/auth/login",
                "description": "Login with email and password",
            },
            {
                "method": "GET",
                "route": "/houses",
                "description": "Get all active house listings (Public)",
            },
            {
                "method": "GET",
                "route": "/houses/:id",
                "description": "Get a house listing by its ID (Public)",
            },
            {
                "method": "POST",
                "route": "/houses",
                "description": "Create a new house listing (Admin Only)",
                "headers": {
                    "Authorization": "Bearer <token>",
                    "Content-Type": "multipart/form-data",
                },
                "files": {
                    "images": "up to 15 files",
                    "coverImg": "up to 1 file",
                },
            },
            {
                "method": "PUT",
                "route": "/houses/:id",
                "description": "Edit a house listing (Admin Only)",
            },
            {
                "method": "DELETE",
                "route": "/houses/:id",
                "description": "Delete a house listing (Admin Only)",
            },
            {
                "method": "POST",
                "route": "/houses/search",
                "description": "Search house listings by a sparse filter \
                                (Public)",
            },
            {
                "method": "POST",
                "route": "/testimonials",
                "description": "Submit a testimonial",
            },
            {
                "method": "GET",
                "route": "/testimonials",
                "description": "Get all testimonials",
            },
            {
                "method": "POST",
                "route": "/reviews",
                "description": "Submit a review",
            },
            {
                "method": "GET",
                "route": "/reviews",
                "description": "Get all reviews",
            },
            {
                "method": "POST",
                "route": "/subscribe",
                "description": "Subscribe to the newsletter",
            },
            {
                "method": "POST",
                "route": "/unsubscribe",
                "description": "Unsubscribe from the newsletter",
            },
            {
                "method": "POST",
                "route": "/contact",
                "description": "Submit a contact message",
            },
            {
                "method": "GET",
                "route": "/contacts",
                "description": "Get all contact messages",
            },
            {
                "method": "DELETE",
                "route": "/contact/:id",
                "description": "Delete a contact message",
            },
            {
                "method": "POST",
                "route": "/services",
                "description": "Create a service request",
            },
            {
                "method": "GET",
                "route": "/services",
                "description": "Get all service requests",
            },
            {
                "method": "GET",
                "route": "/services/:id",
                "description": "Get a service request by its ID",
            },
            {
                "method": "PUT",
                "route": "/services/:id",
                "description": "Update a service request",
            },
            {
                "method": "DELETE",
                "route": "/services/:id",
                "description": "Delete a service request",
            },
            {
                "method": "POST",
                "route": "/stats",
                "description": "Upload site statistics (Admin Only)",
            },
            {
                "method": "PUT",
                "route": "/stats",
                "description": "Update site statistics (Admin Only)",
            },
            {
                "method": "GET",
                "route": "/stats",
                "description": "Get site statistics",
            },
        ],
    }))
}
