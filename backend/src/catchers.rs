use rocket::serde::json::Json;
use rocket::{catch, Request};
use shared::ErrorResponse;

// The invalid-team body is produced by the route itself; anything Rocket
// rejects before the route runs gets the generic message.
#[catch(400)]
pub fn bad_request(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Server error"))
}

#[catch(404)]
pub fn not_found(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Not found"))
}

#[catch(500)]
pub fn internal_error(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Server error"))
}
