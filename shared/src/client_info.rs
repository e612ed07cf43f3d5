use serde::{Deserialize, Serialize};

/// Forwarded-for address of the caller. Logged alongside each vote, never
/// used for enforcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub addr: String,
}

// Backend-specific Rocket implementation
#[cfg(feature = "backend")]
mod backend_impl {
    use super::*;
    use rocket::request::{FromRequest, Outcome};
    use rocket::Request;

    #[rocket::async_trait]
    impl<'r> FromRequest<'r> for ClientInfo {
        type Error = ();

        async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
            let headers = req.headers();
            let addr = headers
                .get_one("X-Forwarded-For")
                .or_else(|| headers.get_one("X-Real-IP"))
                .unwrap_or("unknown")
                .to_string();

            Outcome::Success(ClientInfo { addr })
        }
    }
}
