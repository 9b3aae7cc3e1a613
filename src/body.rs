use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde_json::{Map, Value};
use tracing::debug;

/// A JSON request body that never rejects on its own.
///
/// A missing content type or unparseable JSON reads as `{}`, so each handler
/// reports its own field error as a JSON 400 and still runs any bookkeeping
/// (like login rate limiting) that comes before validation.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                log_rejection(&rejection);
                Ok(Self(Value::Object(Map::new())))
            }
        }
    }
}

fn log_rejection(rejection: &JsonRejection) {
    debug!("unreadable json body ({}): {}", rejection.status(), rejection.body_text());
}

pub trait GetField {
    /// The field if present and a string.
    fn str_field(&self, field: &str) -> Option<String>;
    fn field(&self, field: &str) -> Option<&Value>;
}

impl GetField for JsonBody {
    fn str_field(&self, field: &str) -> Option<String> {
        self.0.get(field)?.as_str().map(str::to_owned)
    }

    fn field(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}
