//! Request parameter extraction.

use axum::{
    extract::{Form, FromRequest, Query, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiResponse;

/// Request parameters read from a url-encoded form body or the query string.
///
/// The form body is used when the content type is
/// `application/x-www-form-urlencoded`; otherwise the query string is parsed.
/// The two sources are never merged: with a form body the query string is
/// ignored. Must be the last extractor of a handler since it may consume the
/// body.
#[derive(Debug, Clone)]
pub struct Params<T>(pub T);

/// Parameters could not be read or decoded.
///
/// Handlers take `Result<Params<T>, ParamsRejection>` and report the message
/// as a validation failure of their endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamsRejection {
    pub message: String,
}

impl IntoResponse for ParamsRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::failure(self.message)),
        )
            .into_response()
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

impl<T, S> FromRequest<S> for Params<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ParamsRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| ParamsRejection {
                    message: e.body_text(),
                })?;
            return Ok(Params(value));
        }

        let Query(value) = Query::<T>::try_from_uri(req.uri()).map_err(|e| ParamsRejection {
            message: e.body_text(),
        })?;
        Ok(Params(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Fields {
        name: Option<String>,
    }

    #[tokio::test]
    async fn test_reads_query_string() {
        let req = Request::builder()
            .method("POST")
            .uri("/x?name=Tan")
            .body(Body::empty())
            .unwrap();

        let Params(fields) = Params::<Fields>::from_request(req, &()).await.unwrap();
        assert_eq!(fields.name.as_deref(), Some("Tan"));
    }

    #[tokio::test]
    async fn test_reads_form_body() {
        let req = Request::builder()
            .method("POST")
            .uri("/x?name=ignored")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("name=Lee"))
            .unwrap();

        let Params(fields) = Params::<Fields>::from_request(req, &()).await.unwrap();
        assert_eq!(fields.name.as_deref(), Some("Lee"));
    }

    #[tokio::test]
    async fn test_form_body_over_limit_is_rejected() {
        let app = axum::Router::new()
            .route(
                "/x",
                axum::routing::post(
                    |params: Result<Params<Fields>, ParamsRejection>| async move {
                        match params {
                            Ok(_) => "accepted".to_string(),
                            Err(rejection) => rejection.message,
                        }
                    },
                ),
            )
            .layer(axum::extract::DefaultBodyLimit::max(16));

        let req = Request::builder()
            .method("POST")
            .uri("/x")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("name={}", "a".repeat(64))))
            .unwrap();

        let response = tower::ServiceExt::oneshot(app, req).await.unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let message = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(message.contains("length limit exceeded"), "{message}");
    }

    #[tokio::test]
    async fn test_invalid_query_is_rejected() {
        #[derive(Debug, Deserialize)]
        struct Numbered {
            #[allow(dead_code)]
            count: u32,
        }

        let req = Request::builder()
            .method("POST")
            .uri("/x?count=many")
            .body(Body::empty())
            .unwrap();

        let rejection = Params::<Numbered>::from_request(req, &()).await.unwrap_err();
        assert!(!rejection.message.is_empty());
    }

    #[tokio::test]
    async fn test_missing_parameter_is_none() {
        let req = Request::builder()
            .method("POST")
            .uri("/x")
            .body(Body::empty())
            .unwrap();

        let Params(fields) = Params::<Fields>::from_request(req, &()).await.unwrap();
        assert!(fields.name.is_none());
    }
}
