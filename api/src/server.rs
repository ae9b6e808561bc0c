use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Method, Request, header},
    routing::get,
};
use eventbook_common::{caller::Caller, views::ApiErrorResponse};
use eventbook_db::storage::Storage;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info_span;
use utoipa::{
    ToSchema,
    openapi::{ComponentsBuilder, Info, License, OpenApi, RefOr, path::Operation},
};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    config::EventbookApiConfig,
    context::ApiContext,
    handlers::{self, graphql::GRAPHQL_PATH},
};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the HTTP router around a store that has already been checked for
/// readiness.
pub fn make(cfg: &EventbookApiConfig, db: Arc<dyn Storage>) -> anyhow::Result<(Router, OpenApi)> {
    let context = ApiContext::new(db, Caller::from_identity(&cfg.creator_id), !cfg.no_graphiql);

    let allowed_origin = cfg
        .public_url
        .parse::<HeaderValue>()
        .with_context(|| format!("invalid public URL: {}", cfg.public_url))?;

    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(
            x_request_id.clone(),
            MakeRequestUuid,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<_>| {
                    // Log the request ID as generated
                    let request_id = req.headers().get(REQUEST_ID_HEADER);
                    let span = info_span!(
                        "http_request",
                        method = req.method().to_string(),
                        request_id = Option::<&str>::None,
                        path = Option::<&str>::None,
                    );

                    if let Some(request_id) = request_id.and_then(|id| id.to_str().ok()) {
                        span.record("request_id", request_id);
                    };

                    if let Some(path) = req.extensions().get::<MatchedPath>() {
                        span.record("path", path.as_str())
                    } else {
                        span.record("path", req.uri().path())
                    };

                    span
                }),
        )
        .layer(
            CorsLayer::new()
                .allow_credentials(true)
                .allow_origin(allowed_origin)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(PropagateRequestIdLayer::new(x_request_id));

    let (r, a) = api_router()
        .layer(middleware)
        .with_state(context)
        .split_for_parts();

    Ok((r, finish_openapi(a)))
}

/// The OpenAPI document for the REST side of the API, without needing a
/// store.
pub fn openapi() -> OpenApi {
    let (_, a) = api_router().split_for_parts();
    finish_openapi(a)
}

fn api_router() -> OpenApiRouter<ApiContext> {
    let openapi = OpenApi::builder()
        .info(
            Info::builder()
                .title("eventbook API Reference")
                .version(env!("CARGO_PKG_VERSION"))
                .license(Some(
                    License::builder()
                        .name("Apache 2.0 License")
                        .identifier(Some(env!("CARGO_PKG_LICENSE")))
                        .build(),
                )),
        )
        .components(Some(
            ComponentsBuilder::new()
                .schema_from::<ApiErrorResponse>()
                .build(),
        ))
        .build();

    OpenApiRouter::with_openapi(openapi)
        .routes(routes!(handlers::health_check))
        .route(
            GRAPHQL_PATH,
            get(handlers::graphql::graphiql).post(handlers::graphql::graphql_handler),
        )
}

fn finish_openapi(mut a: OpenApi) -> OpenApi {
    a.paths.paths.iter_mut().for_each(|(_path, item)| {
        apply_default_errors(&mut item.get);
        apply_default_errors(&mut item.post);
        apply_default_errors(&mut item.patch);
        apply_default_errors(&mut item.put);
        apply_default_errors(&mut item.delete);
        apply_default_errors(&mut item.trace);
        apply_default_errors(&mut item.head);
        apply_default_errors(&mut item.options);
    });

    a
}

fn apply_default_errors(item: &mut Option<Operation>) {
    if let Some(item) = item {
        item.responses.responses.insert(
            "500".into(),
            RefOr::Ref(
                utoipa::openapi::Ref::builder()
                    .summary("Internal server error")
                    .ref_location_from_schema_name(ApiErrorResponse::name())
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use clap::Parser;
    use eventbook_db::storage::memory::MemoryStorage;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    fn config(args: &[&str]) -> EventbookApiConfig {
        let mut argv = vec!["eventbook-api"];
        argv.extend_from_slice(args);
        EventbookApiConfig::try_parse_from(argv).unwrap()
    }

    fn router(args: &[&str]) -> Router {
        make(&config(args), Arc::new(MemoryStorage::new())).unwrap().0
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = router(&[])
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        assert_eq!(body_text(response).await, "Healthy");
    }

    #[tokio::test]
    async fn test_graphiql_served() {
        let response = router(&[])
            .oneshot(Request::get(GRAPHQL_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
        assert!(body_text(response).await.contains(GRAPHQL_PATH));
    }

    #[tokio::test]
    async fn test_graphiql_disabled() {
        let response = router(&["--no-graphiql"])
            .oneshot(Request::get(GRAPHQL_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_graphql_post() {
        let body = json!({
            "query": "mutation { createUser(userInput: { email: \"a@x.com\", password: \"secret\" }) { email password } }"
        });

        let response = router(&[])
            .oneshot(
                Request::post(GRAPHQL_PATH)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(
            body["data"]["createUser"],
            json!({ "email": "a@x.com", "password": "" })
        );
    }

    #[tokio::test]
    async fn test_graphql_post_blank_creator_is_unauthenticated() {
        let body = json!({
            "query": "mutation { createEvent(eventInput: { title: \"t\", description: \"d\", price: 1, date: \"2024-01-01\" }) { title } }"
        });

        let response = router(&["--creator-id", ""])
            .oneshot(
                Request::post(GRAPHQL_PATH)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["data"]["createEvent"], Value::Null);
        assert_eq!(body["errors"][0]["extensions"]["code"], "UNAUTHENTICATED");
    }

    #[test]
    fn test_invalid_public_url() {
        let result = make(
            &config(&["--public-url", "bad\nurl"]),
            Arc::new(MemoryStorage::new()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_openapi_lists_health_route() {
        let api = openapi();
        assert!(api.paths.paths.contains_key("/health"));
        assert!(
            api.paths.paths["/health"]
                .get
                .as_ref()
                .unwrap()
                .responses
                .responses
                .contains_key("500")
        );
    }
}
