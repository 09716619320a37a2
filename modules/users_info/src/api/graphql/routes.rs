use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::Extension,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use super::schema::UsersSchema;

const GRAPHQL_PATH: &str = "/graphql";

/// Mount `/graphql` on `router`.
///
/// POST always executes. GET serves GraphiQL when `graphiql` is set and
/// executes a query-string request otherwise.
pub fn register_routes(router: Router, schema: UsersSchema, graphiql: bool) -> Router {
    let on_get = if graphiql {
        get(graphiql_page)
    } else {
        get(graphql_handler)
    };

    let graphql = Router::new()
        .route(GRAPHQL_PATH, on_get.post(graphql_handler))
        .layer(Extension(schema));

    tracing::info!(path = GRAPHQL_PATH, graphiql, "GraphQL endpoint mounted");
    router.merge(graphql)
}

async fn graphql_handler(
    Extension(schema): Extension<UsersSchema>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql_page() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}
