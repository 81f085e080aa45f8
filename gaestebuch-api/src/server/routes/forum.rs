use crate::server::extract::{Form, Query};
use crate::server::identity::{AuthUrls, CurrentIdentity};
use crate::server::templates::ForumTemplate;
use crate::server::{Result, ServerRouter, ServerState};
use askama::Template;
use axum::{
    Router,
    extract::State,
    response::{Html, Redirect},
};
use axum_extra::routing::{RouterExt, TypedPath};
use gaestebuch_common::model::forum::ForumName;
use gaestebuch_common::model::post::Author;
use gaestebuch_db::repository::{CreatePostError, PostRepository};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    Router::new().typed_get(show_forum).typed_post(sign_forum)
}

#[derive(TypedPath)]
#[typed_path("/")]
struct ForumPath;

#[derive(Debug, Deserialize)]
struct ForumQuery {
    forum_name: Option<ForumName>,
    error: Option<String>,
}

#[axum::debug_handler(state = ServerState)]
async fn show_forum(
    _: ForumPath,
    Query(query): Query<ForumQuery>,
    identity: CurrentIdentity,
    State(repository): State<Arc<PostRepository>>,
    State(auth_urls): State<AuthUrls>,
) -> Result<Html<String>> {
    let forum_name = query.forum_name.unwrap_or_default();
    let error = query.error.unwrap_or_default();

    let posts = repository.list_posts(&forum_name).await?;
    let template = ForumTemplate::new(&forum_name, posts, &identity, &auth_urls, error)?;

    Ok(Html(template.render()?))
}

#[derive(TypedPath)]
#[typed_path("/sign")]
struct SignPath;

#[derive(Debug, Deserialize)]
struct SignQuery {
    forum_name: Option<ForumName>,
}

#[derive(Debug, Deserialize)]
struct SignForm {
    forum_content: Option<String>,
}

#[axum::debug_handler(state = ServerState)]
async fn sign_forum(
    _: SignPath,
    Query(query): Query<SignQuery>,
    identity: CurrentIdentity,
    State(repository): State<Arc<PostRepository>>,
    Form(form): Form<SignForm>,
) -> Result<Redirect> {
    let forum_name = query.forum_name.unwrap_or_default();
    let author = Author::resolve(identity.0);

    match repository
        .create_post(&forum_name, author, form.forum_content)
        .await
    {
        Ok(()) => Ok(Redirect::to(&forum_url(&forum_name, None))),
        Err(CreatePostError::InvalidContent(error)) => Ok(Redirect::to(&forum_url(
            &forum_name,
            Some(&error.to_string()),
        ))),
        Err(CreatePostError::Store(error)) => Err(error.into()),
    }
}

fn forum_url(forum_name: &ForumName, error: Option<&str>) -> String {
    let mut url = format!("/?forum_name={}", urlencoding::encode(forum_name.get()));
    if let Some(error) = error {
        url.push_str("&error=");
        url.push_str(&urlencoding::encode(error));
    }
    url
}

#[cfg(test)]
mod tests {
    use crate::server::ServerState;
    use crate::server::identity::{AuthUrls, EMAIL_HEADER, IDENTITY_HEADER, NAME_HEADER};
    use crate::server::routes::forum::forum_url;
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use gaestebuch_common::model::forum::ForumName;
    use gaestebuch_db::memory::MemoryDocumentStore;
    use gaestebuch_db::repository::PostRepository;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn router() -> Router {
        let state = ServerState {
            repository: Arc::new(PostRepository::new(MemoryDocumentStore::new())),
            auth_urls: AuthUrls::new("/oauth2/sign_in".to_owned(), "/oauth2/sign_out".to_owned()),
        };

        crate::server::routes().with_state(state)
    }

    async fn get_page(router: &Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn sign(
        router: &Router,
        uri: &str,
        body: &str,
        identity_headers: &[(&str, &str)],
    ) -> (StatusCode, String) {
        let mut request = Request::builder().method("POST").uri(uri).header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        );
        for (name, value) in identity_headers {
            request = request.header(*name, *value);
        }

        let response = router
            .clone()
            .oneshot(request.body(Body::from(body.to_owned())).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|value| value.to_str().unwrap().to_owned())
            .unwrap_or_default();
        (status, location)
    }

    #[test]
    fn forum_urls_are_percent_encoded() {
        assert_eq!(
            forum_url(&ForumName::new("Test"), None),
            "/?forum_name=Test"
        );
        assert_eq!(
            forum_url(&ForumName::new("town square"), None),
            "/?forum_name=town%20square"
        );
        assert_eq!(
            forum_url(&ForumName::new("Test"), Some("PLEASE TYPE IN YOUR COMMENTS!")),
            "/?forum_name=Test&error=PLEASE%20TYPE%20IN%20YOUR%20COMMENTS%21"
        );
    }

    #[tokio::test]
    async fn empty_forum_page_renders() {
        let router = router();

        let (status, page) = get_page(&router, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(page.contains("Forum: Public"));
        assert!(page.contains("No posts yet."));
        assert!(page.contains("Anonymous Poster"));
        assert!(page.contains("Login"));
    }

    #[tokio::test]
    async fn signing_then_reloading_shows_the_post() {
        let router = router();

        let (status, location) =
            sign(&router, "/sign?forum_name=Test", "forum_content=Hello", &[]).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location, "/?forum_name=Test");

        let (status, page) = get_page(&router, &location).await;
        assert_eq!(status, StatusCode::OK);
        assert!(page.contains("Hello"));
        assert!(page.contains("anonymous@anonymous.com"));
    }

    #[tokio::test]
    async fn empty_submission_redirects_with_the_error() {
        let router = router();

        let (status, location) = sign(&router, "/sign?forum_name=Test", "", &[]).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(
            location,
            "/?forum_name=Test&error=PLEASE%20TYPE%20IN%20YOUR%20COMMENTS%21"
        );

        let (status, page) = get_page(&router, &location).await;
        assert_eq!(status, StatusCode::OK);
        assert!(page.contains("PLEASE TYPE IN YOUR COMMENTS!"));
        assert!(page.contains("No posts yet."));
    }

    #[tokio::test]
    async fn signed_in_submissions_carry_the_proxy_identity() {
        let router = router();

        let identity_headers = [
            (IDENTITY_HEADER, "118203"),
            (NAME_HEADER, "ada"),
            (EMAIL_HEADER, "ada@example.com"),
        ];
        let (status, location) =
            sign(&router, "/sign", "forum_content=Hi", &identity_headers).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location, "/?forum_name=Public");

        let (_, page) = get_page(&router, &location).await;
        assert!(page.contains("<b>ada</b>"));
    }

    #[tokio::test]
    async fn lowercase_default_forum_redirects_to_the_canonical_spelling() {
        let router = router();

        let (_, location) = sign(&router, "/sign?forum_name=public", "forum_content=x", &[]).await;
        assert_eq!(location, "/?forum_name=Public");

        let (_, page) = get_page(&router, "/?forum_name=PUBLIC").await;
        assert!(page.contains("Forum: Public"));
    }

    #[tokio::test]
    async fn unknown_routes_reply_not_found() {
        let router = router();

        let (status, _) = get_page(&router, "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
