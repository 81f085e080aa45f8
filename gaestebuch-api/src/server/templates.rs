use crate::server::identity::{AuthUrls, CurrentIdentity};
use askama::Template;
use gaestebuch_common::model::forum::ForumName;
use gaestebuch_common::model::post::Post;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const CREATED_AT_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

/// One post prepared for rendering.
pub struct PostView {
    pub author_name: String,
    pub signed_in: bool,
    pub created_at: String,
    pub content: String,
}

impl PostView {
    fn new(post: Post) -> Result<Self, time::error::Format> {
        Ok(Self {
            author_name: post.author.name.clone(),
            signed_in: !post.author.is_anonymous(),
            created_at: post.created_at.format(CREATED_AT_FORMAT)?,
            content: post.content.into_inner(),
        })
    }
}

/// The forum page: identity state, error banner, sign form, posts.
#[derive(Template)]
#[template(path = "forum.html")]
pub struct ForumTemplate {
    pub forum_name: String,
    pub viewer_name: String,
    pub auth_url: String,
    pub auth_link_text: String,
    pub sign_url: String,
    pub error: String,
    pub has_error: bool,
    pub posts: Vec<PostView>,
}

impl ForumTemplate {
    pub fn new(
        forum_name: &ForumName,
        posts: Vec<Post>,
        identity: &CurrentIdentity,
        auth_urls: &AuthUrls,
        error: String,
    ) -> Result<Self, time::error::Format> {
        let return_uri = format!("/?forum_name={}", urlencoding::encode(forum_name.get()));
        let (auth_url, auth_link_text) = if identity.0.is_some() {
            (auth_urls.logout_url(&return_uri), "Logout")
        } else {
            (auth_urls.login_url(&return_uri), "Login")
        };

        let has_error = !error.is_empty();

        Ok(Self {
            forum_name: forum_name.get().to_owned(),
            viewer_name: identity.viewer_name().to_owned(),
            auth_url,
            auth_link_text: auth_link_text.to_owned(),
            sign_url: format!("/sign?forum_name={}", urlencoding::encode(forum_name.get())),
            error,
            has_error,
            posts: posts
                .into_iter()
                .map(PostView::new)
                .collect::<Result<_, _>>()?,
        })
    }
}
