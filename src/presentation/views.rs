use crate::application::error::{ErrorReport, HttpError};
use crate::domain::entities::PostRecord;
use crate::domain::posts::PostId;
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Internal Server Error",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response(site: SiteChrome) -> Response {
    let view = LayoutContext::new(site, ErrorPageView::not_found());
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Post not found",
    )
    .attach(&mut response);
    response
}

/// Site-wide header values shared by every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteChrome {
    pub title: String,
    pub tagline: String,
}

#[derive(Debug, Clone)]
pub struct LayoutContext<T> {
    pub site: SiteChrome,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(site: SiteChrome, content: T) -> Self {
        Self { site, content }
    }
}

/// One entry of a home-page listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSummaryView {
    pub post_id: PostId,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub author_image: String,
    pub hero_image: String,
    pub publish_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HomePageView {
    pub featured: Vec<PostSummaryView>,
    pub most_recent: Vec<PostSummaryView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostView {
    pub title: String,
    pub subtitle: String,
    pub preview_image: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct ErrorPageView {
    pub heading: &'static str,
    pub message: &'static str,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            heading: "Post not found",
            message: "The post you are looking for does not exist.",
        }
    }
}

/// Shape both listings for the home page, keeping the order they arrived in.
pub fn to_home_page_view(featured: Vec<PostRecord>, recent: Vec<PostRecord>) -> HomePageView {
    HomePageView {
        featured: featured.into_iter().map(to_summary_view).collect(),
        most_recent: recent.into_iter().map(to_summary_view).collect(),
    }
}

pub fn to_post_view(post: PostRecord) -> PostView {
    PostView {
        title: post.title,
        subtitle: post.subtitle,
        preview_image: post.preview_image_path,
        content: post.content,
    }
}

fn to_summary_view(post: PostRecord) -> PostSummaryView {
    PostSummaryView {
        post_id: post.id,
        title: post.title,
        subtitle: post.subtitle,
        author: post.author,
        author_image: post.author_image_path,
        hero_image: post.hero_image_path,
        publish_date: post.publish_date,
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: LayoutContext<HomePageView>,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub view: LayoutContext<PostView>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}
