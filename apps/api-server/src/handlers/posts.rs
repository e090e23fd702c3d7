//! Post CRUD handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::{Post, PostChanges};
use blog_shared::dto::{CreatePostRequest, PostListResponse, PostResponse, UpdatePostRequest};

use crate::middleware::api_key::ApiKeyGuard;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        author: post.author,
        created_at: post.created_at,
    }
}

fn parse_id(raw: &str) -> AppResult<i64> {
    raw.parse().map_err(|_| AppError::invalid_id())
}

/// POST /posts
pub async fn create_post(
    _guard: ApiKeyGuard,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state
        .posts
        .create(&req.title, &req.content, &req.author)
        .await?;

    tracing::info!(post_id = post.id, "Post created");
    Ok(HttpResponse::Created().json(to_response(post)))
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;

    Ok(HttpResponse::Ok().json(PostListResponse {
        posts: posts.into_iter().map(to_response).collect(),
    }))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let post = state.posts.get(id).await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// PATCH /posts/{id}
pub async fn update_post(
    _guard: ApiKeyGuard,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let req = body.into_inner();
    let changes = PostChanges {
        title: req.title,
        content: req.content,
        author: req.author,
    };

    let post = state.posts.update(id, changes).await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    _guard: ApiKeyGuard,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    state.posts.delete(id).await?;

    tracing::info!(post_id = id, "Post deleted");
    Ok(HttpResponse::NoContent().finish())
}
