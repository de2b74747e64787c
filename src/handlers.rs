use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::{
    AppState, auth,
    error::AppError,
    models::{NewTopic, PostFields, SignInForm, SignUpForm, ValidationError},
    policy::Actor,
    views,
};

// The denial policy throughout this module is a soft deny: a request the
// policy rejects is answered with a redirect to a harmless read-only view
// and no mutation, never with a 403. A missing topic or post resolves to
// the 404 page on every path, reads and writes alike.

// --- Topic Handlers ---

pub async fn list_topics(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    let topics = state.repo.list_topics().await?;
    let (jar, flash) = auth::take_flash(jar);
    Ok((jar, views::topic_index(flash.as_deref(), &topics)).into_response())
}

pub async fn show_topic(
    State(state): State<AppState>,
    Path(topic_id): Path<Uuid>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(topic) = state.repo.get_topic(topic_id).await? else {
        return Ok(views::not_found().into_response());
    };
    let posts = state.repo.topic_posts(topic.id).await?;
    let (jar, flash) = auth::take_flash(jar);
    Ok((jar, views::topic_show(flash.as_deref(), &topic, &posts)).into_response())
}

/// Topic creation. Open to any signed-in user; guests are redirected to the
/// index with nothing persisted.
pub async fn create_topic(
    actor: Actor,
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<NewTopic>,
) -> Result<Response, AppError> {
    if !actor.can_create() {
        let jar = auth::set_flash(jar, "You must be signed in to do that.");
        return Ok((jar, Redirect::to("/topics")).into_response());
    }
    if let Err(invalid) = form.validate() {
        let jar = auth::set_flash(jar, &invalid.to_string());
        return Ok((jar, Redirect::to("/topics")).into_response());
    }
    let topic = state.repo.create_topic(form).await?;
    Ok(Redirect::to(&format!("/topics/{}", topic.id)).into_response())
}

// --- Post Handlers ---

pub async fn new_post(
    actor: Actor,
    State(state): State<AppState>,
    Path(topic_id): Path<Uuid>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(topic) = state.repo.get_topic(topic_id).await? else {
        return Ok(views::not_found().into_response());
    };
    if !actor.can_create() {
        let jar = auth::set_flash(jar, "You must be signed in to do that.");
        return Ok((jar, Redirect::to(&format!("/topics/{}", topic.id))).into_response());
    }
    let (jar, flash) = auth::take_flash(jar);
    Ok((jar, views::new_post_form(flash.as_deref(), &topic)).into_response())
}

pub async fn create_post(
    actor: Actor,
    State(state): State<AppState>,
    Path(topic_id): Path<Uuid>,
    jar: CookieJar,
    Form(fields): Form<PostFields>,
) -> Result<Response, AppError> {
    let Some(topic) = state.repo.get_topic(topic_id).await? else {
        return Ok(views::not_found().into_response());
    };
    if !actor.can_create() {
        let jar = auth::set_flash(jar, "You must be signed in to do that.");
        return Ok((jar, Redirect::to(&format!("/topics/{}", topic.id))).into_response());
    }
    // A validation failure is a normal "not created" outcome.
    if let Err(invalid) = fields.validate() {
        let jar = auth::set_flash(jar, &invalid.to_string());
        return Ok((jar, Redirect::to(&format!("/topics/{}/posts/new", topic.id))).into_response());
    }
    // can_create() returned true, so an id is present.
    let Some(author) = actor.user_id() else {
        return Ok(Redirect::to(&format!("/topics/{}", topic.id)).into_response());
    };
    let post = state.repo.create_post(topic.id, author, fields).await?;
    let jar = auth::set_flash(jar, "Post created.");
    Ok((jar, Redirect::to(&format!("/topics/{}/posts/{}", topic.id, post.id))).into_response())
}

/// Readable by anyone, guest included.
pub async fn show_post(
    State(state): State<AppState>,
    Path((topic_id, post_id)): Path<(Uuid, Uuid)>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(topic) = state.repo.get_topic(topic_id).await? else {
        return Ok(views::not_found().into_response());
    };
    let Some(post) = state.repo.get_post(topic_id, post_id).await? else {
        return Ok(views::not_found().into_response());
    };
    let (jar, flash) = auth::take_flash(jar);
    Ok((jar, views::post_show(flash.as_deref(), &topic, &post)).into_response())
}

pub async fn edit_post(
    actor: Actor,
    State(state): State<AppState>,
    Path((topic_id, post_id)): Path<(Uuid, Uuid)>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(topic) = state.repo.get_topic(topic_id).await? else {
        return Ok(views::not_found().into_response());
    };
    let Some(post) = state.repo.get_post(topic_id, post_id).await? else {
        return Ok(views::not_found().into_response());
    };
    if !actor.can_modify(post.user_id) {
        return Ok(Redirect::to(&post_path(topic_id, post_id)).into_response());
    }
    let (jar, flash) = auth::take_flash(jar);
    Ok((jar, views::edit_post_form(flash.as_deref(), &topic, &post)).into_response())
}

pub async fn update_post(
    actor: Actor,
    State(state): State<AppState>,
    Path((topic_id, post_id)): Path<(Uuid, Uuid)>,
    jar: CookieJar,
    Form(fields): Form<PostFields>,
) -> Result<Response, AppError> {
    let Some(post) = state.repo.get_post(topic_id, post_id).await? else {
        return Ok(views::not_found().into_response());
    };
    if !actor.can_modify(post.user_id) {
        // No field changes persisted; the caller lands on the read-only view.
        return Ok(Redirect::to(&post_path(topic_id, post_id)).into_response());
    }
    if let Err(invalid) = fields.validate() {
        let jar = auth::set_flash(jar, &invalid.to_string());
        return Ok(
            (jar, Redirect::to(&format!("{}/edit", post_path(topic_id, post_id)))).into_response(),
        );
    }
    state.repo.update_post(post.id, fields).await?;
    let jar = auth::set_flash(jar, "Post updated.");
    Ok((jar, Redirect::to(&post_path(topic_id, post_id))).into_response())
}

pub async fn destroy_post(
    actor: Actor,
    State(state): State<AppState>,
    Path((topic_id, post_id)): Path<(Uuid, Uuid)>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(post) = state.repo.get_post(topic_id, post_id).await? else {
        return Ok(views::not_found().into_response());
    };
    if !actor.can_modify(post.user_id) {
        // The post and the topic's post count stay untouched.
        return Ok(Redirect::to(&post_path(topic_id, post_id)).into_response());
    }
    state.repo.delete_post(post.id).await?;
    let jar = auth::set_flash(jar, "Post deleted.");
    Ok((jar, Redirect::to(&format!("/topics/{}", topic_id))).into_response())
}

fn post_path(topic_id: Uuid, post_id: Uuid) -> String {
    format!("/topics/{}/posts/{}", topic_id, post_id)
}

// --- Account Handlers ---

pub async fn sign_up_form(jar: CookieJar) -> Response {
    let (jar, flash) = auth::take_flash(jar);
    (jar, views::sign_up_form(flash.as_deref())).into_response()
}

/// Registration. On validation failure the user is sent back to the sign-up
/// form with an error flash and no session; on success a session is
/// established immediately.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignUpForm>,
) -> Result<Response, AppError> {
    if let Err(invalid) = form.validate() {
        let jar = auth::set_flash(jar, &invalid.to_string());
        return Ok((jar, Redirect::to("/users/sign_up")).into_response());
    }
    // Check-then-act: the unique index still backs this up; a race surfaces
    // as a database error rather than a duplicate account.
    if state.repo.find_user_by_email(&form.email).await?.is_some() {
        let jar = auth::set_flash(jar, &ValidationError::EmailTaken.to_string());
        return Ok((jar, Redirect::to("/users/sign_up")).into_response());
    }
    let password_hash = auth::hash_password(&form.password)?;
    let user = state
        .repo
        .create_user(form.email, password_hash, "member".to_string())
        .await?;

    let token = auth::issue_session(user.id, &state.config.session_secret)?;
    let jar = jar.add(auth::session_cookie(token));
    let jar = auth::set_flash(jar, "You've successfully signed in!");
    Ok((jar, Redirect::to("/")).into_response())
}

pub async fn sign_in_form(jar: CookieJar) -> Response {
    let (jar, flash) = auth::take_flash(jar);
    (jar, views::sign_in_form(flash.as_deref())).into_response()
}

pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignInForm>,
) -> Result<Response, AppError> {
    let user = state.repo.find_user_by_email(&form.email).await?;
    let verified = user
        .as_ref()
        .is_some_and(|u| auth::verify_password(&form.password, &u.password_hash));
    let Some(user) = user.filter(|_| verified) else {
        let jar = auth::set_flash(jar, "Sign in failed. Please try again.");
        return Ok((jar, Redirect::to("/users/sign_in")).into_response());
    };

    let token = auth::issue_session(user.id, &state.config.session_secret)?;
    let jar = jar.add(auth::session_cookie(token));
    let jar = auth::set_flash(jar, "You've successfully signed in!");
    Ok((jar, Redirect::to("/")).into_response())
}

pub async fn sign_out(jar: CookieJar) -> Response {
    let jar = auth::clear_session(jar);
    let jar = auth::set_flash(jar, "You've successfully signed out!");
    (jar, Redirect::to("/")).into_response()
}
