use axum::{
    http::StatusCode,
    response::Html,
};

use crate::models::{Post, Topic};

/// Escapes user-supplied text for safe interpolation into HTML.
fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Shared page chrome: header, nav, flash banner.
fn layout(title: &str, flash: Option<&str>, body: &str) -> Html<String> {
    let flash_html = match flash {
        Some(message) => format!(r#"<p class="flash">{}</p>"#, escape(message)),
        None => String::new(),
    };
    Html(format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title} | Forum</title>
  <style>
    body {{ font-family: system-ui, sans-serif; max-width: 720px; margin: 2rem auto; }}
    nav a {{ margin-right: 1rem; color: #0366d6; text-decoration: none; }}
    .flash {{ background: #fff3cd; border: 1px solid #ffe69c; padding: 0.5rem; }}
    .post {{ border-bottom: 1px solid #eee; padding: 0.5rem 0; }}
    .muted {{ color: #666; font-size: 0.9rem; }}
    input[type="text"], input[type="email"], input[type="password"], textarea {{ width: 100%; }}
    textarea {{ min-height: 6rem; }}
  </style>
</head>
<body>
  <nav>
    <a href="/">Home</a>
    <a href="/topics">Topics</a>
    <a href="/users/sign_up">Sign Up</a>
    <a href="/users/sign_in">Sign In</a>
    <a href="/users/sign_out">Sign Out</a>
  </nav>
  {flash_html}
  {body}
</body>
</html>
"#,
        title = escape(title),
        flash_html = flash_html,
        body = body,
    ))
}

pub fn topic_index(flash: Option<&str>, topics: &[Topic]) -> Html<String> {
    let mut items = String::new();
    for topic in topics {
        items.push_str(&format!(
            r#"<li><a href="/topics/{id}">{title}</a> <span class="muted">{description}</span></li>"#,
            id = topic.id,
            title = escape(&topic.title),
            description = escape(&topic.description),
        ));
    }
    let body = format!(
        r#"<h1>Topics</h1>
<ul>{items}</ul>
<h2>New Topic</h2>
<form method="post" action="/topics/create">
  <label>Title <input type="text" name="title"></label>
  <label>Description <input type="text" name="description"></label>
  <button type="submit">Create Topic</button>
</form>"#,
    );
    layout("Topics", flash, &body)
}

/// Topic view with its posts in creation order.
pub fn topic_show(flash: Option<&str>, topic: &Topic, posts: &[Post]) -> Html<String> {
    let mut items = String::new();
    for post in posts {
        items.push_str(&format!(
            r#"<li class="post"><a href="/topics/{topic_id}/posts/{id}">{title}</a></li>"#,
            topic_id = topic.id,
            id = post.id,
            title = escape(&post.title),
        ));
    }
    let body = format!(
        r#"<h1>{title}</h1>
<p>{description}</p>
<h2>Posts</h2>
<ul>{items}</ul>
<p><a href="/topics/{id}/posts/new">New Post</a></p>"#,
        title = escape(&topic.title),
        description = escape(&topic.description),
        id = topic.id,
    );
    layout(&topic.title, flash, &body)
}

pub fn post_show(flash: Option<&str>, topic: &Topic, post: &Post) -> Html<String> {
    let body = format!(
        r#"<p class="muted"><a href="/topics/{topic_id}">{topic_title}</a></p>
<h1>{title}</h1>
<p>{post_body}</p>
<form method="post" action="/topics/{topic_id}/posts/{id}/destroy" style="display:inline">
  <a href="/topics/{topic_id}/posts/{id}/edit">Edit</a>
  <button type="submit">Delete</button>
</form>"#,
        topic_id = topic.id,
        topic_title = escape(&topic.title),
        title = escape(&post.title),
        post_body = escape(&post.body),
        id = post.id,
    );
    layout(&post.title, flash, &body)
}

pub fn new_post_form(flash: Option<&str>, topic: &Topic) -> Html<String> {
    let body = format!(
        r#"<h1>New Post</h1>
<p class="muted">in <a href="/topics/{topic_id}">{topic_title}</a></p>
<form method="post" action="/topics/{topic_id}/posts/create">
  <label>Title <input type="text" name="title"></label>
  <label>Body <textarea name="body"></textarea></label>
  <button type="submit">Save</button>
</form>"#,
        topic_id = topic.id,
        topic_title = escape(&topic.title),
    );
    layout("New Post", flash, &body)
}

pub fn edit_post_form(flash: Option<&str>, topic: &Topic, post: &Post) -> Html<String> {
    let body = format!(
        r#"<h1>Edit Post</h1>
<form method="post" action="/topics/{topic_id}/posts/{id}/update">
  <label>Title <input type="text" name="title" value="{title}"></label>
  <label>Body <textarea name="body">{post_body}</textarea></label>
  <button type="submit">Save</button>
</form>"#,
        topic_id = topic.id,
        id = post.id,
        title = escape(&post.title),
        post_body = escape(&post.body),
    );
    layout("Edit Post", flash, &body)
}

pub fn sign_up_form(flash: Option<&str>) -> Html<String> {
    let body = r#"<h1>Sign Up</h1>
<form method="post" action="/users">
  <label>Email <input type="email" name="email"></label>
  <label>Password <input type="password" name="password"></label>
  <label>Confirm Password <input type="password" name="password_confirmation"></label>
  <button type="submit">Sign Up</button>
</form>"#;
    layout("Sign Up", flash, body)
}

pub fn sign_in_form(flash: Option<&str>) -> Html<String> {
    let body = r#"<h1>Sign In</h1>
<form method="post" action="/users/sign_in">
  <label>Email <input type="email" name="email"></label>
  <label>Password <input type="password" name="password"></label>
  <button type="submit">Sign In</button>
</form>"#;
    layout("Sign In", flash, body)
}

/// 404 page for missing topics and posts.
pub fn not_found() -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        layout("Not Found", None, "<h1>Not Found</h1><p>That page does not exist.</p>"),
    )
}
