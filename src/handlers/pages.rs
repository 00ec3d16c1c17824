use axum::response::Html;

const TEMPLATE_DIR: &str = "templates";

// Forms are static files; a missing file degrades to a plain message.
async fn serve_page(name: &str) -> Html<String> {
    let path = format!("{}/{}.html", TEMPLATE_DIR, name);
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html),
        Err(e) => {
            tracing::error!("Failed to read template {}: {}", path, e);
            Html(format!("Error loading {} page", name))
        }
    }
}

pub async fn serve_login_page() -> Html<String> {
    serve_page("login").await
}

pub async fn serve_logout_page() -> Html<String> {
    serve_page("logout").await
}

pub async fn serve_registration_page() -> Html<String> {
    serve_page("registration").await
}

pub async fn serve_create_page() -> Html<String> {
    serve_page("create").await
}

pub async fn serve_assign_page() -> Html<String> {
    serve_page("assign").await
}

pub async fn serve_unassign_page() -> Html<String> {
    serve_page("unassign").await
}

pub async fn serve_complete_page() -> Html<String> {
    serve_page("complete").await
}
