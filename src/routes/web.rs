use axum::{
    extract::{Extension, Path, State},
    response::{Html, Redirect},
};
use axum_extra::extract::cookie::SignedCookieJar;
use minijinja::{context, Environment, Value};

use crate::{
    auth::{session, AuthUser},
    disaster::CATEGORIES,
    errors::Result,
    state::AppState,
};

fn render(env: &Environment<'static>, name: &str, ctx: Value) -> Result<Html<String>> {
    let template = env.get_template(name)?;
    Ok(Html(template.render(ctx)?))
}

pub async fn index() -> Redirect {
    Redirect::to("/login")
}

pub async fn signup_page(State(state): State<AppState>) -> Result<Html<String>> {
    render(&state.templates, "signup.html", context! {})
}

pub async fn login_page(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Html<String>> {
    render(&state.templates, "login.html", context! {
        user => session::current_user(&jar),
    })
}

pub async fn dashboard_page(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<Html<String>> {
    render(&state.templates, "dashboard.html", context! {
        user => auth_user.username,
        categories => CATEGORIES,
    })
}

/// Map view. The category is passed through as-is; unknown ones still get a
/// map, the data endpoint falls back to its default cluster.
pub async fn map_page(
    State(state): State<AppState>,
    Path(disaster): Path<String>,
) -> Result<Html<String>> {
    render(&state.templates, "map.html", context! {
        disaster => disaster,
    })
}
