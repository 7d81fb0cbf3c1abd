use axum::{
    extract::{Form, State},
    response::Redirect,
};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::{
    auth::{service, session},
    errors::Result,
    models::CredentialsForm,
    state::AppState,
};

pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect> {
    service::signup(&state.pool, &form.username, &form.password).await?;
    Ok(Redirect::to("/login"))
}

pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<(SignedCookieJar, Redirect)> {
    let user = service::login(&state.pool, &form.username, &form.password).await?;
    let jar = session::establish(jar, &user.username, state.config.secure_cookies);
    Ok((jar, Redirect::to("/dashboard")))
}

/// Always succeeds, whether or not anyone was logged in.
pub async fn logout(jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    if let Some(username) = session::current_user(&jar) {
        tracing::info!(username = %username, "user logged out");
    }
    (session::clear(jar), Redirect::to("/login"))
}
