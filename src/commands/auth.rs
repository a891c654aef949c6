//! Organization sign-in, credential registration and Telegram account linking.

use super::{CommandError, require_token};
use crate::backend::{Backend, Credentials, OrganizationForm};
use crate::config::Session;
use crate::routes::Route;
use crate::{print_cmd_info, print_cmd_success, print_cmd_warn};
use std::path::Path;

const AUTH_FAILED: &str = "Authentication failed. Please check your credentials.";
const LINK_FAILED: &str = "Sorry not able to authenticate";

/// Placeholder the backend receives for a logout path segment the session never stored.
const MISSING_SEGMENT: &str = "null";

/// Creates an organization account and stores its token.
pub async fn signup(
    credentials: &Credentials,
    session_path: &Path,
    backend: &dyn Backend,
) -> Result<Route, CommandError> {
    let token = backend
        .signup(credentials)
        .await
        .map_err(|e| CommandError::backend(AUTH_FAILED, e))?;

    let mut session = Session::load_or_default(session_path)?;
    session.token = Some(token.access_token);
    session.save(session_path)?;

    print_cmd_success!(
        "Signup successful!",
        "Now submit your organization credentials."
    );
    Ok(Route::Organization)
}

/// Logs the organization in, storing the token and the phone the backend has on file.
pub async fn login(
    credentials: &Credentials,
    session_path: &Path,
    backend: &dyn Backend,
) -> Result<Route, CommandError> {
    let token = backend
        .login(credentials)
        .await
        .map_err(|e| CommandError::backend(AUTH_FAILED, e))?;

    let mut session = Session::load_or_default(session_path)?;
    session.token = Some(token.access_token);
    if token.phone.is_some() {
        session.phone = token.phone;
    }
    session.save(session_path)?;

    print_cmd_success!("Login successful!", "Session saved to {}", session_path.display());
    Ok(Route::Dashboard)
}

/// Invalidates the linked session on the backend, then removes every stored session key.
///
/// The local session survives a failed logout request.
pub async fn logout(session_path: &Path, backend: &dyn Backend) -> Result<Route, CommandError> {
    if !session_path.exists() {
        print_cmd_info!("No session found.", "{}", session_path.display());
        return Ok(Route::Home);
    }
    let session = Session::load_or_default(session_path)?;

    let organization_id = session
        .organization_id
        .as_deref()
        .unwrap_or(MISSING_SEGMENT);
    let phone = session.phone.as_deref().unwrap_or(MISSING_SEGMENT);

    let response = backend
        .logout(organization_id, phone)
        .await
        .map_err(|e| CommandError::backend("Logout failed", e))?;
    log::debug!("Logout response: {:?}", response);

    Session::clear(session_path)?;
    if response.message.is_empty() {
        print_cmd_success!("Logged out.", "");
    } else {
        print_cmd_success!("Logged out.", "{}", response.message);
    }
    Ok(Route::Home)
}

/// Registers the organization's integration credentials and stores the organization id.
pub async fn register_organization(
    form: &OrganizationForm,
    session_path: &Path,
    backend: &dyn Backend,
) -> Result<Route, CommandError> {
    let mut session = Session::load_or_default(session_path)?;
    require_token(&session)?;

    let response = backend
        .register_organization(form)
        .await
        .map_err(|e| CommandError::backend("Failed to submit organization credentials", e))?;

    if let Some(organization_id) = response.organization_id {
        session.organization_id = Some(organization_id);
        session.save(session_path)?;
    } else if !response.success {
        return Err(CommandError::Rejected(response.message));
    }

    print_cmd_success!("Organization credentials submitted successfully!", "");
    Ok(Route::LinkAccount)
}

/// Links a Telegram account in two steps: request a code for `phone`, then submit it.
///
/// `prompt_code` is only called when the backend says a code is required. It receives the
/// backend's message and returns the code the user typed.
pub async fn link_account<F>(
    phone: &str,
    session_path: &Path,
    backend: &dyn Backend,
    prompt_code: F,
) -> Result<Route, CommandError>
where
    F: FnOnce(&str) -> std::io::Result<String>,
{
    let mut session = Session::load_or_default(session_path)?;
    require_token(&session)?;

    let response = backend
        .telegram_login(phone)
        .await
        .map_err(|e| CommandError::backend(LINK_FAILED, e))?;

    if !response.success {
        return Err(CommandError::Rejected(response.message));
    }

    if response.requires_code {
        let code = prompt_code(&response.message)?;
        let verified = backend
            .submit_code(phone, code.trim())
            .await
            .map_err(|e| CommandError::backend(LINK_FAILED, e))?;
        if !verified.success {
            return Err(CommandError::Rejected(verified.message));
        }
        print_cmd_success!("Account linked.", "{}", verified.message);
    } else {
        print_cmd_info!("Account already linked.", "{}", response.message);
    }

    session.phone = Some(phone.to_string());
    session.save(session_path)?;
    Ok(Route::Dashboard)
}

/// Re-checks a previously linked phone, as the linking screen does on open.
///
/// Returns `Some(Route::Dashboard)` when the backend still answers for the stored phone.
pub async fn check_existing_link(
    session: &Session,
    backend: &dyn Backend,
) -> Option<Route> {
    let phone = session.phone.as_deref()?;
    match backend.telegram_login(phone).await {
        Ok(response) if response.success && !response.requires_code => Some(Route::Dashboard),
        Ok(_) => None,
        Err(e) => {
            print_cmd_warn!("Session check failed.", "{}", e);
            None
        }
    }
}
