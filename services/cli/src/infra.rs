use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use rti_portal::api::{ApiClient, Session, SessionStore};
use rti_portal::config::AppConfig;
use rti_portal::error::AppError;
use rti_portal::workflows::application::{ApplicationDraft, FileAttachment};
use rti_portal::workflows::auth::{LoginCredentials, LoginFlow};

use crate::cli::AccountArgs;

pub(crate) fn build_client(config: &AppConfig) -> Arc<ApiClient> {
    let session = Arc::new(SessionStore::new());
    Arc::new(ApiClient::new(&config.api, session))
}

/// Interactive sign-in: show the captcha, read the answer from stdin, then
/// exchange credentials. The session lands in the client's store.
pub(crate) async fn sign_in(client: Arc<ApiClient>, account: &AccountArgs) -> Result<Session, AppError> {
    let mut flow = LoginFlow::new(client);
    let answer = prompt(&format!(
        "Security verification, type the code [{}]: ",
        flow.captcha().text()
    ))?;

    let credentials = LoginCredentials {
        user_name_or_email: account.user.clone(),
        password: account.password.clone(),
    };
    let session = flow.sign_in(&credentials, &answer).await?;
    Ok(session)
}

pub(crate) fn prompt(message: &str) -> Result<String, AppError> {
    print!("{message}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

pub(crate) fn load_draft(path: &Path) -> Result<ApplicationDraft, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let draft = serde_json::from_str(&raw).map_err(|err| {
        AppError::Io(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("draft file {}: {err}", path.display()),
        ))
    })?;
    Ok(draft)
}

pub(crate) fn load_attachment(path: &Path) -> Result<FileAttachment, AppError> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment".to_string());
    let content_type = mime_guess::from_path(path).first_or_octet_stream().to_string();
    Ok(FileAttachment {
        file_name,
        content_type,
        bytes,
    })
}
