use rti_portal::config::AppConfig;
use rti_portal::error::AppError;
use rti_portal::workflows::application::{ApplicationForm, SubmitError};
use rti_portal::workflows::dashboard;
use tracing::info;

use crate::cli::{AccountArgs, SubmitArgs};
use crate::infra;

pub(crate) async fn run_login(config: &AppConfig, args: AccountArgs) -> Result<(), AppError> {
    let client = infra::build_client(config);
    let session = infra::sign_in(client, &args).await?;

    println!("Signed in as {} <{}>", session.user_name, session.email);
    println!("Role: {}  User id: {}", session.role, session.id);
    Ok(())
}

pub(crate) async fn run_dashboard(config: &AppConfig, args: AccountArgs) -> Result<(), AppError> {
    let client = infra::build_client(config);
    let session = infra::sign_in(client.clone(), &args).await?;
    info!(user = %session.user_name, "fetching dashboard counters");

    let snapshot = dashboard::refresh(&client).await?;
    let counts = snapshot.counts;

    println!(
        "Dashboard as of {}",
        snapshot.refreshed_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!("  Total applications    {:>6}", counts.total);
    println!("  Returned              {:>6}", counts.returned);
    println!("  Refused               {:>6}", counts.refused);
    println!("  Pending               {:>6}", counts.pending);
    println!("  Disposed              {:>6}", counts.disposed);
    println!("  First appeals         {:>6}", counts.first_appeals);
    println!("  Second appeals        {:>6}", counts.second_appeals);
    Ok(())
}

pub(crate) async fn run_submit(config: &AppConfig, args: SubmitArgs) -> Result<(), AppError> {
    let client = infra::build_client(config);
    infra::sign_in(client.clone(), &args.account).await?;

    let mut draft = infra::load_draft(&args.draft)?;
    if let Some(path) = &args.bpl_file {
        draft.bpl_file = Some(infra::load_attachment(path)?);
    }

    let mut form = ApplicationForm::load(client, args.application_id.as_deref()).await;
    if let Some(id) = &args.application_id {
        if !form.is_edit() {
            eprintln!("Application {id} could not be loaded; refusing to create a duplicate");
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("application {id} not found"),
            )));
        }
    }
    *form.draft_mut() = draft;

    if let Err(errors) = form.validate() {
        eprintln!("Draft failed validation:");
        for error in &errors {
            eprintln!("  {}: {}", error.field, error.message);
        }
        return Err(AppError::Submit(SubmitError::Validation(errors)));
    }

    let record = form.submit().await?;
    if form.is_edit() {
        println!("Application {} updated", record.id);
    } else {
        println!("Application {} created", record.id);
    }
    Ok(())
}
