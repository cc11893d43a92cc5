use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use applicant_form::state::FAILURE_NOTICE;
use applicant_form::{
    submit_form, FileField, FileInput, FormClient, FormState, Phase, TextField, DEFAULT_ENDPOINT,
};

/// Fill in and submit an application from the command line.
#[derive(Parser, Debug)]
#[command(name = "apply", version)]
struct Cli {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    address: String,
    /// male, female or other
    #[arg(long)]
    gender: String,
    #[arg(long)]
    degree: String,
    /// Path to the resume (PDF)
    #[arg(long)]
    resume: Option<PathBuf>,
    /// Optional photo
    #[arg(long)]
    photo: Option<PathBuf>,
    #[arg(long, env = "APPLY_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let resume = read_file(cli.resume.as_deref()).await?;
    let photo = read_file(cli.photo.as_deref()).await?;

    let state = FormState::new()
        .with_text(TextField::Name, cli.name)
        .with_text(TextField::Email, cli.email)
        .with_text(TextField::Phone, cli.phone)
        .with_text(TextField::Address, cli.address)
        .with_text(TextField::Gender, cli.gender)
        .with_text(TextField::Degree, cli.degree)
        .with_file(FileField::Resume, resume)
        .with_file(FileField::Photo, photo);

    let client = FormClient::new(cli.endpoint)?;
    let state = submit_form(state, &client).await;

    match state.phase() {
        Phase::Submitted => {
            println!("Form Submitted! Thank you for your submission.");
            Ok(())
        }
        _ if state.has_errors() => {
            for (field, message) in state.errors() {
                eprintln!("{field}: {message}");
            }
            bail!("form has {} invalid field(s)", state.errors().count())
        }
        _ => bail!(state.notice().unwrap_or(FAILURE_NOTICE)),
    }
}

async fn read_file(path: Option<&Path>) -> Result<Option<FileInput>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.bin".to_string());
    Ok(Some(FileInput::new(file_name, content_type_for(path), bytes)))
}

/// Content type from the file extension; unknown extensions are sent as octet-stream.
fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
