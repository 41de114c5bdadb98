use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_client::api::{ApiClient, ResumeApi};
use resume_client::builder::{ActionOutcome, DownloadOutcome, ResumeBuilder, SuggestOutcome};
use resume_client::config::Config;
use resume_client::download::DirectoryDownloads;
use resume_client::form::Action;
use resume_client::picker::TemplatePicker;
use resume_client::ui::terminal::TerminalUi;
use resume_client::ui::Ui;

const USAGE: &str = "\
usage: resume-client <command> [arg]

commands:
  templates              list available templates
  pick <index>           print the builder location for a listed template
  template <id>          show a template's stored HTML and CSS sizes
  health                 check the server
  sample [template_id]   fill sample data and preview
  preview [template_id]  preview the form loaded from RESUME_FORM
  generate [template_id] draft a summary with AI
  enhance [template_id]  polish the current summary with AI
  download [template_id] generate and save the PDF";

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_client={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(command) = args.next() else {
        eprintln!("{USAGE}");
        return Ok(ExitCode::FAILURE);
    };
    let arg = args.next();

    let client = ApiClient::new(&config.server_url)?;
    info!("Using resume server at {}", client.base_url());

    let api: Arc<dyn ResumeApi> = Arc::new(client.clone());
    let ui: Arc<dyn Ui> = Arc::new(TerminalUi::new(&config.preview_path));

    let action = match command.as_str() {
        "templates" | "pick" => {
            let mut picker = TemplatePicker::new(api, ui, client.base_url().clone());
            let count = picker.activate().await.len();
            if command == "templates" {
                return Ok(ExitCode::SUCCESS);
            }
            let index: usize = arg
                .context("pick needs a template index")?
                .parse()
                .context("template index must be a number")?;
            if picker.select(index).is_none() {
                bail!("no template at index {index} ({count} listed)");
            }
            return Ok(ExitCode::SUCCESS);
        }
        "template" => {
            let id = arg.context("template needs an id")?;
            let detail = client.template_detail(&id).await?;
            println!(
                "{} (id {}): {}\n  html: {} bytes\n  css: {} bytes",
                detail.name,
                detail.id,
                detail.description,
                detail.html.len(),
                detail.css.len()
            );
            return Ok(ExitCode::SUCCESS);
        }
        "health" => {
            let status = client.health().await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
            return Ok(ExitCode::SUCCESS);
        }
        "sample" => Action::SampleData,
        "preview" => Action::Preview,
        "generate" => Action::GenerateSummary,
        "enhance" => Action::EnhanceSummary,
        "download" => Action::DownloadPdf,
        other => {
            eprintln!("unknown command '{other}'\n\n{USAGE}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let downloads = Arc::new(DirectoryDownloads::new(&config.download_dir));
    let mut builder = ResumeBuilder::new(api, ui, downloads);
    let location = client.builder_location(arg.as_deref())?;
    builder.activate(Some(&location));

    if let Some(values) = config.load_form_values()? {
        let loaded = builder.form_mut().load_json(&values);
        info!("Loaded {loaded} form fields");
    }

    let outcome = builder.dispatch(action).await;
    if let ActionOutcome::Suggested(SuggestOutcome::Applied(summary)) = &outcome {
        println!("{summary}");
    }
    if let ActionOutcome::Downloaded(DownloadOutcome::Saved(path)) = &outcome {
        println!("{}", path.display());
    }

    Ok(match outcome {
        ActionOutcome::Previewed
        | ActionOutcome::Suggested(SuggestOutcome::Applied(_))
        | ActionOutcome::Downloaded(DownloadOutcome::Saved(_)) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}
