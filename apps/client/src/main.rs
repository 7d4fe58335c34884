use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use careerdesk::api_client::ApiClient;
use careerdesk::browser::{Confirm, FixedAnswer, LoggingNavigator, StdoutClipboard, PORTFOLIO_KEY};
use careerdesk::config::Config;
use careerdesk::models::job::{ApplicationStatus, JobId};
use careerdesk::output::export::ExportFormat;
use careerdesk::session::draft::ResumeFile;
use careerdesk::views::composer::{EXPERIENCE_FIELD, QUESTION_FIELD, TARGET_ROLE_FIELD};
use careerdesk::views::gallery::{CatalogStatus, DocType};
use careerdesk::views::tabs::TabId;
use careerdesk::{App, Browser, ClientError};

/// Career document tools backed by the careerdesk generation service.
#[derive(Parser, Debug)]
#[command(name = "careerdesk", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the template catalog
    Templates,
    /// Submit one generator tab and print its result
    Run(RunArgs),
    /// Manage tracked job applications
    #[command(subcommand)]
    Jobs(JobsCommand),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Tab to submit (generate, score, cover-letter, interview-prep, linkedin,
    /// templates, portfolio, skill-gap, star-coach)
    #[arg(long)]
    tab: TabId,

    /// Text file holding the job description
    #[arg(long)]
    job_description: Option<PathBuf>,

    /// Resume PDF to upload
    #[arg(long)]
    resume: Option<PathBuf>,

    #[arg(long, default_value = "Resume")]
    doc_type: DocType,

    /// Template (or experience level) to select by name
    #[arg(long)]
    template: Option<String>,

    #[arg(long)]
    target_role: Option<String>,

    #[arg(long)]
    question: Option<String>,

    #[arg(long)]
    experience: Option<String>,

    /// Also save the result as md, docx or pdf
    #[arg(long)]
    download: Option<ExportFormat>,

    /// Directory for downloads and portfolio pages
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

#[derive(Subcommand, Debug)]
enum JobsCommand {
    List,
    Add {
        #[arg(long)]
        company: String,
        #[arg(long)]
        role: String,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "Applied")]
        status: ApplicationStatus,
    },
    Update {
        id: JobId,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        status: Option<ApplicationStatus>,
    },
    Delete {
        id: JobId,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Asks on the terminal and accepts `y` / `yes`.
struct PromptConfirm;

impl Confirm for PromptConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!("careerdesk v{} against {}", env!("CARGO_PKG_VERSION"), config.api_url);

    let confirm: Arc<dyn Confirm> = match &cli.command {
        Command::Jobs(JobsCommand::Delete { yes: true, .. }) => Arc::new(FixedAnswer(true)),
        _ => Arc::new(PromptConfirm),
    };
    let browser = Browser {
        clipboard: Arc::new(StdoutClipboard),
        navigator: Arc::new(LoggingNavigator),
        confirm,
    };
    let api = ApiClient::new(config.api_url.clone()).map_err(shown)?;
    let mut app = App::new(api, config.preview_url.clone(), browser);

    match cli.command {
        Command::Templates => templates(&mut app).await,
        Command::Run(args) => run(&mut app, args).await,
        Command::Jobs(command) => jobs(&mut app, command).await,
    }
}

/// Turns a client error into the text the user would have seen on the page.
fn shown(err: ClientError) -> anyhow::Error {
    anyhow!(err.user_message())
}

async fn templates(app: &mut App) -> Result<()> {
    app.switch_tab(TabId::Templates).await.map_err(shown)?;
    let gallery = app
        .panel()
        .as_generator()
        .and_then(|panel| panel.gallery())
        .context("templates tab has no gallery")?;

    if let CatalogStatus::Failed(message) = gallery.status() {
        bail!("{message}");
    }
    for card in gallery.cards() {
        println!("{}\n    {}", card.name, card.description);
    }
    Ok(())
}

async fn run(app: &mut App, args: RunArgs) -> Result<()> {
    if !args.tab.is_generator() {
        bail!("'{}' is not a generator tab, use `careerdesk jobs`", args.tab);
    }
    app.switch_tab(args.tab).await.map_err(shown)?;

    if let Some(path) = &args.job_description {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading job description {}", path.display()))?;
        app.type_job_description(&text);
    }
    if let Some(path) = &args.resume {
        app.choose_resume(Some(read_resume(path).await?));
    }
    if args.tab == TabId::Generate {
        app.select_doc_type(args.doc_type).map_err(shown)?;
    }
    if let Some(name) = &args.template {
        app.select_template(name).map_err(shown)?;
    }
    for (field, value) in [
        (TARGET_ROLE_FIELD, &args.target_role),
        (QUESTION_FIELD, &args.question),
        (EXPERIENCE_FIELD, &args.experience),
    ] {
        if let Some(value) = value {
            app.set_field(field, value).map_err(shown)?;
        }
    }

    app.submit().await.map_err(shown)?;

    if args.tab == TabId::Portfolio {
        let html = app
            .handoff()
            .get(PORTFOLIO_KEY)
            .context("portfolio page was not handed off")?;
        let path = args.out.join("portfolio.html");
        tokio::fs::write(&path, html)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        println!("{}", path.display());
        return Ok(());
    }

    let text = app
        .panel()
        .as_generator()
        .and_then(|panel| panel.output().result_text())
        .context("no result to show")?;
    println!("{text}");

    if let Some(format) = args.download {
        let file = app.download(format).map_err(shown)?;
        let path = file.save_in(&args.out).await.map_err(shown)?;
        info!("Saved {}", path.display());
    }
    Ok(())
}

async fn read_resume(path: &Path) -> Result<ResumeFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading resume {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume.pdf".to_string());
    Ok(ResumeFile::new(file_name, bytes))
}

async fn jobs(app: &mut App, command: JobsCommand) -> Result<()> {
    app.switch_tab(TabId::Tracker).await.map_err(shown)?;

    match command {
        JobsCommand::List => {}
        JobsCommand::Add {
            company,
            role,
            date,
            status,
        } => {
            app.tracker_open_create(date.unwrap_or_else(today))
                .map_err(shown)?;
            let form = app.tracker_form_mut().context("application form is not open")?;
            form.company = company;
            form.role = role;
            form.status = status;
            app.tracker_save().await.map_err(shown)?;
        }
        JobsCommand::Update {
            id,
            company,
            role,
            date,
            status,
        } => {
            app.tracker_open_edit(id).await.map_err(shown)?;
            let form = app.tracker_form_mut().context("application form is not open")?;
            if let Some(company) = company {
                form.company = company;
            }
            if let Some(role) = role {
                form.role = role;
            }
            if let Some(date) = date {
                form.date_applied = date;
            }
            if let Some(status) = status {
                form.status = status;
            }
            app.tracker_save().await.map_err(shown)?;
        }
        JobsCommand::Delete { id, .. } => {
            if !app.tracker_delete(id).await.map_err(shown)? {
                println!("Kept application {id}");
            }
        }
    }

    let tracker = app.tracker().context("job tracker is not open")?;
    for job in tracker.jobs() {
        println!(
            "{:>4}  {:<24} {:<28} {}  {}",
            job.id, job.company, job.role, job.date_applied, job.status
        );
    }
    Ok(())
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
