use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ideaforge::models::{DocumentKind, Domain};
use ideaforge::wizard::RevisionRequest;
use ideaforge::{Config, Services, Step, Wizard};

#[derive(Parser)]
#[command(name = "ideaforge")]
#[command(about = "Turn a product idea into documentation, visuals and an RFP")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the domains an idea can be filed under
    Domains,
    /// Print the resolved configuration as JSON
    Config {
        /// Also write it to the config file, or to this path
        #[arg(long)]
        save: bool,

        #[arg(long, requires = "save")]
        path: Option<PathBuf>,
    },
    /// Show ideas published near the configured location
    Explore {
        /// Domain to filter by (defaults to the first domain)
        #[arg(short, long)]
        domain: Option<String>,
    },
    /// Walk the whole wizard for one idea and download everything it produces
    Run {
        /// Product description
        #[arg(long)]
        idea: String,

        /// Domain, one of `ideaforge domains`
        #[arg(long)]
        domain: String,

        /// Sign in with this name (guest otherwise)
        #[arg(long, requires = "password")]
        user: Option<String>,

        #[arg(long, requires = "user")]
        password: Option<String>,

        /// Revision instruction applied to the selected documents
        #[arg(long, requires = "revise_kind")]
        revise: Option<String>,

        /// Documents to revise (repeatable)
        #[arg(long, value_enum)]
        revise_kind: Vec<KindArg>,

        /// Directory downloads are written to
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Skip the splash screen
        #[arg(long)]
        skip_splash: bool,

        /// Unlock premium after the downloads
        #[arg(long)]
        premium: bool,

        /// Generate a website and save its archive (implies --premium)
        #[arg(long, conflicts_with = "lead_sheet")]
        website: bool,

        /// Publish a lead form from this Excel sheet (implies --premium)
        #[arg(long)]
        lead_sheet: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Requirements,
    Technical,
    Lifecycle,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Requirements => DocumentKind::Requirements,
            KindArg::Technical => DocumentKind::Technical,
            KindArg::Lifecycle => DocumentKind::Lifecycle,
        }
    }
}

/// Initialize tracing on stderr so stdout carries only results.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "ideaforge=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::load();
    let services = Services::from_config(&config).context("Failed to build HTTP clients")?;

    match cli.command {
        Commands::Domains => {
            for domain in Domain::ALL {
                println!("{}", domain);
            }
        }
        Commands::Config { save, path } => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            if save {
                let path = match path {
                    Some(path) => path,
                    None => Config::default_path()?,
                };
                config.save_to(&path)?;
                eprintln!("Saved to {}", path.display());
            }
        }
        Commands::Explore { domain } => {
            let domain = match domain {
                Some(d) => Domain::from_str(&d).ok_or_else(|| anyhow::anyhow!("Unknown domain: {}", d))?,
                None => Domain::ALL[0],
            };
            let ideas = services.ideas.ideas_nearby(domain).await?;
            print_ideas(&ideas);
        }
        Commands::Run {
            idea,
            domain,
            user,
            password,
            revise,
            revise_kind,
            out,
            skip_splash,
            premium,
            website,
            lead_sheet,
        } => {
            let out_dir = out.unwrap_or_else(|| config.resolved_download_dir());
            let mut wizard = Wizard::new(services);

            if skip_splash {
                wizard.open(Step::Login);
            } else {
                wizard.run_splash().await?;
            }

            match (user, password) {
                (Some(user), Some(password)) => wizard.login(&user, &password).await?,
                _ => wizard.continue_as_guest()?,
            };

            wizard.submit_idea(&idea, &domain).await?;
            println!(
                "Idea submitted: {}",
                wizard
                    .session()
                    .current_idea_id()
                    .map(|id| id.to_string())
                    .unwrap_or_default()
            );

            wizard.enter_documentation().await?;
            if let Some(instruction) = revise {
                let mut request = RevisionRequest::new().with_instruction(instruction);
                for kind in revise_kind {
                    request.toggle(kind.into(), true);
                }
                wizard.regenerate(&mut request).await?;
            }
            for (kind, text) in wizard.session().documents().iter() {
                println!("\n== {} ==\n{}", kind.title(), text);
            }

            wizard.continue_to_images()?;
            wizard.generate_images().await?;
            if let (Some(domain), Some(handoff)) =
                (wizard.session().selected_domain(), wizard.image_handoff())
            {
                println!("\n{}: {} generated", domain.visual_label(), handoff.image_urls.len());
            }
            download_everything(&mut wizard, out_dir.clone()).await?;

            if !(premium || website || lead_sheet.is_some()) {
                return Ok(());
            }
            wizard.continue_to_premium()?;
            wizard.purchase_premium()?;

            if website {
                wizard.start_website_generation()?;
                wizard.generate_website().await?;
                let archive = wizard
                    .services()
                    .website
                    .download_website()
                    .await
                    .context("Failed to download website archive")?;
                tokio::fs::create_dir_all(&out_dir).await?;
                let path = out_dir.join("website.zip");
                tokio::fs::write(&path, archive).await?;
                println!("\nWebsite generated: {}", path.display());
            } else if let Some(sheet) = lead_sheet {
                wizard.start_lead_generation()?;
                wizard.upload_lead_sheet(&sheet).await?;
                let form = wizard.generate_lead_form().await?;
                println!("\nLead form: {}", form);
                wizard.finish_leads()?;
            } else {
                return Ok(());
            }

            if let Some(domain) = wizard.session().selected_domain() {
                let ideas = wizard.explore_ideas(domain).await?;
                print_ideas(&ideas);
            }
        }
    }

    Ok(())
}

/// Start every download on the page at once and report each outcome.
async fn download_everything(wizard: &mut Wizard, out_dir: PathBuf) -> anyhow::Result<()> {
    let page = wizard.download_page(out_dir)?;

    let mut failures = 0;
    for (key, result) in page.download_all().await {
        match result {
            Ok(path) => println!("Downloaded {}: {}", key, path.display()),
            Err(e) => {
                failures += 1;
                eprintln!("Download of {} failed: {}", key, e);
            }
        }
    }
    if failures > 0 {
        tracing::warn!("{} download(s) failed", failures);
    }
    Ok(())
}

fn print_ideas(ideas: &[ideaforge::models::Idea]) {
    if ideas.is_empty() {
        println!("No ideas found");
        return;
    }
    for idea in ideas {
        println!("\n{} ({})", idea.title, idea.duration);
        println!("  {}", idea.description);
        for req in idea.requirement_list() {
            println!("  - {}", req);
        }
    }
}
