use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use review_desk::client::progress::DEFAULT_PROGRESS_FILE;
use review_desk::client::{
    reconcile, ProgressStore, ResumeHint, ReviewApiClient, Session, SessionEvent, SessionState,
};
use review_desk::features::products::dtos::ProductDto;
use review_desk::features::reviews::ReviewScore;

#[derive(Parser, Debug)]
#[command(name = "review-client", version, about = "Review products from the terminal")]
struct Cli {
    /// Base URL of the review API
    #[arg(long, env = "REVIEW_API_URL", default_value = "http://127.0.0.1:3000")]
    api_url: String,

    /// Where session progress is kept between runs
    #[arg(long, env = "REVIEW_PROGRESS_FILE", default_value = DEFAULT_PROGRESS_FILE)]
    progress_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Commands {
    /// Sign in and review the products of your batch (resumes the saved
    /// session when no credentials are given)
    Review {
        #[arg(long)]
        email: Option<String>,
        #[arg(long, env = "REVIEW_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Show today's and recent review counts
    Dashboard {
        /// Defaults to the saved session's email
        #[arg(long)]
        email: Option<String>,
    },
    /// Forget the saved session
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let api = ReviewApiClient::new(cli.api_url);
    let store = ProgressStore::new(cli.progress_file);

    match cli.command {
        Commands::Review { email, password } => review(&api, &store, email, password).await,
        Commands::Dashboard { email } => dashboard(&api, &store, email).await,
        Commands::Logout => {
            store.clear()?;
            println!("Signed out.");
            Ok(())
        }
    }
}

async fn review(
    api: &ReviewApiClient,
    store: &ProgressStore,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let hint = store.load();
    let mut session = Session::new();

    let email = match (email, password) {
        (Some(email), Some(password)) => {
            session.apply(SessionEvent::LoginRequested {
                email: email.clone(),
            })?;
            match api.authenticate(&email, &password).await {
                Ok(user) => {
                    session.apply(SessionEvent::LoginSucceeded)?;
                    println!("Signed in as {} (batch {})", user.email, user.batch_number);
                }
                Err(e) => {
                    session.apply(SessionEvent::LoginFailed {
                        message: e.to_string(),
                    })?;
                    bail!("{}", session.banner().unwrap_or("Sign-in failed"));
                }
            }
            email
        }
        (None, None) => {
            let email = hint
                .as_ref()
                .map(|h| h.user_email.clone())
                .ok_or_else(|| anyhow!("No saved session; pass --email and --password"))?;
            session.apply(SessionEvent::LoginRequested {
                email: email.clone(),
            })?;
            session.apply(SessionEvent::LoginSucceeded)?;
            println!("Resuming as {}", email);
            email
        }
        _ => bail!("--email and --password must be given together"),
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match api.feed(&email).await {
            Ok(products) => {
                let start = reconcile(hint.as_ref(), &email, &products);
                session.apply(SessionEvent::FeedLoaded { products, start })?;
                break;
            }
            Err(e) => {
                session.apply(SessionEvent::FeedFailed {
                    message: e.to_string(),
                })?;
                println!(
                    "! {}",
                    session.banner().unwrap_or("Could not load products")
                );
                print!("[r]etry / [q]uit > ");
                std::io::stdout().flush()?;

                match lines.next_line().await? {
                    Some(line) if matches!(line.trim(), "" | "r" | "retry") => continue,
                    // saved progress is left as is for the next run
                    _ => return Ok(()),
                }
            }
        }
    }

    loop {
        let (product, position, total) = match session.state() {
            SessionState::Reviewing { queue, .. } => {
                (queue.current().clone(), queue.position(), queue.len())
            }
            _ => break,
        };
        save_progress(store, &session, &email);

        show_product(api, &product, position, total).await;
        if let Some(banner) = session.banner() {
            println!("! {}", banner);
        }
        print!("[l]ike / [d]islike / [q]uit > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let score = match line.trim() {
            "l" | "like" => ReviewScore::Like,
            "d" | "dislike" => ReviewScore::Dislike,
            "q" | "quit" => break,
            other => {
                println!("Unknown choice: {:?}", other);
                continue;
            }
        };

        session.apply(SessionEvent::ReviewRequested(score))?;
        let outcome = match api.submit_review(&product.scrape_id, &email, score).await {
            Ok(_) => SessionEvent::ReviewAccepted,
            Err(e) if e.is_already_reviewed() => SessionEvent::ReviewSkipped,
            Err(e) => SessionEvent::ReviewRejected {
                message: e.to_string(),
            },
        };
        session.apply(outcome)?;
    }

    save_progress(store, &session, &email);

    if matches!(session.state(), SessionState::Complete { .. }) {
        println!("No products left to review in your batch.");
    }
    println!("You reviewed {} products this session.", session.reviewed());
    Ok(())
}

async fn show_product(api: &ReviewApiClient, product: &ProductDto, position: usize, total: usize) {
    println!();
    println!("[{}/{}] {}", position + 1, total, product.product_name);
    if let Some(brand) = &product.brand_name {
        println!("  Brand:    {}", brand);
    }
    if let Some(price) = &product.selling_price {
        println!("  Price:    {}", price);
    }
    if let Some(category) = &product.price_category {
        println!("  Category: {}", category);
    }
    println!("  Reviews:  {}", product.review_count);

    match api.image_url(&product.scrape_id).await {
        Ok(url) => println!("  Image:    {}", url),
        Err(e) => match &product.product_primary_image_url {
            Some(url) => println!("  Image:    {}", url),
            None => println!("  Image:    unavailable ({})", e),
        },
    }
}

/// Best effort; a failed write only costs the resume position
fn save_progress(store: &ProgressStore, session: &Session, email: &str) {
    let hint = match session.state().queue() {
        Some(queue) => ResumeHint {
            user_email: email.to_string(),
            current_product_index: queue.position(),
            products: queue.products().to_vec(),
        },
        None => ResumeHint::new(email),
    };

    if let Err(e) = store.save(&hint) {
        tracing::warn!("Could not save progress to {:?}: {}", store.path(), e);
    }
}

async fn dashboard(
    api: &ReviewApiClient,
    store: &ProgressStore,
    email: Option<String>,
) -> Result<()> {
    let email = email
        .or_else(|| store.load().map(|h| h.user_email))
        .ok_or_else(|| anyhow!("No saved session; pass --email"))?;

    let dashboard = api.dashboard(&email).await?;

    println!("Dashboard for {}", email);
    println!(
        "Today: {} reviewed, {} liked",
        dashboard.today.reviews, dashboard.today.likes
    );
    if dashboard.historical.is_empty() {
        println!("No reviews in the last days.");
    } else {
        println!("{:<12} {:>8} {:>6}", "Date", "Reviews", "Likes");
        for day in &dashboard.historical {
            println!(
                "{:<12} {:>8} {:>6}",
                day.date.to_string(),
                day.reviews,
                day.likes
            );
        }
    }
    Ok(())
}
