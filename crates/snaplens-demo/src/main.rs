use clap::Parser;
use snaplens_classifier::ClassifierGateway;
use snaplens_content::ContentCatalog;
use snaplens_demo::assembler::{ContentPanel, PresentationAssembler};
use snaplens_demo::cli::{Cli, Commands};
use snaplens_demo::server::{run_server, AppState};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            address,
            model,
            catalog,
            verbose,
        } => {
            init_logging(verbose);

            let gateway = Arc::new(ClassifierGateway::new(model.into_config()));

            // Load eagerly: a missing or broken model must block the UI up
            // front rather than failing on the first upload.
            let labels = gateway.labels().await?;

            let catalog = load_catalog(&catalog)?;
            catalog.validate(&labels);

            let assembler = Arc::new(PresentationAssembler::new(catalog)?);
            let state = AppState { gateway, assembler };

            let addr: SocketAddr = format!("{}:{}", address, port).parse()?;

            println!();
            println!("  SnapLens — image classifier demo");
            println!("  Labels: {}", labels.join(", "));
            println!();
            println!("  Open http://{} in your browser", addr);
            println!();

            run_server(state, addr).await?;
        }

        Commands::Classify {
            image,
            label,
            model,
            catalog,
            verbose,
        } => {
            init_logging(verbose);

            let bytes = std::fs::read(&image)?;
            let canonical = snaplens_classifier::decode_image(&bytes)?;

            let gateway = ClassifierGateway::new(model.into_config());
            let labels = gateway.labels().await?;

            let catalog = load_catalog(&catalog)?;
            catalog.validate(&labels);
            let assembler = PresentationAssembler::new(catalog)?;

            let view = assembler
                .assemble(&gateway, &canonical, label.as_deref())
                .await?;

            println!();
            println!("  Prediction: {}", view.predicted_label);
            println!();
            for row in &view.ranking {
                let marker = if row.highlighted { "  <--" } else { "" };
                println!("  {:>8}  {}{}", row.percent, row.label, marker);
            }
            println!();
            match &view.content {
                ContentPanel::Empty { label } => {
                    println!("  No content configured for `{}`.", label);
                }
                ContentPanel::Curated {
                    label,
                    texts,
                    images,
                    videos,
                } => {
                    println!("  Content for `{}`:", label);
                    for text in texts {
                        println!("    text:  {}", text);
                    }
                    for url in images {
                        println!("    image: {}", url);
                    }
                    for video in videos {
                        match &video.thumbnail_url {
                            Some(thumb) => println!("    video: {} (thumbnail {})", video.url, thumb),
                            None => println!("    video: {}", video.url),
                        }
                    }
                }
            }
            println!();
        }
    }

    Ok(())
}

/// Load the content catalog; a missing file is fine (content is optional), a
/// malformed one is not.
fn load_catalog(path: &Path) -> anyhow::Result<ContentCatalog> {
    if !path.exists() {
        warn!(path = %path.display(), "catalog file not found, starting without content");
        return Ok(ContentCatalog::new());
    }
    Ok(ContentCatalog::from_file(path)?)
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
