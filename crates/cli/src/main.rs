use anyhow::Context;
use book_gateway_kernel::settings::Settings;
use book_gateway_upstream::{BookService, CallCtx, GetAllBooksRequest, GrpcBookService};
use clap::{Parser, Subcommand};

/// Operate the book gateway
#[derive(Debug, Parser)]
#[command(name = "book-gateway-cli", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP gateway
    Serve,
    /// Print the resolved settings as JSON
    Config,
    /// Call GetAllBooks once to check that the Book service answers
    Probe {
        /// Substring filter passed upstream
        #[arg(long, default_value = "")]
        search: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load gateway settings")?;

    match cli.command {
        Command::Serve => {
            book_gateway_telemetry::init(&settings.telemetry)?;
            book_gateway::run(settings).await
        }
        Command::Config => {
            let rendered = serde_json::to_string_pretty(&settings)
                .with_context(|| "failed to render settings")?;
            println!("{}", rendered);
            Ok(())
        }
        Command::Probe { search } => probe(&settings, search).await,
    }
}

async fn probe(settings: &Settings, search: String) -> anyhow::Result<()> {
    let service = GrpcBookService::connect(&settings.book_service).await?;

    let response = service
        .get_all_books(
            &CallCtx::new(settings.book_service.call_timeout()),
            GetAllBooksRequest {
                limit: 1,
                offset: 0,
                search,
            },
        )
        .await
        .with_context(|| format!("GetAllBooks against {} failed", service.endpoint()))?;

    println!(
        "book service at {} is up, reporting {} books",
        service.endpoint(),
        response.count
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn probe_search_defaults_to_empty() {
        let cli = Cli::try_parse_from(["book-gateway-cli", "probe"]).unwrap();
        match cli.command {
            Command::Probe { search } => assert_eq!(search, ""),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
