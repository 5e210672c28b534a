use blogrig::cli::{Cli, Commands, PostCommands};
use blogrig::commands;
use clap::{CommandFactory, Parser};
use clap_complete::aot::generate;

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with env-filter support.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { dir } => commands::init::run(dir),
        Commands::Serve { port } => commands::serve::run(cli.global.config_file, port).await,
        Commands::Post { command } => match command {
            PostCommands::New { title, layout } => commands::post::run_new(
                cli.global.config_file.as_deref(),
                &title,
                layout.as_deref(),
            ),
            PostCommands::Publish { slug, layout } => commands::post::run_publish(
                cli.global.config_file.as_deref(),
                &slug,
                layout.as_deref(),
            ),
        },
        Commands::Check { port } => {
            commands::check::run(cli.global.config_file.as_deref(), port).await
        }
        Commands::Validate => commands::validate::run(cli.global.config_file.as_deref()).await,
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "blogrig", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
