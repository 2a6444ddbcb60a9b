use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "hbnb")]
#[command(about = "HBNB property-rental catalog: REST API server and storage console", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the REST API (`HBNB_API_HOST`/`HBNB_API_PORT` when flags are omitted)
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
        #[arg(short = 'H', long)]
        host: Option<String>,
    },
    /// Create an instance and print its id: `create <Class> [key=value ...]`
    Create { class: Option<String>, params: Vec<String> },
    /// Print one instance
    Show { class: Option<String>, id: Option<String> },
    /// Print every instance, or those of one class
    All { class: Option<String> },
    /// Print the number of instances, or of those of one class
    Count { class: Option<String> },
    /// Set one attribute of an instance
    Update {
        class: Option<String>,
        id: Option<String>,
        key: Option<String>,
        value: Option<String>,
    },
    /// Delete an instance
    Destroy { class: Option<String>, id: Option<String> },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await,
        Commands::Create { class, params } => {
            commands::console::run(|c| c.create(class.as_deref(), &params))
        },
        Commands::Show { class, id } => {
            commands::console::run(|c| c.show(class.as_deref(), id.as_deref()))
        },
        Commands::All { class } => commands::console::run(|c| c.all(class.as_deref())),
        Commands::Count { class } => commands::console::run(|c| c.count(class.as_deref())),
        Commands::Update { class, id, key, value } => commands::console::run(|c| {
            c.update(class.as_deref(), id.as_deref(), key.as_deref(), value.as_deref())
        }),
        Commands::Destroy { class, id } => {
            commands::console::run(|c| c.destroy(class.as_deref(), id.as_deref()))
        },
    }
}
