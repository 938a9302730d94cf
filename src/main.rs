use clap::{Parser, Subcommand};

use mortgage_calc::api::{CalculatePayload, run_calculation, run_http_server};
use mortgage_calc::config::AppConfig;
use mortgage_calc::error::AppError;
use mortgage_calc::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "mortgage-calc",
    about = "Mortgage calculators: purchase, refinance, affordability, rent vs. buy, DSCR and VA"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON calculator API.
    Serve {
        #[arg(long, help = "Bind address, overrides APP_HOST")]
        host: Option<String>,
        #[arg(long, help = "Port, overrides APP_PORT")]
        port: Option<u16>,
    },
    /// Run one calculator and print its results.
    Calculate {
        #[arg(help = r#"Calculator payload, e.g. '{"calculator":"purchase","homePrice":350000}'"#)]
        payload: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let addr = config.server.socket_addr()?;
            run_http_server(addr).await?;
        }
        Command::Calculate { payload } => {
            let payload: CalculatePayload = serde_json::from_str(&payload)?;
            let response = run_calculation(payload);
            println!("{}", response.calculator.title());
            for line in &response.results {
                let marker = if line.result.highlight { "*" } else { " " };
                println!("{marker} {}: {}", line.result.label, line.display);
                if let Some(description) = &line.result.description {
                    println!("    {description}");
                }
            }
        }
    }
    Ok(())
}
