use std::io::{self, Read, Write};

use tracing::{error, info, Level};
use tutor_lib::client::DoubtSolverClient;
use tutor_lib::config::{self, constants};
use tutor_lib::conversation::Conversation;
use tutor_lib::errors::ChatError;
use tutor_lib::models::Subject;
use tutor_lib::session::SessionContext;

struct CliArgs {
    subject: Subject,
    question: String,
}

fn parse_args(args: impl Iterator<Item = String>) -> anyhow::Result<CliArgs> {
    let mut subject = constants::default_subject();
    let mut words = Vec::new();
    let mut args = args;
    while let Some(arg) = args.next() {
        if arg == "--subject" {
            let value = args
                .next()
                .ok_or_else(|| anyhow::anyhow!("--subject needs a value"))?;
            subject = value.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        } else {
            words.push(arg);
        }
    }

    let question = if words.is_empty() {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        input.trim().to_string()
    } else {
        words.join(" ")
    };
    Ok(CliArgs { subject, question })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    let config_path = std::env::var("CONFIG_FILE_PATH")
        .unwrap_or_else(|_| constants::DEFAULT_CONFIG_PATH.to_string());
    info!("Loading configuration from {}", config_path);
    let config = config::load_config(&config_path).map_err(|e| {
        anyhow::anyhow!("Failed to load YAML configuration from {}: {}", config_path, e)
    })?;
    if let Err(val_errors) = config::validation::validate_config(&config) {
        error!("Configuration from {} is invalid: {:?}. Halting.", config_path, val_errors);
        return Err(anyhow::anyhow!("Invalid config: {:?}", val_errors));
    }

    let client = DoubtSolverClient::new(&config.gateway)
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;
    let ctx = SessionContext::anonymous();
    let mut conversation = Conversation::new(args.subject);

    let mut printed = 0usize;
    let mut stdout = io::stdout();
    let result = conversation
        .send(&client, &ctx, &args.question, |answer| {
            let _ = stdout.write_all(answer[printed..].as_bytes());
            let _ = stdout.flush();
            printed = answer.len();
        })
        .await;

    match result {
        Ok(_) => {
            println!();
            Ok(())
        }
        Err(e @ (ChatError::RateLimited | ChatError::PaymentRequired)) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
        Err(e) if e.is_retryable() => {
            eprintln!("{e} Please try sending your question again.");
            std::process::exit(1);
        }
        Err(e) => Err(anyhow::anyhow!(e)),
    }
}
