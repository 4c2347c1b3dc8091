//! Transport entry point for the person registry.
//!
//! # Responsibility
//! - Parse one command, run it through `PersonService`, print one JSON line
//!   `{"status": <code>, "body": <value>}`.
//! - Treat storage failures and cancellation as fatal (non-zero exit).

mod cli;
mod transport;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use halloffame_core::{
    init_logging, CancelToken, PersonRepository, PersonRequest, PersonService,
    SqlitePersonRepository,
};
use log::info;
use std::io::Read;
use transport::{body_of, empty, respond, TransportResponse};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.core_config().map_err(anyhow::Error::msg)?;

    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, &log_dir.to_string_lossy()).map_err(anyhow::Error::msg)?;
    }

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel())
        .context("failed to install Ctrl-C handler")?;

    let mut conn = config.open_db().context("failed to open person store")?;
    let repo = SqlitePersonRepository::try_new(&mut conn)?;
    let mut service = PersonService::new(repo);

    let response = execute(&mut service, cli.command, &cancel)?;
    info!(
        "event=cli_command module=cli status=done http_status={}",
        response.status
    );
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

fn execute<R: PersonRepository>(
    service: &mut PersonService<R>,
    command: Command,
    cancel: &CancelToken,
) -> Result<TransportResponse> {
    let response = match command {
        Command::List => respond(service.get_all(cancel)?, body_of),
        Command::Get { id } => respond(service.get_by_id(id, cancel)?, body_of),
        Command::Create { body } => {
            let request = parse_body(&body)?;
            respond(service.create(request, cancel)?, empty)
        }
        Command::Update { id, body } => {
            let request = parse_body(&body)?;
            respond(service.update(id, &request, cancel)?, empty)
        }
        Command::Delete { id } => respond(service.delete(id, cancel)?, empty),
    };
    Ok(response)
}

fn parse_body(body: &str) -> Result<PersonRequest> {
    let text = if body == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read request body from stdin")?;
        buffer
    } else {
        body.to_string()
    };
    serde_json::from_str(&text).context("request body is not a valid person JSON document")
}
