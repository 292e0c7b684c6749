//! OTX API CLI binary.
//!
//! A command-line interface for interacting with the OTX API.

use clap::Parser;
use otxapi::cli::{Cli, Command, GetTarget};
use otxapi::{
    get_pulse, get_user_details, search_all_pulses_stream, search_pulses, ApiKeySource,
    ClientConfig, EnvApiKey, List, ListOptions, OtxClient, PageEnvelope, PrettyPrint, Pulse,
    SearchPulse, StaticApiKey,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};

/// Items buffered between the search producer and the printer.
const SEARCH_BUFFER: usize = 10;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    let client = match build_client(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set X_OTX_API_KEY or ALIENVAULT_OTXAPI_KEY, or pass --api-key");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn build_client(cli: &Cli) -> otxapi::Result<OtxClient> {
    let source: Box<dyn ApiKeySource> = match cli.api_key.as_deref() {
        Some(key) if !key.is_empty() => Box::new(StaticApiKey::new(key)),
        _ => Box::new(EnvApiKey::default()),
    };

    let mut config = ClientConfig::from_source(source.as_ref())?;
    if let Some(ref base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(ref user_agent) = cli.user_agent {
        config = config.with_user_agent(user_agent);
    }
    OtxClient::new(config)
}

async fn run(client: &OtxClient, cli: Cli) -> otxapi::Result<()> {
    match cli.command {
        Command::Get { target } => handle_get(client, target, cli.json).await,
        Command::List {
            page,
            limit,
            all,
            one,
        } => handle_list(client, page, limit, all, one, cli.json).await,
        Command::Search {
            query,
            page,
            limit,
            all,
        } => handle_search(client, query, page, limit, all, cli.json).await,
    }
}

async fn handle_get(client: &OtxClient, target: GetTarget, json: bool) -> otxapi::Result<()> {
    match target {
        GetTarget::User => {
            let user = get_user_details(client).await?;
            output_single(&user, json)?;
        }
        GetTarget::Pulse { id } => {
            let pulse = get_pulse(client, &id).await?;
            output_single(&pulse, json)?;
        }
    }
    Ok(())
}

async fn handle_list(
    client: &OtxClient,
    page: Option<u32>,
    limit: Option<u32>,
    all: bool,
    one: bool,
    json: bool,
) -> otxapi::Result<()> {
    let mut opts = ListOptions {
        page: Some(page.unwrap_or(1)),
        per_page: limit,
        query: None,
    };

    if all && json {
        let pulses = Pulse::list_all(client, &opts).await?;
        println!("{}", serde_json::to_string_pretty(&pulses)?);
        return Ok(());
    }

    loop {
        let envelope = Pulse::list_page(client, &opts).await?;

        if one {
            if let Some(pulse) = envelope.items.first() {
                output_single(pulse, json)?;
            }
            return Ok(());
        }

        output_page(&envelope, json, |p| PulseRow::from(p))?;

        if !all {
            return Ok(());
        }
        match envelope.next_page_options() {
            Ok(next) => opts = next,
            Err(e) if e.is_no_page() => return Ok(()),
            Err(e) => return Err(e),
        }
    }
}

async fn handle_search(
    client: &OtxClient,
    query: String,
    page: Option<u32>,
    limit: Option<u32>,
    all: bool,
    json: bool,
) -> otxapi::Result<()> {
    let opts = ListOptions {
        page,
        per_page: limit,
        query: Some(query),
    };

    if all {
        let mut stream = search_all_pulses_stream(client, &opts, SEARCH_BUFFER);
        if json {
            let pulses = stream.collect().await?;
            println!("{}", serde_json::to_string_pretty(&pulses)?);
        } else {
            while let Some(pulse) = stream.recv().await {
                println!("{}", pulse?.pretty_print());
            }
        }
        return Ok(());
    }

    let response = search_pulses(client, &opts).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("Number of results: {}\n", response.page.total_count.unwrap_or(0));
        output_page(&response.page, false, |p| SearchRow::from(p))?;
    }
    Ok(())
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> otxapi::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_page<T, R, F>(page: &PageEnvelope<T>, json: bool, to_row: F) -> otxapi::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
    } else {
        let rows: Vec<R> = page.items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        match (page.total_count, page.has_next()) {
            (Some(total), true) => {
                println!("\n{} of {} total (more available)", page.len(), total)
            }
            (Some(total), false) => println!("\n{} of {} total (end)", page.len(), total),
            (None, true) => println!("\n{} items (more available)", page.len()),
            (None, false) => println!("\n{} items (end)", page.len()),
        }
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct PulseRow {
    id: String,
    name: String,
    author: String,
    created: String,
    indicators: usize,
}

impl From<&Pulse> for PulseRow {
    fn from(p: &Pulse) -> Self {
        Self {
            id: p.id.clone().unwrap_or_default(),
            name: p.name.clone().unwrap_or_default(),
            author: p.author.clone().unwrap_or_default(),
            created: p.created_at.map(|c| c.to_string()).unwrap_or_default(),
            indicators: p.indicators.len(),
        }
    }
}

#[derive(Tabled)]
struct SearchRow {
    id: String,
    name: String,
    indicators: usize,
}

impl From<&SearchPulse> for SearchRow {
    fn from(p: &SearchPulse) -> Self {
        Self {
            id: p.id.clone().unwrap_or_default(),
            name: p.name.clone().unwrap_or_default(),
            indicators: p.indicators.len(),
        }
    }
}
