use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use crm_server::{app, model::NewClient, Crm};
use structopt::StructOpt;
use tokio::sync::RwLock;
use tracing_subscriber::EnvFilter;

#[derive(StructOpt)]
#[structopt(about = "Serve the related contracts and sales lists")]
struct Opt {
    #[structopt(long, default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// JSON file with `users`, `clients` and `contracts` to start from
    #[structopt(long, parse(from_os_str))]
    fixture: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opt = Opt::from_args();
    let crm = match &opt.fixture {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Crm::from_json(&json)?
        }
        None => example()?,
    };

    let app = app(Arc::new(RwLock::new(crm)));

    tracing::debug!("listening on {}", opt.addr);

    axum::Server::bind(&opt.addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

fn example() -> Result<Crm> {
    let mut crm = Crm::new();
    let sales = crm.add_user("sales", "sales@example.com")?;
    let client = crm.add_client(NewClient::company("example").sales_contact(sales.id))?;
    crm.add_contract(client.id, sales.id, 1000.0)?;
    crm.add_contract(client.id, sales.id, 2500.0)?;
    Ok(crm)
}
