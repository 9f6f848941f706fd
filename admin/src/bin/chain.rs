use anyhow::Result;
use crm_admin::{render_options, RelatedListLoader, Resource};
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

#[derive(StructOpt)]
#[structopt(about = "Print the options a client's related field would show")]
struct Opt {
    #[structopt(long, default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// `contracts` or `sales`
    resource: Resource,

    client_id: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opt = Opt::from_args();
    let loader = RelatedListLoader::new(&opt.base_url)?;
    let list = loader.fetch(opt.resource, &opt.client_id).await?;

    println!("#{}", opt.resource.target_field());
    println!("{}", render_options(&list.data));
    Ok(())
}
