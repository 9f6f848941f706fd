use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crm_api::{RelatedList, RelatedRecord};
use schemars::schema_for;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(about = "Write JSON Schemas for the related-list wire types")]
struct Opt {
    /// Directory the schema files are written to
    #[structopt(long, default_value = "../schemas", parse(from_os_str))]
    out: PathBuf,
}

macro_rules! write_schema {
    ($dir:expr, $model:ty, $name:expr) => {{
        let schema = schema_for!($model);
        let output = serde_json::to_string_pretty(&schema)?;
        let path = $dir.join(format!("{}.json", $name));
        std::fs::write(&path, output).with_context(|| format!("writing {}", path.display()))?;
    }};
}

fn write_all(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    write_schema!(dir, RelatedRecord, "related_record");
    write_schema!(dir, RelatedList, "related_list");
    Ok(())
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    write_all(&opt.out)
}
