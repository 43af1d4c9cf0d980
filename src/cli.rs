use anyhow::Result;
use clap::{Args, Parser};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gred")]
#[command(about = "Find red commits: history entries that are mostly deletions")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[arg(long, help = "Output as JSON")]
    pub json: bool,

    #[arg(long, help = "Output as NDJSON")]
    pub ndjson: bool,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Path to git repository")]
    pub repo: Option<PathBuf>,

    #[arg(long, help = "Start date for filtering commits (YYYY-MM-DD). Default is 30 days ago")]
    pub since: Option<String>,

    #[arg(long, help = "Minimum total changed lines", default_value_t = 10)]
    pub min_lines: u64,

    #[arg(long, help = "Minimum deletion percentage", default_value_t = 95)]
    pub min_pct: u32,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        crate::red::exec(self.common, self.json, self.ndjson)
    }
}
