//! Command-line access to the spec tables.
//!
//! Payloads and results are JSON on stdout; logs go to stderr and `logs/`.
use super::*;
use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct CLI {
    /// PostgreSQL connection string.
    #[arg(long, env = "DB_URL")]
    db_url: String,
    /// Repeat for more terminal output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Create the spec and hyperparameter tables")]
    Migrate,
    #[command(about = "Store a transformer spec read from a JSON file", alias = "put")]
    Store {
        /// Experiment run owning the spec.
        #[arg(long, required = true)]
        run: Run,
        /// Path to a JSON-encoded transformer spec.
        #[arg(required = true)]
        file: std::path::PathBuf,
    },
    #[command(about = "Read a transformer spec by its stored key", alias = "get")]
    Read {
        #[arg(required = true)]
        id: i32,
    },
    #[command(about = "List the hyperparameter rows of a stored spec", alias = "hps")]
    Params {
        #[arg(required = true)]
        id: i32,
    },
}

impl CLI {
    pub fn level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
    pub async fn run(self) -> anyhow::Result<()> {
        let mut client = db(&self.db_url).await?;
        match self.command {
            Command::Migrate => migrate(&client).await?,
            Command::Store { run, file } => {
                let spec = serde_json::from_slice::<TransformerSpec>(&std::fs::read(&file)?)?;
                let tx = client.transaction().await?;
                let record = tx.store(&spec, run).await?;
                tx.commit().await?;
                println!("{}", serde_json::to_string_pretty(&record)?);
            }
            Command::Read { id } => {
                let spec = client.read_spec(ID::from(id)).await?;
                println!("{}", serde_json::to_string_pretty(&spec)?);
            }
            Command::Params { id } => {
                let rows = client.read_hyperparameters(ID::from(id)).await?;
                println!("{}", serde_json::to_string_pretty(&rows)?);
            }
        }
        Ok(())
    }
}
