use crate::prelude::*;
use clap::Parser;

mod discovery;
mod error;
mod failed;
mod generate;
mod prelude;
mod providers;
mod regen;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Converts LLM-oriented source documents (docs/llm/) into human-readable \
                  documentation (docs/en/).\n\
                  Companion files are merged into their main file: \
                  foo.md + foo-impl.md + foo-testing.md -> docs/en/foo.md"
)]
pub struct App {
    #[clap(flatten)]
    generate: crate::generate::App,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "DOCGEN_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    crate::generate::run(app.generate, app.global).await
}
