use clap::Parser;

use benbot_desktop::logging;
use benbot_desktop::ui;
use benbot_desktop::Result;

#[derive(Parser, Debug)]
#[command(name = "benbot-desktop")]
#[command(about = "BenBot desktop chat client")]
struct Cli {
    /// Base URL of the BenBot backend.
    #[arg(long, env = "BENBOT_BACKEND", default_value = "http://127.0.0.1:5000")]
    backend: String,

    #[arg(long, default_value = "BenBot")]
    title: String,
}

fn main() -> Result<()> {
    logging::init_tracing("benbot_desktop");

    let cli = Cli::parse();
    tracing::info!(backend = %cli.backend, "starting BenBot desktop");

    ui::launch_ui_with_config(ui::UiLaunchConfig {
        backend_url: cli.backend,
        title: cli.title,
    })
}
