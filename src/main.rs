//! fluxctl - inspect, suspend and resume Flux GitOps resources

use anyhow::{Context, Result};

use fluxctl::cli::{self, Cli, Invocation, Settings};
use fluxctl::commands::Deadline;
use fluxctl::config::{paths, ConfigLoader};
use fluxctl::store::KubeStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse()?;
    cli::init_logging(cli.globals.debug);

    let resource = match cli.invocation {
        Invocation::Config(ref subcommand) => {
            return cli::handle_config_command(
                subcommand,
                &paths::root_config_path(),
                &mut std::io::stdout(),
            );
        }
        Invocation::Version => {
            cli::display_version(&mut std::io::stdout())?;
            return Ok(());
        }
        Invocation::Resource(ref resource) => resource,
    };

    let config = ConfigLoader::load().context("Failed to load configuration")?;
    let settings = Settings::resolve(&cli.globals, &config);
    tracing::debug!("Resolved settings: {:?}", settings);

    // One deadline for every remote call of this invocation
    let deadline = Deadline::after(settings.timeout);

    let client = fluxctl::kube::create_client(cli.globals.context(&config)).await?;
    let store = KubeStore::new(client);

    cli::execute(
        resource,
        &settings,
        &store,
        &deadline,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
    .await
}
