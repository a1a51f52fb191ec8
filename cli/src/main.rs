mod app;
mod gcp;
mod terminal;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use colored::*;

use gcp::{address::IpifyResolver, api::GkeApi, auth::GcloudAuth, toolchain::GcloudToolchain};
use kubehop_common::config::PollConfig;
use kubehop_core::reconcile::Reconciler;
use kubehop_core::session::Session;

#[derive(Parser)]
#[command(name = "kubehop")]
#[command(about = "Interactive GKE cluster selector and access configurator.")]
#[command(version)]
struct CommandLine {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    CommandLine::parse();

    terminal::logging::init();

    let api = Arc::new(GkeApi::new(Arc::new(GcloudAuth::new())));

    let projects = api
        .list_projects()
        .await
        .context("cannot start without a project list")?;

    let toolchain = Arc::new(GcloudToolchain::new());
    let session = Session::new(projects, api.clone(), toolchain.clone());
    let reconciler = Arc::new(Reconciler::new(
        Arc::new(IpifyResolver::new()),
        api,
        toolchain,
        PollConfig::default(),
    ));

    match app::run(session, reconciler).await? {
        app::Outcome::Finished(cluster) => {
            println!();
            println!(
                "{} Credentials configured for cluster: {}",
                "[+]".green().bold(),
                cluster.bold()
            );
            println!(
                "{} You can now use kubectl against this cluster",
                "[+]".green().bold()
            );
            Ok(())
        }
        app::Outcome::Failed(message) => anyhow::bail!(message),
        app::Outcome::Aborted => std::process::exit(130),
    }
}
