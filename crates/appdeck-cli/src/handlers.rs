//! Command handlers. Each delegates to the composed [`CliContext`].

use anyhow::{bail, Result};

use appdeck_store::InstallOutcome;

use crate::bootstrap::CliContext;
use crate::presentation::{print_catalog, print_separator};

/// Fetch the catalog and print it.
pub async fn list(ctx: &CliContext) -> Result<()> {
    ctx.catalog.refresh().await;

    let state = ctx.catalog.snapshot();
    if let Some(error) = &state.last_error {
        bail!("could not load the app list: {error}");
    }
    if state.apps.is_empty() {
        println!("The catalog is empty.");
        return Ok(());
    }

    println!("Found {} app(s):\n", state.apps.len());
    print_catalog(&state);
    Ok(())
}

/// Fetch the catalog and report installed state per app.
pub async fn probe(ctx: &CliContext) -> Result<()> {
    ctx.catalog.refresh().await;

    let state = ctx.catalog.snapshot();
    if let Some(error) = &state.last_error {
        bail!("could not load the app list: {error}");
    }

    println!(
        "{} of {} app(s) installed on this host\n",
        state.installed.installed_count(),
        state.apps.len()
    );
    print_catalog(&state);
    Ok(())
}

/// Install the app at `index`.
pub async fn install(ctx: &CliContext, index: usize) -> Result<()> {
    ctx.catalog.refresh().await;

    let state = ctx.catalog.snapshot();
    if let Some(error) = &state.last_error {
        bail!("could not load the app list: {error}");
    }

    let Some(outcome) = ctx.catalog.install(index).await else {
        bail!(
            "no app at index {index}; the catalog has {} app(s)",
            state.apps.len()
        );
    };

    match outcome {
        InstallOutcome::InstallerLaunched { artifact } => {
            println!("Artifact written to {}", artifact.display());
            println!("Finish the installation in the host installer.");
            // Give the deferred recheck a chance to run before exiting
            tokio::time::sleep(appdeck_store::RECHECK_DELAY + std::time::Duration::from_secs(1))
                .await;
            let state = ctx.catalog.snapshot();
            if let Some(app) = state.apps.get(index) {
                if state.installed.is_installed(&app.package_name) {
                    println!("{} is now installed.", app.name);
                }
            }
            Ok(())
        }
        InstallOutcome::OpenedExternally => {
            println!("This host cannot install packages; the download link was opened instead.");
            Ok(())
        }
        InstallOutcome::Rejected(err) | InstallOutcome::Failed(err) => {
            bail!("install failed: {}", err.user_message())
        }
    }
}

/// Show resolved directories and detected capabilities.
pub fn paths(ctx: &CliContext) -> Result<()> {
    println!("appdeck paths and capabilities");
    print_separator(50);
    println!("downloads dir : {}", ctx.downloads_dir.display());
    match &ctx.capabilities.pm {
        Some(pm) => println!("package mgr   : {}", pm.display()),
        None => println!("package mgr   : none (browser mode)"),
    }
    println!(
        "install mode  : {}",
        if ctx.capabilities.is_native() {
            "native"
        } else {
            "open-externally"
        }
    );
    Ok(())
}
