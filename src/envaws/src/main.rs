use anyhow::{Context, Result};
use aws_sdk_iam::Client as IamClient;
use clap::Parser;
use envaws::cli::{Args, Command, RoleCommand};
use envaws::probe::{probe, StsIdentitySource};
use envaws::profile::{load_params, ProfileStore};
use envaws::render::{render, render_unset, Kind};
use envaws::settings::Settings;
use envaws::{role, sdk};
use log::info;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

async fn list_profiles(settings: &Settings, full: bool) -> Result<()> {
    let store = ProfileStore::load(&settings.credentials_file)?;
    let names = store.profile_names();
    info!("found {} profiles in {}", names.len(), store.path());

    if !full {
        for name in names {
            println!("{name}");
        }
        return Ok(());
    }

    let source = StsIdentitySource::new(settings.clone());
    for row in probe(&source, &names).await {
        println!("{}", row.to_line());
    }
    Ok(())
}

async fn run_role(settings: &Settings, command: RoleCommand) -> Result<()> {
    let config = sdk::load_config(settings).await?;
    let client = IamClient::new(&config);

    match command {
        RoleCommand::Ls { full } => {
            for summary in role::list_roles(&client).await? {
                println!("{}", summary.to_line(full));
            }
        }
        RoleCommand::Get { role_name } => {
            let found = role::get_role(&client, &role_name).await?;
            let json = serde_json::to_string_pretty(&role::role_to_json(&found))
                .context("Failed to serialize role")?;
            println!("{json}");
            if let Some(document) = found.assume_role_policy_document() {
                println!("{}", role::decode_policy_document(document)?);
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let settings = args.settings();

    match args.command {
        Command::Ls { full } => list_profiles(&settings, full).await?,
        Command::Env { profile } => {
            let section = load_params(&settings, &profile)?;
            print!("{}", render(&section, Kind::Env));
        }
        Command::Unset => print!("{}", render_unset()),
        Command::Tf { profile, format } => {
            let section = load_params(&settings, &profile)?;
            print!("{}", render(&section, Kind::Tf(format)));
        }
        Command::Role { command } => run_role(&settings, command).await?,
    }

    Ok(())
}
