//! voting-dapp command line.
//!
//! ```text
//! deploy-token / deploy-voting ──▶ ContractFactory ──▶ chain ──▶ address
//! connect ──▶ WalletConnector ──▶ SignerHandle
//! status / add-candidate / vote / watch
//!     ──▶ SignerHandle ──▶ OnchainVoting ──▶ VotingSession ──▶ renderer
//! ```

use alloy::primitives::utils::format_ether;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};

use voting_dapp::app::{AppContext, AppError};
use voting_dapp::blockchain::SignerHandle;
use voting_dapp::contracts::OnchainVoting;
use voting_dapp::deploy::{deploy_follow_token, deploy_voting, parse_supply};
use voting_dapp::observability::{logging, metrics};
use voting_dapp::session::render::{render_json, render_view};
use voting_dapp::session::{messages, Countdown, VotingSession};

#[derive(Parser)]
#[command(name = "voting-dapp")]
#[command(about = "Deploy and vote on the Voting contract", long_about = None)]
struct Cli {
    /// Configuration file (defaults apply when it does not exist).
    #[arg(short, long, default_value = "voting.toml")]
    config: PathBuf,

    /// Secrets file holding `alchemyApiKey` and `privateKey`.
    #[arg(short, long, default_value = "secrets.json")]
    secrets: PathBuf,

    /// Network name from the config (defaults to `default_network`).
    #[arg(short, long)]
    network: Option<String>,

    /// Log level override.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy FollowToken, minting the initial supply to the deployer
    DeployToken {
        /// Initial supply in whole tokens
        #[arg(long)]
        initial_supply: Option<String>,
    },
    /// Deploy Voting with an initial candidate list
    DeployVoting {
        /// Candidate name (repeatable)
        #[arg(long = "candidate")]
        candidates: Vec<String>,
        /// Voting window length in minutes
        #[arg(long)]
        duration_minutes: Option<u64>,
    },
    /// Connect the wallet and show the account
    Connect,
    /// Show voting period and candidates
    Status {
        #[arg(long)]
        contract: Option<String>,
        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a candidate (contract owner only)
    AddCandidate {
        name: String,
        #[arg(long)]
        contract: Option<String>,
    },
    /// Vote for the candidate at INDEX
    Vote {
        index: u64,
        #[arg(long)]
        contract: Option<String>,
    },
    /// Live countdown with periodic candidate refresh (Ctrl-C to stop)
    Watch {
        #[arg(long)]
        contract: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let ctx = AppContext::load(&cli.config, &cli.secrets, cli.network.as_deref())?;

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&ctx.config.observability.log_level);
    logging::init_logging(level);

    tracing::info!(network = ctx.network_name(), "voting-dapp v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::DeployToken { initial_supply } => {
            let amount = initial_supply.unwrap_or_else(|| ctx.config.deploy.token_initial_supply.clone());
            let supply = parse_supply(&amount, ctx.config.deploy.token_decimals)?;

            let handle = ctx.connect().await?;
            println!("Deploying contracts with the account: {}", handle.account());

            let deployment = deploy_follow_token(&handle, &ctx.artifacts_dir(), supply).await?;
            println!("FollowToken deployed to: {}", deployment.address);
            if let Some(symbol) = deployment.symbol {
                println!("Minted {} {} to the deployer", amount, symbol);
            }
        }
        Commands::DeployVoting {
            candidates,
            duration_minutes,
        } => {
            let candidates = if candidates.is_empty() {
                ctx.config.deploy.candidates.clone()
            } else {
                candidates
            };
            let duration = duration_minutes.unwrap_or(ctx.config.deploy.duration_minutes);

            let handle = ctx.connect().await?;
            println!("Deploying contracts with the account: {}", handle.account());

            let deployment = deploy_voting(&handle, &ctx.artifacts_dir(), &candidates, duration).await?;
            println!("Voting contract deployed to: {}", deployment.address);
        }
        Commands::Connect => {
            let handle = ctx.connect().await?;
            println!("Connected: {}", handle.account());

            let client = handle.client();
            match client.get_chain_id().await {
                Ok(chain_id) => println!("Chain ID: {}", chain_id.0),
                Err(e) => println!("Chain ID: unavailable ({})", e),
            }
            if let Ok(block) = client.get_block_number().await {
                println!("Block: {}", block);
            }
            if let Ok(balance) = client.get_balance(handle.account()).await {
                println!("Balance: {}", format_ether(balance));
            }
        }
        Commands::Status { contract, json } => {
            let (session, _) = open_session(&ctx, contract.as_deref()).await?;
            let view = session.view();
            if json {
                let text = render_json(view).map_err(|e| AppError::Action(e.to_string()))?;
                println!("{}", text);
            } else {
                print!("{}", render_view(view));
            }
        }
        Commands::AddCandidate { name, contract } => {
            let (mut session, _) = open_session(&ctx, contract.as_deref()).await?;
            if !session.view().is_owner {
                tracing::warn!(account = %session.account(), "Connected account is not the contract owner");
            }

            let outcome = session.add_candidate(&name).await;
            print!("{}", render_view(session.view()));
            match outcome {
                Some(tx) => println!("\nCandidate added in block {} ({})", tx.block_number, tx.tx_hash),
                None => return Err(action_error(&session)),
            }
        }
        Commands::Vote { index, contract } => {
            let (mut session, _) = open_session(&ctx, contract.as_deref()).await?;

            let outcome = session.vote(index).await;
            print!("{}", render_view(session.view()));
            match outcome {
                Some(tx) => println!("\nVote recorded in block {} ({})", tx.block_number, tx.tx_hash),
                None => return Err(action_error(&session)),
            }
        }
        Commands::Watch { contract } => {
            if ctx.config.observability.metrics_enabled {
                match ctx.config.observability.metrics_address.parse() {
                    Ok(addr) => metrics::init_metrics(addr),
                    Err(_) => tracing::error!(
                        metrics_address = %ctx.config.observability.metrics_address,
                        "Failed to parse metrics address"
                    ),
                }
            }

            let (session, handle) = open_session(&ctx, contract.as_deref()).await?;
            watch(&ctx, handle, session).await;
        }
    }

    Ok(())
}

/// Connect, bind the Voting contract and load the initial view.
async fn open_session(
    ctx: &AppContext,
    contract: Option<&str>,
) -> Result<(VotingSession<OnchainVoting>, SignerHandle), AppError> {
    let address = ctx.voting_address(contract)?;
    let handle = ctx.connect().await.map_err(|e| {
        tracing::error!(error = %e, "Wallet connection failed");
        AppError::Action(format!("{}: {}", messages::CONNECT_FAILED, e))
    })?;

    let mut session = VotingSession::new(OnchainVoting::new(address, &handle), handle.account());
    session.initialize().await;
    Ok((session, handle))
}

fn action_error(session: &VotingSession<OnchainVoting>) -> AppError {
    AppError::Action(session.view().error.clone().unwrap_or_else(|| "Action failed".to_string()))
}

async fn watch(ctx: &AppContext, handle: SignerHandle, mut session: VotingSession<OnchainVoting>) {
    print!("{}", render_view(session.view()));
    println!();

    // Without a known window there is nothing to count down to; keep refreshing.
    let mut countdown = session.period_loaded().then(|| {
        Countdown::new(
            session.view().voting_end,
            Duration::from_secs(ctx.config.watch.tick_secs),
        )
    });
    let mut refresh = (ctx.config.watch.refresh_secs > 0).then(|| {
        let period = Duration::from_secs(ctx.config.watch.refresh_secs);
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.reset();
        ticker
    });

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                println!();
                tracing::info!("Interrupted");
                break;
            }
            tick = next_tick(&mut countdown) => {
                let Some(text) = tick else { break };
                print!("\r{:<40}", text);
                let _ = std::io::stdout().flush();
                if countdown.as_ref().is_some_and(Countdown::is_finished) {
                    println!();
                    break;
                }
            }
            _ = next_refresh(&mut refresh) => {
                if !handle.client().is_healthy().await {
                    tracing::warn!("RPC endpoint unreachable");
                }
                session.load_candidates().await;
                println!();
                for candidate in &session.view().candidates {
                    println!("  [{}] {:<24} {} votes", candidate.id, candidate.name, candidate.vote_count);
                }
                if let Some(error) = &session.view().error {
                    println!("Error: {}", error);
                }
            }
        }
    }
}

async fn next_tick(countdown: &mut Option<Countdown>) -> Option<String> {
    match countdown {
        Some(countdown) => countdown.next().await,
        None => std::future::pending().await,
    }
}

async fn next_refresh(refresh: &mut Option<Interval>) {
    match refresh {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
