//! Messadmin CLI - admin console for the LivMeal mess marketplace.
//!
//! Command-line interface for reviewing mess registrations: list messes by
//! verification status, inspect one, accept or reject pending ones, manage
//! admin accounts and platform charges, or work interactively in the
//! terminal dashboard.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use futures::future::join_all;
use messadmin_core::config::DEFAULT_CONFIG_FILE;
use messadmin_core::{
    AdminConfig, AdminError, AdminRuntime, ChangePasswordForm, DashboardOverview, Decision,
    FetchTrigger, LoginForm, MessCardView, MessViewState, Operation, PlatformConfigForm,
    RegisterForm, VerificationStatus,
};
use messadmin_notify::{NoticeContext, NoticeLevel, Notification};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{error, info};

mod app;
mod tui;

/// Messadmin - mess verification console
///
/// Review and verify mess registrations against the LivMeal backend.
#[derive(Parser)]
#[command(name = "messadmin", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Path to the TOML configuration file [default: messadmin.toml, optional]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the backend API (overrides the config file)
    #[arg(long, global = true, env = "MESSADMIN_API_BASE_URL")]
    api_base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

/// Available messadmin commands
#[derive(Subcommand)]
enum Commands {
    /// List messes grouped by verification status
    List {
        /// Only show messes with this status (verified, pending, rejected)
        #[arg(short, long)]
        status: Option<VerificationStatus>,

        /// Print the records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show every detail of one mess
    Show {
        /// Mess identifier
        id: String,
    },

    /// Verify one or more pending messes
    ///
    /// Updates are sent concurrently; each mess succeeds or fails on its own.
    Approve {
        /// Mess identifiers
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Reject one or more pending messes
    ///
    /// Updates are sent concurrently; each mess succeeds or fails on its own.
    Reject {
        /// Mess identifiers
        #[arg(required = true)]
        ids: Vec<String>,

        /// Reason shown to the mess owner (defaults to the configured reason)
        #[arg(short, long)]
        reason: Option<String>,
    },

    /// Show the dashboard overview
    Dashboard,

    /// Log in as an admin
    Login {
        /// Admin email
        #[arg(long)]
        email: String,

        /// Admin password
        #[arg(long, env = "MESSADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Register a new admin account
    Register {
        /// Full name
        #[arg(long)]
        name: String,

        /// 10 digit contact number
        #[arg(long)]
        contact: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Password (at least 6 characters)
        #[arg(long, env = "MESSADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Change the admin password
    ChangePassword {
        /// Current password
        #[arg(long, env = "MESSADMIN_PASSWORD", hide_env_values = true)]
        current_password: String,

        /// New password (at least 8 characters)
        #[arg(long, env = "MESSADMIN_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,

        /// New password again
        #[arg(long)]
        confirm_password: String,
    },

    /// Update GST and platform fee percentages
    SetFees {
        /// GST in percent
        #[arg(long)]
        gst: String,

        /// Platform fee in percent
        #[arg(long)]
        platform_fee: String,
    },

    /// Open the interactive terminal dashboard
    Tui,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing subscriber
    let interactive = matches!(cli.command, Commands::Tui);
    if let Err(e) = init_tracing(cli.verbose, cli.log_file.as_deref(), interactive) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    // Execute command
    if let Err(e) = run_command(&cli).await {
        // Log with tracing
        error!("Command failed: {:#}", e);
        // Also print to stderr for CLI users
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Initialize tracing subscriber for structured logging.
///
/// The interactive dashboard owns the terminal, so it only logs when a log
/// file is given.
fn init_tracing(verbose: bool, log_file: Option<&Path>, interactive: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    let default_filter = if verbose {
        "messadmin=debug,messadmin_core=debug,messadmin_notify=debug"
    } else {
        "messadmin=info,messadmin_core=info,messadmin_notify=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if interactive => {}
        None => {
            fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

/// Execute the specified command
async fn run_command(cli: &Cli) -> Result<()> {
    let config = load_config(cli).context("Failed to load messadmin configuration")?;
    let runtime = AdminRuntime::new(config).context("Failed to create admin runtime")?;

    match &cli.command {
        Commands::List { status, json } => run_list(&runtime, *status, *json).await,
        Commands::Show { id } => run_show(&runtime, id).await,
        Commands::Approve { ids } => {
            info!("Approving {} mess(es)", ids.len());
            run_decide(&runtime, ids, Decision::Accept, None).await
        }
        Commands::Reject { ids, reason } => {
            info!("Rejecting {} mess(es)", ids.len());
            run_decide(&runtime, ids, Decision::Reject, reason.as_deref()).await
        }
        Commands::Dashboard => run_dashboard(&runtime).await,
        Commands::Login { email, password } => {
            let form = LoginForm::new(email.as_str(), password.as_str());
            runtime
                .login(&form)
                .await
                .map_err(|e| failure(&runtime, Operation::Login, e))?;
            let ctx = NoticeContext::new().with_email(form.email.trim());
            print_notice(&runtime.notice(NoticeLevel::Success, "login_ok", &ctx));
            Ok(())
        }
        Commands::Register {
            name,
            contact,
            email,
            password,
        } => {
            let mut form = RegisterForm {
                name: name.clone(),
                email: email.clone(),
                password: password.clone(),
                ..RegisterForm::default()
            };
            if !form.set_contact(contact) {
                // Keep the raw input so validation reports it.
                form.contact = contact.clone();
            }
            runtime
                .register(&form)
                .await
                .map_err(|e| failure(&runtime, Operation::Register, e))?;
            let ctx = NoticeContext::new().with_email(form.email.trim());
            print_notice(&runtime.notice(NoticeLevel::Success, "register_ok", &ctx));
            Ok(())
        }
        Commands::ChangePassword {
            current_password,
            new_password,
            confirm_password,
        } => {
            let form = ChangePasswordForm::new(
                current_password.as_str(),
                new_password.as_str(),
                confirm_password.as_str(),
            );
            runtime
                .change_password(&form)
                .await
                .map_err(|e| failure(&runtime, Operation::ChangePassword, e))?;
            print_notice(&runtime.notice(
                NoticeLevel::Success,
                "password_changed",
                &NoticeContext::new(),
            ));
            Ok(())
        }
        Commands::SetFees { gst, platform_fee } => {
            let form = PlatformConfigForm::new(gst.as_str(), platform_fee.as_str());
            let config = runtime
                .update_platform_config(&form)
                .await
                .map_err(|e| failure(&runtime, Operation::PlatformConfig, e))?;
            print_notice(&runtime.notice(NoticeLevel::Success, "config_ok", &NoticeContext::new()));
            println!("  GST: {}%", config.gst);
            println!("  Platform fee: {}%", config.platform_fee);
            Ok(())
        }
        Commands::Tui => {
            info!("Starting interactive dashboard...");
            tui::run_dashboard_tui(&runtime)
                .await
                .context("Interactive dashboard failed")
        }
    }
}

/// Resolves configuration: file (or defaults), then the API base override.
///
/// The default file may be absent; an explicitly named one must exist.
fn load_config(cli: &Cli) -> Result<AdminConfig> {
    let path = match &cli.config {
        Some(path) if !path.exists() => return Err(AdminError::ConfigNotFound(path.clone()).into()),
        Some(path) => path.clone(),
        None => PathBuf::from(DEFAULT_CONFIG_FILE),
    };
    let mut config = AdminConfig::load(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if let Some(base) = cli.api_base_url.as_deref() {
        config = config
            .with_api_base_url(base)
            .context("Invalid --api-base-url")?;
    }

    info!(api_base_url = %config.api_base_url, "configuration loaded");
    Ok(config)
}

/// Wraps a workflow error with its user-facing notification.
fn failure(runtime: &AdminRuntime, operation: Operation<'_>, error: AdminError) -> anyhow::Error {
    let notice = runtime.notice_for_error(operation, &error);
    anyhow::Error::new(error).context(notice.message)
}

fn print_notice(notice: &Notification) {
    match notice.level {
        NoticeLevel::Success => println!("✔ {}", notice.message),
        NoticeLevel::Info => println!("{}", notice.message),
        NoticeLevel::Error => eprintln!("✘ {}", notice.message),
    }
}

/// Loads the mess list into a fresh view state.
async fn load(runtime: &AdminRuntime, state: &mut MessViewState) -> Result<()> {
    let report = runtime
        .fetch(state, FetchTrigger::Mount)
        .await
        .map_err(|e| failure(runtime, Operation::Fetch, e))?;
    if let Some(report) = report
        && report.skipped > 0
    {
        print_notice(&runtime.notice_for_fetch(&report));
    }
    Ok(())
}

/// Run the list command
async fn run_list(
    runtime: &AdminRuntime,
    status: Option<VerificationStatus>,
    json: bool,
) -> Result<()> {
    let mut state = MessViewState::new();
    load(runtime, &mut state).await?;

    let statuses: Vec<VerificationStatus> = match status {
        Some(status) => vec![status],
        None => VerificationStatus::ALL.to_vec(),
    };

    if json {
        let records: Vec<_> = state
            .messes()
            .iter()
            .filter(|m| statuses.contains(&m.verification_status))
            .collect();
        let out = serde_json::to_string_pretty(&records).context("Failed to encode messes")?;
        println!("{out}");
        return Ok(());
    }

    for (i, status) in statuses.iter().enumerate() {
        let records = state.partition(*status);
        if i > 0 {
            println!();
        }
        println!("{} ({})", status.label(), records.len());
        if records.is_empty() {
            println!("  No {} messes.", status.as_str());
        }
        for record in records {
            print_card(&MessCardView::from_record(record, false));
        }
    }

    Ok(())
}

fn print_card(card: &MessCardView) {
    let delivery = if card.delivery_available {
        " | Delivery Available"
    } else {
        ""
    };
    println!("  {}  {}", card.id, card.name);
    println!("      {}", card.address);
    println!("      {}{}", card.meal_label, delivery);
    if let Some(owner) = &card.owner_name {
        println!("      Owner: {owner}");
    }
    if let Some(contact) = &card.contact {
        println!("      Contact: {contact}");
    }
    if let Some(email) = &card.email {
        println!("      Email: {email}");
    }
    for timing in &card.timings {
        println!("      {}: {} - {}", timing.slot, timing.start, timing.end);
    }
    for plan in &card.plans {
        match &plan.discount {
            Some(discount) => println!("      {} Plan: {} ({discount})", plan.name, plan.price),
            None => println!("      {} Plan: {}", plan.name, plan.price),
        }
    }
    if let Some(reason) = &card.rejection_reason {
        println!("      Reason: {reason}");
    }
}

/// Run the show command
async fn run_show(runtime: &AdminRuntime, id: &str) -> Result<()> {
    let mut state = MessViewState::new();
    load(runtime, &mut state).await?;

    let record = state
        .get(id)
        .ok_or_else(|| AdminError::MessNotFound(id.to_string()))
        .map_err(|e| failure(runtime, Operation::Fetch, e))?;
    let detail = runtime
        .render_detail(record)
        .context("Failed to render mess details")?;
    println!("{detail}");
    Ok(())
}

/// Run the approve and reject commands.
///
/// All updates are dispatched before any response is awaited and each one
/// is completed independently, in whatever order the server answers.
async fn run_decide(
    runtime: &AdminRuntime,
    ids: &[String],
    decision: Decision,
    reason: Option<&str>,
) -> Result<()> {
    let mut state = MessViewState::new();
    load(runtime, &mut state).await?;

    let reason = runtime.rejection_reason(reason).to_string();
    let mut failed = 0usize;
    let mut dispatched = Vec::with_capacity(ids.len());

    for id in ids {
        match state.begin_update(id, decision, &reason) {
            Ok(pending) => dispatched.push(pending),
            Err(e) => {
                failed += 1;
                let name = state.get(id).map_or(id.as_str(), |m| m.name.as_str());
                print_notice(&runtime.notice_for_error(Operation::Verify { id, name }, &e));
            }
        }
    }

    let api = &runtime.apis.mess;
    let results = join_all(
        dispatched
            .iter()
            .map(|pending| api.update_status(pending.id(), pending.request())),
    )
    .await;

    for (pending, result) in dispatched.into_iter().zip(results) {
        let id = pending.id().to_string();
        let name = pending.mess_name().to_string();
        match state.finish_update(pending, result) {
            Ok(outcome) => print_notice(&runtime.notice_for_outcome(&outcome)),
            Err(e) => {
                failed += 1;
                print_notice(&runtime.notice_for_error(
                    Operation::Verify {
                        id: &id,
                        name: &name,
                    },
                    &e,
                ));
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} decision(s) failed", ids.len());
    }
    Ok(())
}

/// Run the dashboard command
async fn run_dashboard(runtime: &AdminRuntime) -> Result<()> {
    let mut state = MessViewState::new();
    load(runtime, &mut state).await?;

    let overview = DashboardOverview::sample().with_counts(state.counts());

    println!("Dashboard Overview");
    println!();
    for stat in &overview.stats {
        println!(
            "  {:<14} {:>8}  {} {}",
            stat.title,
            stat.value,
            stat.trend.arrow(),
            stat.change
        );
    }

    println!();
    println!("Mess Verification");
    for (label, count) in overview.verification.rows() {
        println!("  {label:<14} {count:>8}");
    }
    println!("  {:<14} {:>8}", "Total", overview.verification.total);

    println!();
    println!("Recent Activity");
    for activity in &overview.recent_activity {
        println!("  {} {} ({})", activity.user, activity.action, activity.time);
    }

    Ok(())
}
