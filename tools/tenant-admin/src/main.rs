//! Tenant Admin: multi-tenant management console
//!
//! A TUI listing every managed tenant with on-demand tenant details.
//!
//! ## Usage
//!
//! ```bash
//! # Connect to a local API host
//! tenant-admin --endpoint http://127.0.0.1:7071 --tenant partner.onmicrosoft.com
//!
//! # Try it without an API
//! tenant-admin --demo
//! ```

use std::fs::OpenOptions;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tenant_admin::api::{ApiError, TenantApiClient, TenantDetail, TenantSource, TenantSummary};
use tenant_admin::config::Args;
use tenant_admin::domain::{fetch_details, App, AppEvent, Command, SelectionContext};
use tenant_admin::ui::terminal::{self, TerminalGuard};
use tenant_admin::{ui, ConsoleConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ConsoleConfig::try_from(Args::parse()).context("invalid configuration")?;
    init_logging(&config)?;

    let source: Arc<dyn TenantSource> = if config.demo {
        Arc::new(DemoSource::new())
    } else {
        Arc::new(
            TenantApiClient::new(&config.endpoint, config.request_timeout)
                .context("failed to create API client")?,
        )
    };
    info!(endpoint = %config.endpoint, tenant = %config.tenant_id, demo = config.demo, "starting");

    // Restore the terminal even if we panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        terminal::restore();
        original_hook(info);
    }));

    // Setup terminal; the guard restores it on every exit path
    let guard = TerminalGuard::enter().context("failed to set up terminal")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let app = App::new(SelectionContext::new(config.tenant_id.clone()));
    let result = run_app(&mut terminal, app, source, &config).await;

    drop(guard);
    result
}

/// Install a file logger when `--log-file` is given.
///
/// Logging to stdout would draw over the alternate screen, so without a
/// log file no subscriber is installed at all.
fn init_logging(config: &ConsoleConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tenant_admin=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    source: Arc<dyn TenantSource>,
    config: &ConsoleConfig,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(100);

    // Initial listing
    if let Some(command) = app.request_refresh() {
        execute_command(command, &mut app, &source, &tx, config);
    }
    let mut last_refresh = Instant::now();

    loop {
        // Apply finished background work
        while let Ok(event) = rx.try_recv() {
            app.apply(event);
        }

        terminal.draw(|frame| ui::render(frame, &app))?;

        // Handle input with timeout so background results keep flowing in
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    let command = match key.code {
                        KeyCode::Char(c) => app.handle_key(c),
                        KeyCode::Enter => app.handle_enter(),
                        KeyCode::Up => {
                            app.select_prev();
                            None
                        }
                        KeyCode::Down => {
                            app.select_next();
                            None
                        }
                        KeyCode::Backspace => {
                            app.handle_backspace();
                            None
                        }
                        KeyCode::Esc => {
                            app.handle_escape();
                            None
                        }
                        _ => None,
                    };
                    if let Some(command) = command {
                        if command == Command::RefreshList {
                            last_refresh = Instant::now();
                        }
                        execute_command(command, &mut app, &source, &tx, config);
                    }
                }
            }
        }

        if let Some(interval) = config.refresh_interval {
            if last_refresh.elapsed() >= interval {
                last_refresh = Instant::now();
                if let Some(command) = app.request_refresh() {
                    execute_command(command, &mut app, &source, &tx, config);
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

/// Carry out a command. Network work is spawned; results come back on `tx`.
fn execute_command(
    command: Command,
    app: &mut App,
    source: &Arc<dyn TenantSource>,
    tx: &mpsc::Sender<AppEvent>,
    config: &ConsoleConfig,
) {
    match command {
        Command::RefreshList => {
            let source = Arc::clone(source);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = source.list_tenants().await;
                if let Err(e) = &result {
                    warn!(error = %e, "tenant listing failed");
                }
                let _ = tx.send(AppEvent::TenantsLoaded(result)).await;
            });
        }
        Command::FetchDetails(request) => {
            let source = Arc::clone(source);
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = fetch_details(source.as_ref(), request).await;
                let _ = tx.send(AppEvent::DetailsLoaded(outcome)).await;
            });
        }
        Command::Export => {
            let result = app.screen.export(&config.export_dir);
            app.export_finished(result);
        }
    }
}

/// In-memory tenant source for `--demo`.
struct DemoSource {
    tenants: Vec<TenantSummary>,
}

impl DemoSource {
    /// Simulated latency of the detail endpoint.
    const DETAIL_LATENCY: Duration = Duration::from_millis(800);

    fn new() -> Self {
        let tenant = |id: &str, name: &str, domain: &str, errors: u32, last: Option<&str>| {
            TenantSummary {
                id: id.to_string(),
                default_domain_name: domain.to_string(),
                customer_id: format!("{id}-0000-4000-8000-c0ffee000000"),
                display_name: Some(name.to_string()),
                graph_error_count: errors,
                last_graph_error: last.map(str::to_string),
            }
        };

        Self {
            tenants: vec![
                tenant("3f2a1c9e", "Contoso", "contoso.com", 0, None),
                tenant("7b4d2e10", "Fabrikam", "fabrikam.com", 3, Some("Token expired")),
                tenant("a91c5f33", "Adatum", "adatum.onmicrosoft.com", 0, None),
                tenant("c04e8b71", "Northwind Traders", "northwindtraders.com", 1, Some("Access denied")),
                tenant("e55f0a2d", "Tailspin Toys", "tailspintoys.com", 0, None),
                tenant("f1d3b6c8", "Offline Lab", "offline.example", 0, None),
            ],
        }
    }
}

#[async_trait]
impl TenantSource for DemoSource {
    async fn list_tenants(&self) -> Result<Vec<TenantSummary>, ApiError> {
        Ok(self.tenants.clone())
    }

    async fn tenant_details(&self, domain_name: &str) -> Result<TenantDetail, ApiError> {
        tokio::time::sleep(Self::DETAIL_LATENCY).await;

        // One tenant never answers, to show the failure rendering
        if domain_name.ends_with(".example") {
            return Err(ApiError::Connection(format!("{} is unreachable", domain_name)));
        }

        let tenant = self
            .tenants
            .iter()
            .find(|t| t.default_domain_name == domain_name)
            .ok_or_else(|| ApiError::Parse(format!("unknown tenant {}", domain_name)))?;

        Ok(TenantDetail {
            display_name: tenant.display_name.clone(),
            business_phones: Some(vec!["+1 425 555 0100".to_string()]),
            technical_notification_mails: Some(vec![format!("admin@{}", domain_name)]),
            tenant_type: Some("AAD".to_string()),
            created_date_time: Some("2019-04-12T08:31:55Z".to_string()),
            on_premises_sync_enabled: Some(tenant.graph_error_count == 0),
            on_premises_last_sync_date_time: (tenant.graph_error_count == 0)
                .then(|| "2024-05-01T06:00:12Z".to_string()),
            on_premises_last_password_sync_date_time: None,
        })
    }
}
