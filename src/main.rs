// ============================================================================
// LazyMarket - Tableau de bord matières premières et actions
// ============================================================================
// Programme TUI : graphique de prix, news et watchlist pour 22 contrats
// futures et toute action trouvée via la recherche Yahoo Finance
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui gère événements, résultats et rendering
// 3. Worker thread : les appels réseau tournent sur un runtime tokio séparé
// 4. Channels : l'App et le worker ne partagent aucun état
// ============================================================================

use std::io;
use std::sync::mpsc;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use lazymarket::api;
use lazymarket::app::App;
use lazymarket::config::Config;
use lazymarket::store::{FileStorage, WatchlistStore};
use lazymarket::ui::{render, EventHandler};
use lazymarket::worker::{spawn_worker, AppCommand, AppResult};

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place, avec rotation quotidienne
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// Les logs sont écrits dans ./logs/lazymarket.log
///
/// # Utilisation
/// ```bash
/// tail -f logs/lazymarket.log
/// RUST_LOG=lazymarket=trace cargo run
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = std::path::PathBuf::from("./logs");
    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "lazymarket.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(
            // Par défaut : debug pour lazymarket, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazymarket=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!("LazyMarket starting up");

    let config = Config::from_env();
    info!(?config, "Configuration loaded");

    // La watchlist est lue avant le premier rendu
    let mut watchlist = WatchlistStore::new(FileStorage::new(config.data_dir.clone()));
    watchlist.load();

    let client = api::http_client()?;

    // CONCEPT RUST : mpsc channels
    // - command_tx/rx : App -> worker
    // - result_tx/rx : worker -> App
    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Spawning background worker thread");
    let worker = spawn_worker(command_rx, result_tx, client, config.news_limit);

    let mut app = App::new(&config, watchlist)?;
    let events = EventHandler::new(config.event_poll);

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events, &command_tx, &result_rx);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    // Fermer le channel arrête le worker
    drop(command_tx);
    if worker.join().is_err() {
        warn!("Worker thread panicked");
    }

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event Loop
// ============================================================================
// 1. RÉSULTATS : applique ce que le worker a renvoyé
// 2. RENDER    : dessine l'interface
// 3. INPUT     : traite un événement (attente bornée par event_poll)
// 4. UPDATE    : échéances (anti-rebond de la recherche)
// 5. COMMANDES : transmet la boîte d'envoi de l'App au worker
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    command_tx: &mpsc::Sender<AppCommand>,
    result_rx: &mpsc::Receiver<AppResult>,
) -> Result<()> {
    // Les commandes initiales (graphique + news) partent avant le premier rendu
    send_commands(app, command_tx);

    while app.is_running() {
        // CONCEPT : Non-blocking receive avec try_recv
        loop {
            match result_rx.try_recv() {
                Ok(result) => app.apply(result),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    error!("Worker thread disconnected!");
                    break;
                }
            }
        }

        app.resize(terminal.size()?);
        terminal.draw(|frame| render(frame, app))?;

        match events.next() {
            Ok(event) => app.handle_event(event, Instant::now()),
            Err(e) => warn!(error = ?e, "Failed to read terminal event"),
        }

        app.tick(Instant::now());
        send_commands(app, command_tx);
    }

    Ok(())
}

/// Transmet les commandes en attente au worker
fn send_commands(app: &mut App, command_tx: &mpsc::Sender<AppCommand>) {
    for command in app.take_commands() {
        if let Err(e) = command_tx.send(command) {
            error!(error = ?e, "Failed to send command to worker");
        }
    }
}

// ============================================================================
// Terminal
// ============================================================================

/// Passe le terminal en mode TUI
///
/// CONCEPT : Raw mode + alternate screen
/// - Les caractères ne sont pas affichés automatiquement
/// - Quand on quitte, l'écran précédent est restauré
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    terminal.show_cursor()?;

    Ok(())
}
