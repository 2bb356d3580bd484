//! tabcast - interactive broadcast demo
//!
//! Opens the tabs listed in `~/.tabcast/config.toml` with in-memory sessions,
//! starts broadcast mode and sends every key you type to the selected
//! terminal tabs, printing what each one received.
//!
//! # Quick Start
//!
//! ```text
//! tabcast                  # Broadcast to every terminal tab
//! tabcast -s 2,4           # Broadcast to tabs 2 and 4 only
//! tabcast --toggle-theme   # Flip the stored theme and exit
//! ```
//!
//! Press Ctrl+Q to quit.

use std::env;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tabcast::broadcast::KeyDisposition;
use tabcast::config::{config_dir, Config, FileStore, Preferences};
use tabcast::core::session::{escape_bytes, BufferSession};
use tabcast::ui::KeyInput;
use tabcast::wm::{Tab, TabId, TabView, WindowManager};

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command line options
#[derive(Default)]
struct Args {
    /// Tabs to broadcast to (empty = all terminals)
    select: Vec<TabId>,
    toggle_theme: bool,
    copy_paste: Option<bool>,
}

fn print_help() {
    eprintln!("tabcast {} - type once, send to many terminals", VERSION);
    eprintln!();
    eprintln!("Usage: tabcast [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --select <IDS>       Comma-separated tab ids to broadcast to");
    eprintln!("  --toggle-theme           Flip the stored dark/light theme and exit");
    eprintln!("  --copy-paste <on|off>    Set right-click copy/paste and exit");
    eprintln!("  -v, --version            Show version");
    eprintln!("  -h, --help               Show this help");
    eprintln!();
    eprintln!("Configuration: ~/.tabcast/config.toml");
    eprintln!("Log filter:    TABCAST_LOG (e.g. TABCAST_LOG=debug)");
    eprintln!();
    eprintln!("Exit: Ctrl+Q");
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                eprintln!("tabcast {}", VERSION);
                std::process::exit(0);
            }
            "-s" | "--select" => {
                i += 1;
                let list = args.get(i).ok_or("Missing tab id list")?;
                for part in list.split(',').filter(|p| !p.is_empty()) {
                    let id = part
                        .trim()
                        .parse::<TabId>()
                        .map_err(|_| format!("Invalid tab id: {}", part))?;
                    parsed.select.push(id);
                }
            }
            "--toggle-theme" => {
                parsed.toggle_theme = true;
            }
            "--copy-paste" => {
                i += 1;
                parsed.copy_paste = match args.get(i).map(String::as_str) {
                    Some("on") => Some(true),
                    Some("off") => Some(false),
                    _ => return Err("--copy-paste expects on or off".to_string()),
                };
            }
            arg => {
                return Err(format!("Unknown argument: {}. Use -h for help.", arg));
            }
        }
        i += 1;
    }

    Ok(parsed)
}

fn init_logging(default_level: &str) {
    let Some(dir) = config_dir() else {
        return;
    };
    let _ = std::fs::create_dir_all(&dir);

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("tabcast.log"))
        .ok();

    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_env("TABCAST_LOG")
            .unwrap_or_else(|_| EnvFilter::new(default_level));
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

/// Restores cooked mode when dropped
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn main() -> anyhow::Result<()> {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    let (config, load_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_logging(&config.log_level);
    info!("tabcast {} starting...", VERSION);
    if let Some(e) = load_error {
        warn!("{}; using defaults", e);
        eprintln!("Warning: {}; using defaults", e);
    }

    if args.toggle_theme || args.copy_paste.is_some() {
        return update_preferences(&args, &config);
    }

    // Build tabs from config; terminal tabs get an in-memory session
    let mut sessions: Vec<(TabId, Rc<BufferSession>)> = Vec::new();
    let tabs: Vec<Tab> = config
        .tabs
        .iter()
        .zip(1..)
        .map(|(entry, id)| {
            let tab = Tab::new(id, entry.kind, entry.title.clone());
            if entry.kind.is_terminal() {
                let session = BufferSession::shared();
                sessions.push((id, session.clone()));
                tab.with_session(session)
            } else {
                tab
            }
        })
        .collect();

    let current = tabs.first().map(|t| t.id);
    let mut wm = WindowManager::new(tabs, current);
    print_tabs(&wm.tab_views());

    wm.start_broadcast();
    let targets: Vec<TabId> = if args.select.is_empty() {
        wm.broadcast_candidates().iter().map(|t| t.id).collect()
    } else {
        args.select.clone()
    };
    for id in targets {
        if !wm.toggle_broadcast_target(id) {
            warn!("Tab {} cannot be broadcast to", id);
            eprintln!("Skipping tab {}: not a terminal tab", id);
        }
    }
    if !wm.broadcast().accepts_input() {
        eprintln!("No terminal tabs selected; nothing to broadcast to.");
        return Ok(());
    }
    eprintln!(
        "Commands will be sent to {} selected terminal(s). Ctrl+Q to quit.",
        wm.broadcast().selected_count()
    );

    run_loop(&mut wm, &sessions)?;
    wm.stop_broadcast();
    info!("tabcast exiting");
    Ok(())
}

fn run_loop(wm: &mut WindowManager, sessions: &[(TabId, Rc<BufferSession>)]) -> anyhow::Result<()> {
    let _raw = RawModeGuard::enable()?;
    let mut stdout = io::stdout();

    loop {
        if wm.poll_focus(Instant::now()) {
            write!(stdout, "[capture input focused]\r\n")?;
            stdout.flush()?;
        }

        if !event::poll(Duration::from_millis(20))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            break;
        }

        if wm.handle_key(&KeyInput::from(&key)) == KeyDisposition::Ignored {
            continue;
        }
        for (id, session) in sessions {
            let received = session.take();
            if received.is_empty() {
                continue;
            }
            let title = wm.registry().tab(*id).map_or("?", |t| t.title.as_str());
            write!(stdout, "{:>12} <- \"{}\"\r\n", title, escape_bytes(&received))?;
        }
        stdout.flush()?;
    }
    Ok(())
}

fn update_preferences(args: &Args, config: &Config) -> anyhow::Result<()> {
    let mut prefs = Preferences::new(FileStore::open_default()?).with_default_theme(config.theme);
    if args.toggle_theme {
        let theme = prefs.toggle_theme()?;
        println!("Theme: {}", theme);
    }
    if let Some(enabled) = args.copy_paste {
        prefs.set_right_click_copy_paste(enabled)?;
        println!("Right-click copy/paste: {}", if enabled { "on" } else { "off" });
    }
    info!("Preferences saved to {}", prefs.store().path().display());
    Ok(())
}

fn print_tabs(views: &[TabView]) {
    let flag = |on: bool, c: char| if on { c } else { '-' };
    eprintln!("  id  kind          actions  title");
    for view in views {
        eprintln!(
            "{:>4}  {:<12}  {}{}{}{}      {}",
            view.id,
            view.kind.as_str(),
            if view.is_active { '*' } else { ' ' },
            flag(view.actions.activate, 'a'),
            flag(view.actions.split, 's'),
            flag(view.actions.close, 'x'),
            view.title,
        );
    }
    eprintln!();
}
