use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use shortcut_helper::app::{self, AppEvent, ShortcutHelper};
use shortcut_helper::config;
use shortcut_helper::error::ResultExt;
use shortcut_helper::importer::GsettingsStore;
use shortcut_helper::logging;
use shortcut_helper::popup::{JsonlRenderer, PopupRenderer};
use shortcut_helper::stdin_commands::{self, ExternalCommand};
use shortcut_helper::watcher::ConfigWatcher;

/// Shows which shortcuts the currently held modifiers lead to.
///
/// Reads key events as JSONL on stdin and writes popup updates as JSONL on stdout.
#[derive(Parser, Debug)]
#[command(name = "shortcut-helper", version, about)]
struct Cli {
    /// Config file (default: ~/.config/shortcut-helper/config.json)
    #[arg(long, value_name = "PATH")]
    config: Option<String>,

    /// Import system shortcuts into the config file, then exit
    #[arg(long)]
    import_only: bool,

    /// Don't read the desktop's keybindings at runtime
    #[arg(long)]
    no_import_system: bool,

    /// gsettings executable used to read the desktop's keybindings
    #[arg(long, value_name = "PROGRAM", default_value = "gsettings")]
    gsettings: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init();

    let config_path = config::config_path(cli.config.as_deref());
    let store = GsettingsStore::new(&cli.gsettings);

    if cli.import_only {
        let added = app::import_only(&config_path, &store)
            .with_context(|| format!("importing shortcuts into {}", config_path.display()))?;
        println!("Imported {} shortcuts into {}", added, config_path.display());
        return Ok(());
    }

    let helper = ShortcutHelper::load(&config_path, store, !cli.no_import_system)
        .with_context(|| format!("loading {}", config_path.display()))?;

    // Bounded channel: key events and reloads share one ordered queue
    let (tx, rx) = async_channel::bounded::<AppEvent>(100);
    stdin_commands::start_stdin_listener(tx.clone(), AppEvent::Command);

    let (mut config_watcher, reload_rx) = ConfigWatcher::new(&config_path);
    if config_watcher.start().warn_on_err().is_some() {
        let tx = tx.clone();
        std::thread::spawn(move || {
            while reload_rx.recv().is_ok() {
                if tx.send_blocking(AppEvent::ConfigChanged).is_err() {
                    break;
                }
            }
        });
    }
    drop(tx);

    let mut renderer = JsonlRenderer::stdout();
    info!(path = %config_path.display(), "Shortcut helper ready");

    while let Ok(event) = rx.recv_blocking() {
        match event {
            AppEvent::Command(ExternalCommand::ModifiersChanged { pressed, request_id }) => {
                let pressed = stdin_commands::parse_pressed(&pressed);
                let update = helper.on_modifiers(pressed, request_id.as_deref());
                if renderer.apply(&update).log_err().is_none() {
                    error!("Popup renderer is gone, exiting");
                    break;
                }
            }
            AppEvent::Command(ExternalCommand::Reload { request_id }) => {
                info!(request_id = request_id.as_deref(), "Reload requested");
                let _ = helper.reload();
            }
            AppEvent::ConfigChanged => {
                let _ = helper.reload();
            }
            AppEvent::Command(ExternalCommand::Quit) => {
                info!("Quit requested");
                break;
            }
        }
    }

    renderer.hide().warn_on_err();
    info!("Shortcut helper exiting");
    Ok(())
}
