use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use rfmdash::logging::{self, LogTarget};
use rfmdash::{
    App, AppConfig, AppEvent, Args, CacheManager, ConfigManager, Dashboard, DashboardSettings,
    FilterField, FilterSelections, Selection, Theme, APP_NAME,
};
use std::sync::mpsc::channel;
use std::time::Duration;

fn render(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    terminal.draw(|frame| frame.render_widget(app, frame.area()))?;
    Ok(())
}

fn run(mut terminal: DefaultTerminal, args: &Args, config: &AppConfig, theme: Theme) -> Result<()> {
    let (tx, rx) = channel::<AppEvent>();
    let settings = DashboardSettings::from_args_and_config(args, config);
    let mut app = App::new(tx.clone(), Dashboard::new(settings), theme)
        .with_save_charts(args.save_charts || config.output.save_charts)
        .with_initial_selections(initial_selections(args));
    if args.debug || config.debug.enabled {
        app.enable_debug();
    }
    let poll_interval = Duration::from_millis(config.performance.event_poll_interval_ms);
    render(&mut terminal, &mut app)?;
    app.send_event(AppEvent::Open)?;

    loop {
        if crossterm::event::poll(poll_interval)? {
            match crossterm::event::read()? {
                crossterm::event::Event::Key(key) => tx.send(AppEvent::Key(key))?,
                crossterm::event::Event::Resize(cols, rows) => {
                    tx.send(AppEvent::Resize(cols, rows))?
                }
                _ => {}
            }
        }

        let updated = match rx.recv_timeout(Duration::from_millis(0)) {
            Ok(event) => {
                match event {
                    AppEvent::Exit => break,
                    AppEvent::Crash(msg) => {
                        return Err(color_eyre::eyre::eyre!(msg));
                    }
                    event => {
                        if let Some(event) = app.event(&event) {
                            tx.send(event)?;
                        }
                    }
                }
                true
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => false,
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        };

        if updated {
            render(&mut terminal, &mut app)?;
        }
    }
    Ok(())
}

/// Initial sidebar choices from --country / --value-tier / --ship-bucket
fn initial_selections(args: &Args) -> FilterSelections {
    [
        (FilterField::MainCountry, &args.country),
        (FilterField::ValueTier, &args.value_tier),
        (FilterField::ShipBucket, &args.ship_bucket),
    ]
    .into_iter()
    .fold(FilterSelections::new(), |acc, (field, value)| match value {
        Some(v) => acc.with(field, Selection::parse(v)),
        None => acc,
    })
}

/// One render cycle printed to stdout; exit status 1 when the cycle fails.
fn run_report(args: &Args, settings: DashboardSettings, save: bool) -> Result<()> {
    let mut dashboard = Dashboard::new(settings);
    match dashboard.render_cycle(&initial_selections(args), save) {
        Ok(report) => {
            rfmdash::dashboard::log_report(&report);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn handle_early_exit_flags(args: &Args) -> Result<Option<()>> {
    if args.clear_cache {
        match CacheManager::new(APP_NAME) {
            Ok(cache) => {
                if let Err(e) = cache.clear_all() {
                    eprintln!("Error clearing cache: {}", e);
                    std::process::exit(1);
                }
                println!("Cache cleared successfully");
                return Ok(Some(()));
            }
            Err(_e) => {
                println!("No cache to clear");
                return Ok(Some(()));
            }
        }
    }

    if args.generate_config {
        match ConfigManager::new(APP_NAME) {
            Ok(config_manager) => match config_manager.write_default_config(args.force) {
                Ok(path) => {
                    println!("Configuration written to {}", path.display());
                    return Ok(Some(()));
                }
                Err(e) => {
                    eprintln!("Error writing configuration: {}", e);
                    std::process::exit(1);
                }
            },
            Err(e) => {
                eprintln!("Error initializing config manager: {}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(None)
}

/// Log to the cache directory; the TUI owns stdout and stderr.
fn init_tui_logging(debug: bool) {
    let result = CacheManager::new(APP_NAME).and_then(|cache| {
        cache.ensure_cache_dir()?;
        logging::init(LogTarget::File(cache.log_file()), debug)
    });
    if let Err(e) = result {
        eprintln!("Warning: logging disabled: {}", e);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(()) = handle_early_exit_flags(&args)? {
        return Ok(());
    }

    color_eyre::install()?;
    let config = AppConfig::load(APP_NAME)?;
    let debug = args.debug || config.debug.enabled;

    if args.report {
        if let Err(e) = logging::init(LogTarget::Stderr, debug) {
            eprintln!("Warning: logging disabled: {}", e);
        }
        let settings = DashboardSettings::from_args_and_config(&args, &config);
        let save = args.save_charts || config.output.save_charts;
        return run_report(&args, settings, save);
    }

    init_tui_logging(debug);
    let theme = Theme::from_config(&config.theme)?;
    let terminal = ratatui::init();
    let result = run(terminal, &args, &config, theme);
    ratatui::restore();
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_selections_from_args() {
        let args = Args::parse_from([
            "rfmdash",
            "--country",
            "France",
            "--value-tier",
            "all",
        ]);
        let selections = initial_selections(&args);
        assert_eq!(selections.country, Selection::value("France"));
        assert!(selections.value_tier.is_all());
        assert!(selections.ship_bucket.is_all());
    }
}
