use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use terminal::app::{App, AppCommand};
use terminal::config::{Args, Command};
use terminal::replay::import::load_api_documents;
use terminal::replay::reader::COMPRESSED_EXTENSION;
use terminal::replay::writer::ReplayWriter;
use tracing::info;

fn main() -> Result<()> {
    // Load .env file if exists
    dotenv::dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_file)?;

    if let Some(Command::Import { timeline, match_doc, out }) = &args.command {
        return run_import(&args.replay_dir, timeline, match_doc.as_deref(), out.as_deref());
    }

    let projection = args.projection()?;

    if !args.replay_dir.exists() {
        info!("Creating replay directory {:?}", args.replay_dir);
        std::fs::create_dir_all(&args.replay_dir)
            .with_context(|| format!("Failed to create replay directory {:?}", args.replay_dir))?;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = App::new(args.replay_dir.clone(), projection)
        .and_then(|mut app| run_app(&mut terminal, &mut app));

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// The viewer owns stdout, so log lines go to a file.
fn init_logging(log_file: &Path) -> Result<()> {
    let file = File::create(log_file)
        .with_context(|| format!("Failed to create log file {:?}", log_file))?;
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run_import(
    replay_dir: &Path,
    timeline: &Path,
    match_doc: Option<&Path>,
    out: Option<&Path>,
) -> Result<()> {
    let (metadata, snapshots) = load_api_documents(timeline, match_doc)?;
    let target = match out {
        Some(path) => path.to_path_buf(),
        None => replay_dir.join(format!("{}.{}", metadata.match_id, COMPRESSED_EXTENSION)),
    };

    ReplayWriter::save(&target, &metadata, &snapshots)?;
    println!("Wrote replay for {} to {:?}", metadata.match_id, target);
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut last_update = Instant::now();

    loop {
        let now = Instant::now();
        let dt = now.duration_since(last_update);
        last_update = now;

        app.update(dt);

        terminal.draw(|f| app.render(f))?;

        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if let Some(command) = app.handle_input(key) {
                    match command {
                        AppCommand::Quit => return Ok(()),
                        _ => app.handle_command(command)?,
                    }
                }
            }
        }
    }
}
