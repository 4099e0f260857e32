mod app;
mod calendar;
mod components;
mod config;
mod error;
mod event;
mod layout;
mod profile;
mod render;
mod state;
mod theme;
mod tui;

use std::path::PathBuf;
use std::time::Duration;

use app::App;
use chrono::NaiveDate;
use clap::Parser;
use color_eyre::Result;
use event::Action;
use layout::ViewMode;
use ratatui::layout::{Constraint, Layout};

#[derive(Debug, Parser)]
#[command(name = "epaper-calendar", version, about = "Month and week calendar frames for e-paper panels")]
struct Cli {
    /// Config file [default: <config dir>/epaper-calendar/config.toml]
    #[arg(long)]
    config: Option<PathBuf>,

    /// State file holding the draw option [default: <local data dir>/epaper-calendar/state.toml]
    #[arg(long)]
    state: Option<PathBuf>,

    /// Draw this view instead of the stored draw option
    #[arg(long)]
    mode: Option<ViewMode>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Print the draw commands of one frame and exit
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = config::Config::load(cli.config.as_deref())?;
    let state_path = match cli.state {
        Some(path) => path,
        None => config::default_state_path()?,
    };
    let mut app = App::new(config, state::StateFile::new(state_path), cli.mode, cli.today)?;

    if cli.dump {
        let scene = app.compose()?;
        println!("# {} {}x{} {} commands", scene.mode, scene.width, scene.height, scene.commands.len());
        for command in &scene.commands {
            println!("{}", command);
        }
        return Ok(());
    }

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    let mut dirty = true;
    while app.running {
        if dirty {
            if !app.refresh()? {
                app.status_message = Some("Frame unchanged".to_string());
            }
            dirty = false;
        }

        terminal.draw(|frame| {
            let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(frame.area());
            components::FramePreview::draw(frame, layout[0], app.scene.as_ref());
            components::StatusBar::render(frame, layout[1], app);
        })?;

        if let Some(action) = event::next_action(Duration::from_millis(100))? {
            app.status_message = None;
            handle_action(app, action);
            dirty = app.running;
        }
    }

    Ok(())
}

fn handle_action(app: &mut App, action: Action) {
    match action {
        Action::Quit => app.running = false,
        Action::SetMode(mode) => app.set_mode(mode),
        Action::Reload => {
            app.reload_events();
            app.status_message = Some(format!("Reloaded {} events", app.event_count()));
        }
        Action::Today => app.go_to_today(),
        Action::NextPeriod => app.next_period(),
        Action::PrevPeriod => app.prev_period(),
    }
}
