use std::collections::BTreeSet;

use chrono::{Duration, Local, Months, NaiveDate};

use crate::calendar::{Loaded, Store};
use crate::config::Config;
use crate::error::ConfigurationError;
use crate::layout::ViewMode;
use crate::profile::DisplayProfile;
use crate::render::{FrameComposer, ProFont, Scene};
use crate::state::{self, StateFile};
use crate::theme::Theme;

pub struct App {
    pub running: bool,
    pub view_mode: ViewMode,
    /// Date whose month or week is shown.
    pub reference: NaiveDate,
    pub today: NaiveDate,
    pub profile: DisplayProfile,
    pub status_message: Option<String>,
    /// Last composed frame.
    pub scene: Option<Scene>,
    pinned_today: Option<NaiveDate>,
    theme: Theme,
    config: Config,
    store: Store,
    loaded: Loaded,
    state: StateFile,
}

impl App {
    /// `mode` overrides the stored draw option for this run only.
    pub fn new(
        config: Config,
        mut state: StateFile,
        mode: Option<ViewMode>,
        pinned_today: Option<NaiveDate>,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let profile = config.display_profile()?;
        let theme = config.theme(&profile);
        let store = Store::new(config.feeds.clone(), config.base_dir.clone());
        let view_mode = mode.unwrap_or_else(|| state::resolve_draw_option(&mut state));
        let today = pinned_today.unwrap_or_else(|| Local::now().date_naive());

        let mut app = Self {
            running: true,
            view_mode,
            reference: today,
            today,
            profile,
            status_message: None,
            scene: None,
            pinned_today,
            theme,
            config,
            store,
            loaded: Loaded::default(),
            state,
        };
        app.reload_events();
        Ok(app)
    }

    pub fn reload_events(&mut self) {
        self.loaded = self.store.load(&self.profile);
        log::info!(
            "loaded {} events from {} feeds",
            self.loaded.events.len(),
            self.feed_count()
        );
    }

    pub fn theme_name(&self) -> &str {
        &self.theme.name
    }

    pub fn feed_count(&self) -> usize {
        self.store.feeds().iter().filter(|f| f.enabled).count()
    }

    pub fn event_count(&self) -> usize {
        self.loaded.events.len()
    }

    /// Configured holidays plus the days of holiday feeds.
    pub fn holidays(&self) -> BTreeSet<NaiveDate> {
        let mut holidays = self.config.holidays();
        holidays.extend(self.loaded.holidays.iter().copied());
        holidays
    }

    pub fn compose(&self) -> Result<Scene, ConfigurationError> {
        let composer = FrameComposer {
            theme: &self.theme,
            measurer: &ProFont,
            max_events: self.config.max_events_per_cell,
            width: self.profile.width,
            height: self.profile.height,
        };
        composer.compose(
            self.view_mode,
            self.config.canvas(self.view_mode, &self.profile),
            self.reference,
            self.today,
            &self.loaded.events,
            &self.holidays(),
        )
    }

    /// Compose a new frame. Returns false when it equals the previous one,
    /// in which case the panel would skip the refresh.
    pub fn refresh(&mut self) -> Result<bool, ConfigurationError> {
        let scene = self.compose()?;
        let changed = self.scene.as_ref() != Some(&scene);
        if !changed {
            log::info!("frame unchanged, skipping panel refresh");
        }
        self.scene = Some(scene);
        Ok(changed)
    }

    /// Switch mode and persist it as the draw option.
    pub fn set_mode(&mut self, mode: ViewMode) {
        if self.view_mode == mode {
            return;
        }
        self.view_mode = mode;
        if let Err(err) = state::store_draw_option(&mut self.state, mode) {
            log::warn!("cannot save draw option to {}: {}", self.state.path().display(), err);
            self.status_message = Some(format!("Could not save draw option: {}", err));
        }
    }

    pub fn next_period(&mut self) {
        self.reference = match self.view_mode {
            ViewMode::Month => self
                .reference
                .checked_add_months(Months::new(1))
                .unwrap_or(self.reference),
            ViewMode::Week => self.reference + Duration::weeks(1),
        };
    }

    pub fn prev_period(&mut self) {
        self.reference = match self.view_mode {
            ViewMode::Month => self
                .reference
                .checked_sub_months(Months::new(1))
                .unwrap_or(self.reference),
            ViewMode::Week => self.reference - Duration::weeks(1),
        };
    }

    pub fn go_to_today(&mut self) {
        self.today = self.pinned_today.unwrap_or_else(|| Local::now().date_naive());
        self.reference = self.today;
    }
}
