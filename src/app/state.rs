use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone};
use crossterm::event::KeyCode;
use rusqlite::Connection;

use crate::error::RecordError;
use crate::interactor::{RecordInteractor, RecordTypeInteractor, RunningRecordInteractor};
use crate::remove::RemoveRecordState;
use crate::running::{self, ChangeRunningRecord};
use crate::settings::{FirstDayOfWeek, RecordTypeSort, Settings};
use crate::statistics::{self, ChartGrouping, ChartLength, StatisticsDetail, StatisticsTarget};
use crate::types::{Record, RecordType, RecordTypeId, RunningRecord};
use crate::{color, db, icon};

use super::{AppEvent, AppView, SettingsField, TABS};

/// The top-level application state.
pub struct App {
    pub running: bool,
    pub db: Connection,
    pub view: AppView,
    view_history: Vec<AppView>,
    pub settings: Settings,
    pub record_types: Vec<RecordType>,
    pub running_records: Vec<RunningRecord>,
    /// Newest first.
    pub records: Vec<Record>,
    pub status: Option<String>,
    pub selected_type_index: usize,
    pub selected_record_index: usize,
    pub selected_statistics_index: usize,
    pub selected_setting_index: usize,
    pub remove: RemoveRecordState,
    pub detail: Option<DetailScreen>,
    pub edit_popup: Option<EditRunningPopup>,
    pub new_type_popup: Option<NewTypePopup>,
    pub settings_dropdown: Option<SettingsDropdown>,
}

pub struct DetailScreen {
    pub target: StatisticsTarget,
    pub grouping: ChartGrouping,
    pub length: ChartLength,
    pub data: StatisticsDetail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditField {
    Type,
    Date,
    Time,
    Comment,
}

pub struct EditRunningPopup {
    pub edit: ChangeRunningRecord,
    pub type_index: usize,
    pub field: EditField,
    pub date_input: String,
    pub time_input: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NewTypeField {
    Name,
    Color,
    Icon,
}

#[derive(Clone, Debug)]
pub struct NewTypePopup {
    pub name: String,
    pub color: String,
    pub icon_index: usize,
    pub field: NewTypeField,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettingsDropdown {
    pub field: SettingsField,
    pub index: usize,
}

impl App {
    pub fn new(db: Connection) -> Self {
        let settings = match Settings::load(&db) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(%err, "falling back to default settings");
                Settings::default()
            }
        };
        let mut app = Self {
            running: true,
            db,
            view: AppView::Running,
            view_history: Vec::new(),
            settings,
            record_types: Vec::new(),
            running_records: Vec::new(),
            records: Vec::new(),
            status: None,
            selected_type_index: 0,
            selected_record_index: 0,
            selected_statistics_index: 0,
            selected_setting_index: 0,
            remove: RemoveRecordState::default(),
            detail: None,
            edit_popup: None,
            new_type_popup: None,
            settings_dropdown: None,
        };
        app.reload();
        app
    }

    /// Central update function - process an event and mutate state.
    pub fn update(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => {}
            AppEvent::KeyPress(key) => self.handle_key(key),
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.edit_popup.is_some() {
            self.handle_edit_key(key);
            return;
        }
        if self.new_type_popup.is_some() {
            self.handle_new_type_key(key);
            return;
        }
        if self.settings_dropdown.is_some() {
            self.handle_dropdown_key(key);
            return;
        }
        // Any key other than undo dismisses the pending undo.
        if self.remove.message.is_some() && key != KeyCode::Char('u') {
            self.remove.on_message_shown();
        }

        match key {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('h') => self.navigate_to(AppView::Running),
            KeyCode::Char('l') => self.navigate_to(AppView::Records),
            KeyCode::Char('s') => self.navigate_to(AppView::Statistics),
            KeyCode::Char('o') => self.navigate_to(AppView::Settings),
            KeyCode::Char('?') => {
                if self.view == AppView::Help {
                    self.go_back();
                } else {
                    self.navigate_to(AppView::Help);
                }
            }
            KeyCode::Tab => self.cycle_tab(1),
            KeyCode::BackTab => self.cycle_tab(TABS.len() - 1),
            KeyCode::Esc => self.go_back(),
            KeyCode::Char('r') => {
                self.clear_status();
                self.reload();
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char(' ') if self.view == AppView::Running => self.toggle_selected_type(),
            KeyCode::Char('e') if self.view == AppView::Running => self.open_edit_popup(),
            KeyCode::Char('n') if self.view == AppView::Running => self.open_new_type_popup(),
            KeyCode::Char('d') if self.view == AppView::Records => self.delete_selected_record(),
            KeyCode::Char('u') => self.undo_remove(),
            KeyCode::Char('g') if self.view == AppView::StatisticsDetail => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.grouping = detail.grouping.next();
                }
                self.refresh_detail();
            }
            KeyCode::Char('c') if self.view == AppView::StatisticsDetail => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.length = detail.length.next();
                }
                self.refresh_detail();
            }
            _ => {}
        }
    }

    fn navigate_to(&mut self, view: AppView) {
        if self.view != view {
            self.view_history.push(self.view.clone());
            self.view = view;
            self.clear_status();
        }
    }

    fn go_back(&mut self) {
        if let Some(previous) = self.view_history.pop() {
            self.view = previous;
            self.clear_status();
        }
    }

    fn cycle_tab(&mut self, step: usize) {
        let current = TABS
            .iter()
            .position(|(_, view)| {
                *view == self.view
                    || (self.view == AppView::StatisticsDetail && *view == AppView::Statistics)
            })
            .unwrap_or(0);
        let next = TABS[(current + step) % TABS.len()].1.clone();
        self.navigate_to(next);
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    fn report(&mut self, result: Result<()>) {
        if let Err(err) = result {
            tracing::warn!(%err, "action failed");
            self.status = Some(err.to_string());
        }
    }

    /// Re-reads everything shown on screen from the store.
    pub fn reload(&mut self) {
        let result = self.try_reload();
        self.report(result);
    }

    fn try_reload(&mut self) -> Result<()> {
        let mut record_types = RecordTypeInteractor::get_all(&self.db)?;
        self.settings.sort_record_types(&mut record_types);
        self.record_types = record_types;
        self.running_records = RunningRecordInteractor::get_all(&self.db)?;
        let mut records = RecordInteractor::get_all(&self.db)?;
        records.reverse();
        self.records = records;

        self.selected_type_index = clamp_index(self.selected_type_index, self.record_types.len());
        self.selected_record_index = clamp_index(self.selected_record_index, self.records.len());
        self.selected_statistics_index =
            clamp_index(self.selected_statistics_index, self.statistics_targets().len());
        if self.detail.is_some() {
            self.try_refresh_detail()?;
        }
        Ok(())
    }

    fn move_selection(&mut self, delta: isize) {
        let statistics_len = self.statistics_targets().len();
        let target = match self.view {
            AppView::Running => Some((&mut self.selected_type_index, self.record_types.len())),
            AppView::Records => Some((&mut self.selected_record_index, self.records.len())),
            AppView::Statistics => Some((&mut self.selected_statistics_index, statistics_len)),
            AppView::Settings => Some((&mut self.selected_setting_index, SettingsField::ALL.len())),
            _ => None,
        };
        if let Some((selected, len)) = target {
            *selected = step_index(*selected, len, delta);
        }
    }

    fn open_selected(&mut self) {
        match self.view {
            AppView::Statistics => {
                if let Some((_, target)) = self.statistics_targets().get(self.selected_statistics_index)
                {
                    self.open_detail(*target);
                }
            }
            AppView::Settings => {
                let field = SettingsField::ALL[self.selected_setting_index];
                self.settings_dropdown = Some(SettingsDropdown {
                    field,
                    index: self.current_setting_index(field),
                });
            }
            _ => {}
        }
    }

    pub fn running_record_for(&self, type_id: Option<RecordTypeId>) -> Option<&RunningRecord> {
        self.running_records
            .iter()
            .find(|running| Some(running.type_id) == type_id)
    }

    pub fn record_type_for(&self, type_id: RecordTypeId) -> Option<&RecordType> {
        self.record_types
            .iter()
            .find(|record_type| record_type.id == Some(type_id))
    }

    fn selected_type(&self) -> Option<&RecordType> {
        self.record_types.get(self.selected_type_index)
    }

    fn toggle_selected_type(&mut self) {
        let Some(RecordType {
            id: Some(type_id), ..
        }) = self.selected_type().cloned()
        else {
            return;
        };
        let now = Local::now();
        let result = if self.running_record_for(Some(type_id)).is_some() {
            running::stop(&self.db, type_id, now).map(|_| ())
        } else {
            running::start(&self.db, type_id, now).map(|_| ())
        };
        self.report(result);
        self.reload();
    }

    // Running record editing

    fn open_edit_popup(&mut self) {
        let Some(record_type) = self.selected_type().cloned() else {
            return;
        };
        let Some(type_id) = record_type.id else {
            return;
        };
        if self.running_record_for(Some(type_id)).is_none() {
            self.status = Some(format!("'{}' is not running", record_type.name));
            return;
        }
        match ChangeRunningRecord::open(&self.db, type_id) {
            Ok(edit) => {
                let started = edit.original().time_started;
                self.edit_popup = Some(EditRunningPopup {
                    edit,
                    type_index: self.selected_type_index,
                    field: EditField::Type,
                    date_input: started.format("%Y-%m-%d").to_string(),
                    time_input: started.format("%H:%M").to_string(),
                });
            }
            Err(err) => self.report(Err(err)),
        }
    }

    fn handle_edit_key(&mut self, key: KeyCode) {
        let Some(popup) = self.edit_popup.as_mut() else {
            return;
        };
        match key {
            KeyCode::Esc => {
                self.edit_popup = None;
                self.clear_status();
            }
            KeyCode::Enter => self.apply_edit_popup(),
            KeyCode::Tab => {
                popup.field = match popup.field {
                    EditField::Type => EditField::Date,
                    EditField::Date => EditField::Time,
                    EditField::Time => EditField::Comment,
                    EditField::Comment => EditField::Type,
                };
            }
            KeyCode::Up | KeyCode::Down if popup.field == EditField::Type => {
                let delta = if key == KeyCode::Up { -1 } else { 1 };
                popup.type_index = step_index(popup.type_index, self.record_types.len(), delta);
                if let Some(type_id) = self.record_types.get(popup.type_index).and_then(|t| t.id) {
                    if let Err(err) = popup.edit.change_type(&self.db, type_id) {
                        self.status = Some(err.to_string());
                    }
                }
            }
            KeyCode::Delete if popup.field == EditField::Type => {
                let result = popup.edit.delete(&self.db);
                self.edit_popup = None;
                self.report(result);
                self.reload();
            }
            KeyCode::Backspace => {
                match popup.field {
                    EditField::Date => {
                        popup.date_input.pop();
                    }
                    EditField::Time => {
                        popup.time_input.pop();
                    }
                    EditField::Comment => {
                        let mut comment = popup.edit.comment().to_string();
                        comment.pop();
                        popup.edit.change_comment(comment);
                    }
                    EditField::Type => {}
                }
                sync_time_preview(popup);
            }
            KeyCode::Char(ch) if popup.field == EditField::Comment && !ch.is_control() => {
                let comment = format!("{}{ch}", popup.edit.comment());
                popup.edit.change_comment(comment);
            }
            KeyCode::Char(ch) if ch.is_ascii_digit() || ch == '-' || ch == ':' => {
                match popup.field {
                    EditField::Date => popup.date_input.push(ch),
                    EditField::Time => popup.time_input.push(ch),
                    EditField::Type | EditField::Comment => {}
                }
                sync_time_preview(popup);
            }
            _ => {}
        }
    }

    fn apply_edit_popup(&mut self) {
        let Some(popup) = self.edit_popup.as_mut() else {
            return;
        };
        let Some(time_started) = parse_start(&popup.date_input, &popup.time_input) else {
            self.status = Some("Start must look like YYYY-MM-DD HH:MM".to_string());
            return;
        };
        popup.edit.change_time_started(time_started);
        match popup.edit.save(&self.db, Local::now()) {
            Ok(_) => {
                let type_id = popup.edit.type_id();
                self.edit_popup = None;
                self.clear_status();
                self.reload();
                // Keep the cursor on the type the record moved to.
                if let Some(index) = self
                    .record_types
                    .iter()
                    .position(|record_type| record_type.id == type_id)
                {
                    self.selected_type_index = index;
                }
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    // Record types

    fn open_new_type_popup(&mut self) {
        self.new_type_popup = Some(NewTypePopup {
            name: String::new(),
            color: color::random_color(),
            icon_index: 0,
            field: NewTypeField::Name,
        });
    }

    fn handle_new_type_key(&mut self, key: KeyCode) {
        let Some(popup) = self.new_type_popup.as_mut() else {
            return;
        };
        match key {
            KeyCode::Esc => {
                self.new_type_popup = None;
                self.clear_status();
            }
            KeyCode::Enter => self.apply_new_type_popup(),
            KeyCode::Tab => {
                popup.field = match popup.field {
                    NewTypeField::Name => NewTypeField::Color,
                    NewTypeField::Color => NewTypeField::Icon,
                    NewTypeField::Icon => NewTypeField::Name,
                };
            }
            KeyCode::Up | KeyCode::Down if popup.field == NewTypeField::Icon => {
                let delta = if key == KeyCode::Up { -1 } else { 1 };
                popup.icon_index = step_index(popup.icon_index, icon::ICONS.len(), delta);
            }
            KeyCode::Backspace => match popup.field {
                NewTypeField::Name => {
                    popup.name.pop();
                }
                NewTypeField::Color => {
                    popup.color.pop();
                }
                NewTypeField::Icon => {}
            },
            KeyCode::Char(ch) if !ch.is_control() => match popup.field {
                NewTypeField::Name => popup.name.push(ch),
                NewTypeField::Color => popup.color.push(ch),
                NewTypeField::Icon => {}
            },
            _ => {}
        }
    }

    fn apply_new_type_popup(&mut self) {
        let Some(popup) = self.new_type_popup.clone() else {
            return;
        };
        let name = popup.name.trim().to_string();
        if name.is_empty() {
            self.status = Some("Name can't be empty".to_string());
            return;
        }
        let Some(color) = color::normalize_hex(&popup.color) else {
            self.status = Some(RecordError::InvalidColor(popup.color).to_string());
            return;
        };
        let record_type = RecordType {
            id: None,
            name,
            icon: icon::ICONS[popup.icon_index.min(icon::ICONS.len() - 1)].0.to_string(),
            color,
        };
        match create_unique_type(&self.db, &record_type) {
            Ok(()) => {
                self.new_type_popup = None;
                self.clear_status();
                self.reload();
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    // Records

    fn delete_selected_record(&mut self) {
        let Some(record) = self.records.get(self.selected_record_index) else {
            return;
        };
        self.remove.prepare(record.id);
        let result = self.remove.on_delete_click(&self.db);
        self.report(result);
        self.apply_remove_update();
    }

    fn undo_remove(&mut self) {
        if self.remove.message.is_none() {
            return;
        }
        let result = self.remove.on_undo(&self.db);
        self.report(result);
        self.apply_remove_update();
    }

    fn apply_remove_update(&mut self) {
        if self.remove.need_update {
            self.reload();
            self.remove.on_updated();
        }
    }

    // Statistics

    /// Rows of the statistics list: every record type, then untracked time
    /// when enabled.
    pub fn statistics_targets(&self) -> Vec<(String, StatisticsTarget)> {
        let mut targets = self
            .record_types
            .iter()
            .filter_map(|record_type| {
                record_type
                    .id
                    .map(|id| (record_type.name.clone(), StatisticsTarget::RecordType(id)))
            })
            .collect::<Vec<_>>();
        if self.settings.show_untracked {
            targets.push(("Untracked".to_string(), StatisticsTarget::Untracked));
        }
        targets
    }

    fn open_detail(&mut self, target: StatisticsTarget) {
        let result = statistics::load_detail(
            &self.db,
            target,
            ChartGrouping::Daily,
            ChartLength::Ten,
            &self.settings,
            Local::now(),
        );
        match result {
            Ok(data) => {
                self.detail = Some(DetailScreen {
                    target,
                    grouping: ChartGrouping::Daily,
                    length: ChartLength::Ten,
                    data,
                });
                self.navigate_to(AppView::StatisticsDetail);
            }
            Err(err) => self.report(Err(err)),
        }
    }

    fn refresh_detail(&mut self) {
        let result = self.try_refresh_detail();
        self.report(result);
    }

    fn try_refresh_detail(&mut self) -> Result<()> {
        if let Some(detail) = self.detail.as_mut() {
            detail.data = statistics::load_detail(
                &self.db,
                detail.target,
                detail.grouping,
                detail.length,
                &self.settings,
                Local::now(),
            )?;
        }
        Ok(())
    }

    // Settings

    pub fn setting_options(field: SettingsField) -> Vec<&'static str> {
        match field {
            SettingsField::Sort => RecordTypeSort::ALL.iter().map(|sort| sort.label()).collect(),
            SettingsField::ShowUntracked => vec!["Hide", "Show"],
            SettingsField::FirstDayOfWeek => {
                FirstDayOfWeek::ALL.iter().map(|day| day.label()).collect()
            }
        }
    }

    pub fn current_setting_index(&self, field: SettingsField) -> usize {
        match field {
            SettingsField::Sort => RecordTypeSort::ALL
                .iter()
                .position(|sort| *sort == self.settings.record_type_sort)
                .unwrap_or(0),
            SettingsField::ShowUntracked => usize::from(self.settings.show_untracked),
            SettingsField::FirstDayOfWeek => FirstDayOfWeek::ALL
                .iter()
                .position(|day| *day == self.settings.first_day_of_week)
                .unwrap_or(0),
        }
    }

    fn handle_dropdown_key(&mut self, key: KeyCode) {
        let Some(dropdown) = self.settings_dropdown.as_mut() else {
            return;
        };
        let len = Self::setting_options(dropdown.field).len();
        match key {
            KeyCode::Esc => self.settings_dropdown = None,
            KeyCode::Up => dropdown.index = step_index(dropdown.index, len, -1),
            KeyCode::Down => dropdown.index = step_index(dropdown.index, len, 1),
            KeyCode::Enter => {
                let SettingsDropdown { field, index } = *dropdown;
                self.settings_dropdown = None;
                self.apply_setting(field, index);
            }
            _ => {}
        }
    }

    fn apply_setting(&mut self, field: SettingsField, index: usize) {
        let mut settings = self.settings;
        match field {
            SettingsField::Sort => {
                settings.record_type_sort = RecordTypeSort::ALL[index.min(RecordTypeSort::ALL.len() - 1)]
            }
            SettingsField::ShowUntracked => settings.show_untracked = index == 1,
            SettingsField::FirstDayOfWeek => {
                settings.first_day_of_week =
                    FirstDayOfWeek::ALL[index.min(FirstDayOfWeek::ALL.len() - 1)]
            }
        }
        if settings == self.settings {
            return;
        }
        match settings.save(&self.db) {
            Ok(()) => {
                self.settings = settings;
                self.reload();
            }
            Err(err) => self.report(Err(err)),
        }
    }
}

fn create_unique_type(conn: &Connection, record_type: &RecordType) -> Result<()> {
    if db::check_record_type_exists(&record_type.name, conn)? {
        return Err(RecordError::DuplicateTypeName(record_type.name.clone()).into());
    }
    let id = RecordTypeInteractor::add(conn, record_type)?;
    tracing::info!(id, name = %record_type.name, "record type created");
    Ok(())
}

fn sync_time_preview(popup: &mut EditRunningPopup) {
    if let Some(time_started) = parse_start(&popup.date_input, &popup.time_input) {
        popup.edit.change_time_started(time_started);
    }
}

fn parse_start(date: &str, time: &str) -> Option<DateTime<Local>> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time, "%H:%M").ok()?;
    Local.from_local_datetime(&date.and_time(time)).earliest()
}

fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 { 0 } else { index.min(len - 1) }
}

fn step_index(index: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    (index as isize + delta).rem_euclid(len as isize) as usize
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::db::{test_connection, test_record_type};

    fn app_with_types(names: &[&str]) -> App {
        let conn = test_connection();
        for name in names {
            test_record_type(name, &conn);
        }
        App::new(conn)
    }

    fn press(app: &mut App, keys: &[KeyCode]) {
        for key in keys {
            app.update(AppEvent::KeyPress(*key));
        }
    }

    #[test]
    fn space_starts_and_stops_selected_type() {
        let mut app = app_with_types(&["Work"]);
        press(&mut app, &[KeyCode::Char(' ')]);
        assert_eq!(app.running_records.len(), 1);

        press(&mut app, &[KeyCode::Char(' ')]);
        assert!(app.running_records.is_empty());
        assert_eq!(app.records.len(), 1);
    }

    #[test]
    fn delete_and_undo_from_records_view() {
        let mut app = app_with_types(&["Work"]);
        press(&mut app, &[KeyCode::Char(' '), KeyCode::Char(' ')]);
        let original = app.records[0].clone();

        press(&mut app, &[KeyCode::Char('l'), KeyCode::Char('d')]);
        assert!(app.records.is_empty());
        assert!(app.remove.message.is_some());
        assert!(!app.remove.need_update);

        press(&mut app, &[KeyCode::Char('u')]);
        assert_eq!(app.records, vec![original]);
        assert!(app.remove.message.is_none());
    }

    #[test]
    fn other_keys_dismiss_the_undo() {
        let mut app = app_with_types(&["Work"]);
        press(&mut app, &[KeyCode::Char(' '), KeyCode::Char(' ')]);
        press(&mut app, &[KeyCode::Char('l'), KeyCode::Char('d'), KeyCode::Down]);
        assert!(app.remove.message.is_none());
        press(&mut app, &[KeyCode::Char('u')]);
        assert!(app.records.is_empty());
    }

    #[test]
    fn edit_running_record_changes_type_and_start() {
        let mut app = app_with_types(&["Alpha", "Beta"]);
        press(&mut app, &[KeyCode::Char(' '), KeyCode::Char('e')]);
        assert!(app.edit_popup.is_some());

        let start = (Local::now() - Duration::days(1))
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        press(&mut app, &[KeyCode::Down, KeyCode::Tab]);
        {
            let popup = app.edit_popup.as_mut().unwrap();
            assert_eq!(popup.edit.preview().name, "Beta");
            popup.date_input.clear();
            popup.time_input.clear();
        }
        let date = start.format("%Y-%m-%d").to_string();
        for ch in date.chars() {
            press(&mut app, &[KeyCode::Char(ch)]);
        }
        press(&mut app, &[KeyCode::Tab]);
        for ch in "00:00".chars() {
            press(&mut app, &[KeyCode::Char(ch)]);
        }
        let expected = Local.from_local_datetime(&start).earliest().unwrap();
        assert_eq!(
            app.edit_popup.as_ref().unwrap().edit.preview().time_started,
            expected
        );

        press(&mut app, &[KeyCode::Enter]);
        assert!(app.edit_popup.is_none());
        assert_eq!(app.running_records.len(), 1);
        let beta = app.record_types.iter().find(|t| t.name == "Beta").unwrap();
        assert_eq!(app.running_records[0].type_id, beta.id.unwrap());
        assert_eq!(app.running_records[0].time_started, expected);
        assert_eq!(app.selected_type_index, 1);
    }

    #[test]
    fn edit_running_record_comment() {
        let mut app = app_with_types(&["Alpha"]);
        press(
            &mut app,
            &[KeyCode::Char(' '), KeyCode::Char('e'), KeyCode::Tab, KeyCode::Tab, KeyCode::Tab],
        );
        for ch in "notes!".chars() {
            press(&mut app, &[KeyCode::Char(ch)]);
        }
        press(&mut app, &[KeyCode::Backspace, KeyCode::Enter]);
        assert!(app.edit_popup.is_none());
        assert_eq!(app.running_records[0].comment, "notes");
    }

    #[test]
    fn edit_requires_running_record() {
        let mut app = app_with_types(&["Alpha"]);
        press(&mut app, &[KeyCode::Char('e')]);
        assert!(app.edit_popup.is_none());
        assert_eq!(app.status.as_deref(), Some("'Alpha' is not running"));
    }

    #[test]
    fn new_type_popup_creates_type() {
        let mut app = app_with_types(&[]);
        press(&mut app, &[KeyCode::Char('n')]);
        for ch in "Gym".chars() {
            press(&mut app, &[KeyCode::Char(ch)]);
        }
        press(&mut app, &[KeyCode::Enter]);
        assert!(app.new_type_popup.is_none());
        assert_eq!(app.record_types.len(), 1);
        assert_eq!(app.record_types[0].name, "Gym");
    }

    #[test]
    fn settings_dropdown_persists_choice() {
        let mut app = app_with_types(&["Work"]);
        press(&mut app, &[KeyCode::Char('o'), KeyCode::Down, KeyCode::Enter]);
        assert_eq!(
            app.settings_dropdown,
            Some(SettingsDropdown {
                field: SettingsField::ShowUntracked,
                index: 0,
            })
        );
        press(&mut app, &[KeyCode::Down, KeyCode::Enter]);
        assert!(app.settings.show_untracked);
        assert!(Settings::load(&app.db).unwrap().show_untracked);
        assert_eq!(app.statistics_targets().len(), 2);
    }

    #[test]
    fn statistics_detail_cycles_grouping() {
        let mut app = app_with_types(&["Work"]);
        press(&mut app, &[KeyCode::Char('s'), KeyCode::Enter]);
        assert_eq!(app.view, AppView::StatisticsDetail);
        press(&mut app, &[KeyCode::Char('g'), KeyCode::Char('c')]);
        let detail = app.detail.as_ref().unwrap();
        assert_eq!(detail.grouping, ChartGrouping::Weekly);
        assert_eq!(detail.length, ChartLength::Fifty);
        assert_eq!(detail.data.chart.data.len(), 50);

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.view, AppView::Statistics);
    }

    #[test]
    fn tabs_cycle() {
        let mut app = app_with_types(&[]);
        press(&mut app, &[KeyCode::Tab]);
        assert_eq!(app.view, AppView::Records);
        press(&mut app, &[KeyCode::BackTab, KeyCode::BackTab]);
        assert_eq!(app.view, AppView::Settings);
    }

    #[test]
    fn index_helpers_wrap() {
        assert_eq!(step_index(0, 3, -1), 2);
        assert_eq!(step_index(2, 3, 1), 0);
        assert_eq!(step_index(0, 0, 1), 0);
        assert_eq!(clamp_index(5, 2), 1);
        assert_eq!(clamp_index(5, 0), 0);
    }
}
