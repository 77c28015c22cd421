/// User preferences persisted in the settings table.
use anyhow::Result;
use chrono::Weekday;
use rusqlite::Connection;

use crate::db;
use crate::types::RecordType;

const KEY_SORT: &str = "record_type_sort";
const KEY_SHOW_UNTRACKED: &str = "show_untracked";
const KEY_FIRST_DAY: &str = "first_day_of_week";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecordTypeSort {
    #[default]
    Name,
    Color,
    Creation,
}

impl RecordTypeSort {
    pub const ALL: [RecordTypeSort; 3] = [Self::Name, Self::Color, Self::Creation];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "By name",
            Self::Color => "By color",
            Self::Creation => "By creation",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Color => "color",
            Self::Creation => "creation",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sort| sort.key() == key)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FirstDayOfWeek {
    #[default]
    Monday,
    Sunday,
}

impl FirstDayOfWeek {
    pub const ALL: [FirstDayOfWeek; 2] = [Self::Monday, Self::Sunday];

    pub fn label(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Sunday => "Sunday",
        }
    }

    pub fn weekday(self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Sunday => Weekday::Sun,
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Sunday => "sunday",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.key() == key)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    pub record_type_sort: RecordTypeSort,
    pub show_untracked: bool,
    pub first_day_of_week: FirstDayOfWeek,
}

impl Settings {
    /// Reads stored settings; unknown or missing values fall back to defaults.
    pub fn load(conn: &Connection) -> Result<Self> {
        let defaults = Self::default();
        let record_type_sort = db::query_setting(KEY_SORT, conn)?
            .and_then(|value| RecordTypeSort::from_key(&value))
            .unwrap_or(defaults.record_type_sort);
        let show_untracked = db::query_setting(KEY_SHOW_UNTRACKED, conn)?
            .map(|value| value == "true")
            .unwrap_or(defaults.show_untracked);
        let first_day_of_week = db::query_setting(KEY_FIRST_DAY, conn)?
            .and_then(|value| FirstDayOfWeek::from_key(&value))
            .unwrap_or(defaults.first_day_of_week);
        Ok(Self {
            record_type_sort,
            show_untracked,
            first_day_of_week,
        })
    }

    pub fn save(&self, conn: &Connection) -> Result<()> {
        db::store_setting(KEY_SORT, self.record_type_sort.key(), conn)?;
        db::store_setting(
            KEY_SHOW_UNTRACKED,
            if self.show_untracked { "true" } else { "false" },
            conn,
        )?;
        db::store_setting(KEY_FIRST_DAY, self.first_day_of_week.key(), conn)?;
        tracing::info!(settings = ?self, "settings saved");
        Ok(())
    }

    pub fn sort_record_types(&self, record_types: &mut [RecordType]) {
        match self.record_type_sort {
            RecordTypeSort::Name => {
                record_types.sort_by_key(|record_type| record_type.name.to_lowercase())
            }
            RecordTypeSort::Color => {
                record_types.sort_by(|a, b| a.color.cmp(&b.color).then(a.name.cmp(&b.name)))
            }
            RecordTypeSort::Creation => record_types.sort_by_key(|record_type| record_type.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_connection;

    fn record_type(id: u32, name: &str, color: &str) -> RecordType {
        RecordType {
            id: Some(id),
            name: name.to_string(),
            icon: "work".to_string(),
            color: color.to_string(),
        }
    }

    #[test]
    fn defaults_when_nothing_stored() {
        let conn = test_connection();
        assert_eq!(Settings::load(&conn).unwrap(), Settings::default());
    }

    #[test]
    fn save_then_load() {
        let conn = test_connection();
        let settings = Settings {
            record_type_sort: RecordTypeSort::Color,
            show_untracked: true,
            first_day_of_week: FirstDayOfWeek::Sunday,
        };
        settings.save(&conn).unwrap();
        assert_eq!(Settings::load(&conn).unwrap(), settings);
    }

    #[test]
    fn garbage_values_fall_back() {
        let conn = test_connection();
        db::store_setting(KEY_SORT, "sideways", &conn).unwrap();
        assert_eq!(
            Settings::load(&conn).unwrap().record_type_sort,
            RecordTypeSort::Name
        );
    }

    #[test]
    fn sorts_record_types() {
        let mut types = vec![
            record_type(2, "beta", "#000002"),
            record_type(3, "Alpha", "#000003"),
            record_type(1, "gamma", "#000001"),
        ];
        let mut settings = Settings::default();

        settings.sort_record_types(&mut types);
        assert_eq!(types[0].name, "Alpha");

        settings.record_type_sort = RecordTypeSort::Color;
        settings.sort_record_types(&mut types);
        assert_eq!(types[0].name, "gamma");

        settings.record_type_sort = RecordTypeSort::Creation;
        settings.sort_record_types(&mut types);
        assert_eq!(types[0].id, Some(1));
        assert_eq!(types[2].id, Some(3));
    }
}
