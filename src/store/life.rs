use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;

use crate::db;

pub const BIRTHDAY_KEY: &str = "death-calendar-birthday";
pub const LIFE_EXPECTANCY_KEY: &str = "death-calendar-life-expectancy";

const DEFAULT_LIFE_EXPECTANCY: u32 = 70;
const MIN_LIFE_EXPECTANCY: u32 = 1;
const MAX_LIFE_EXPECTANCY: u32 = 120;
const WEEKS_PER_YEAR: u32 = 52;

/// Birth date and life expectancy backing the life calendar tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifeSettings {
    birthday: Option<NaiveDate>,
    life_expectancy: u32,
}

impl Default for LifeSettings {
    fn default() -> Self {
        Self {
            birthday: None,
            life_expectancy: DEFAULT_LIFE_EXPECTANCY,
        }
    }
}

impl LifeSettings {
    pub fn load(conn: &Connection) -> Result<Self> {
        // An empty string also means unset.
        let birthday = match db::read_json::<String>(BIRTHDAY_KEY, conn) {
            Ok(raw) => raw.and_then(|raw| NaiveDate::parse_from_str(&raw, "%Y-%m-%d").ok()),
            Err(err) => {
                log::warn!("{err:#}");
                None
            }
        };
        let life_expectancy = match db::read_json::<u32>(LIFE_EXPECTANCY_KEY, conn) {
            Ok(years) => years
                .unwrap_or(DEFAULT_LIFE_EXPECTANCY)
                .clamp(MIN_LIFE_EXPECTANCY, MAX_LIFE_EXPECTANCY),
            Err(err) => {
                log::warn!("{err:#}");
                DEFAULT_LIFE_EXPECTANCY
            }
        };
        Ok(Self {
            birthday,
            life_expectancy,
        })
    }

    pub fn birthday(&self) -> Option<NaiveDate> {
        self.birthday
    }

    pub fn life_expectancy(&self) -> u32 {
        self.life_expectancy
    }

    /// Stores the birthday, or forgets it when `None`.
    pub fn set_birthday(&mut self, birthday: Option<NaiveDate>, conn: &Connection) -> Result<()> {
        match birthday {
            Some(date) => db::write_json(BIRTHDAY_KEY, &date.format("%Y-%m-%d").to_string(), conn)?,
            None => db::delete_value(BIRTHDAY_KEY, conn)?,
        }
        self.birthday = birthday;
        Ok(())
    }

    /// Stores `years`, clamped to the 1..=120 range the input allows.
    pub fn set_life_expectancy(&mut self, years: u32, conn: &Connection) -> Result<()> {
        let years = years.clamp(MIN_LIFE_EXPECTANCY, MAX_LIFE_EXPECTANCY);
        db::write_json(LIFE_EXPECTANCY_KEY, &years, conn)?;
        self.life_expectancy = years;
        Ok(())
    }

    pub fn total_weeks(&self) -> u32 {
        self.life_expectancy * WEEKS_PER_YEAR
    }

    /// Whole weeks between the birthday and `today`, 0 when no birthday is set.
    pub fn weeks_lived(&self, today: NaiveDate) -> u32 {
        let Some(birthday) = self.birthday else {
            return 0;
        };
        let days = (today - birthday).num_days().unsigned_abs();
        (days / 7) as u32
    }

    /// Share of the expected life already gone, in percent. `None` without a birthday.
    pub fn percentage_lived(&self, today: NaiveDate) -> Option<f64> {
        self.birthday?;
        Some(self.weeks_lived(today) as f64 / self.total_weeks() as f64 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults_without_stored_values() {
        let conn = db::init_in_memory().unwrap();
        let life = LifeSettings::load(&conn).unwrap();
        assert_eq!(life, LifeSettings::default());
        assert_eq!(life.total_weeks(), 3640);
        assert_eq!(life.weeks_lived(ymd(2025, 1, 1)), 0);
        assert_eq!(life.percentage_lived(ymd(2025, 1, 1)), None);
    }

    #[test]
    fn counts_whole_weeks() {
        let conn = db::init_in_memory().unwrap();
        let mut life = LifeSettings::default();
        life.set_birthday(Some(ymd(2000, 1, 1)), &conn).unwrap();

        assert_eq!(life.weeks_lived(ymd(2000, 1, 7)), 0);
        assert_eq!(life.weeks_lived(ymd(2000, 1, 8)), 1);
        assert_eq!(life.weeks_lived(ymd(2000, 12, 30)), 52);
    }

    #[test]
    fn percentage_uses_life_expectancy() {
        let conn = db::init_in_memory().unwrap();
        let mut life = LifeSettings::default();
        life.set_birthday(Some(ymd(2000, 1, 1)), &conn).unwrap();
        life.set_life_expectancy(10, &conn).unwrap();

        // 364 days = 52 weeks out of 520
        let pct = life.percentage_lived(ymd(2000, 12, 30)).unwrap();
        assert!((pct - 10.0).abs() < 1e-9);
    }

    #[test]
    fn clamps_life_expectancy() {
        let conn = db::init_in_memory().unwrap();
        let mut life = LifeSettings::default();
        life.set_life_expectancy(0, &conn).unwrap();
        assert_eq!(life.life_expectancy(), 1);
        life.set_life_expectancy(500, &conn).unwrap();
        assert_eq!(life.life_expectancy(), 120);
    }

    #[test]
    fn settings_round_trip_through_storage() {
        let conn = db::init_in_memory().unwrap();
        let mut life = LifeSettings::default();
        life.set_birthday(Some(ymd(1990, 6, 15)), &conn).unwrap();
        life.set_life_expectancy(85, &conn).unwrap();
        assert_eq!(LifeSettings::load(&conn).unwrap(), life);

        life.set_birthday(None, &conn).unwrap();
        assert_eq!(LifeSettings::load(&conn).unwrap().birthday(), None);
    }
}
