//! CLI argument parsing and command handling.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use rusqlite::Connection;

use crate::color::PRESET_COLORS;
use crate::store::{GoalStore, LifeSettings, ThemeStore, parse_goal_date};

#[derive(Parser)]
#[command(
    name = "notime",
    version,
    about = "notime - A terminal dashboard of the time you have left"
)]
pub struct Cli {
    /// Database file (defaults to the platform data directory)
    #[arg(long = "db", global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show or change the accent color
    Color {
        #[command(subcommand)]
        command: ColorCommand,
    },
    /// Manage goals
    Goal {
        #[command(subcommand)]
        command: GoalCommand,
    },
    /// Life calendar settings
    Life {
        #[command(subcommand)]
        command: LifeCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ColorCommand {
    Show,
    Set { hex: String },
    Presets,
}

#[derive(Subcommand, Debug)]
pub enum GoalCommand {
    List,
    Add { text: String, date: String },
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum LifeCommand {
    Show,
    Birthday { date: String },
    Expectancy { years: u32 },
}

/// Execute a CLI command (color, goal, or life).
pub fn run(command: Command, conn: &Connection) -> Result<()> {
    match command {
        Command::Color { command } => match command {
            ColorCommand::Show => handle_color_show(conn)?,
            ColorCommand::Set { hex } => handle_color_set(&hex, conn)?,
            ColorCommand::Presets => handle_color_presets(),
        },
        Command::Goal { command } => match command {
            GoalCommand::List => handle_goal_list(conn)?,
            GoalCommand::Add { text, date } => handle_goal_add(&text, &date, conn)?,
            GoalCommand::Remove { id } => handle_goal_remove(&id, conn)?,
        },
        Command::Life { command } => match command {
            LifeCommand::Show => handle_life_show(conn)?,
            LifeCommand::Birthday { date } => handle_life_birthday(&date, conn)?,
            LifeCommand::Expectancy { years } => handle_life_expectancy(years, conn)?,
        },
    }
    Ok(())
}

fn handle_color_show(conn: &Connection) -> Result<()> {
    let theme = ThemeStore::load(conn)?.theme();
    println!("Accent: {}", theme.hex);
    println!("Hover:  {}", theme.hover);
    Ok(())
}

fn handle_color_set(hex: &str, conn: &Connection) -> Result<()> {
    let hex = if hex.starts_with('#') {
        hex.to_string()
    } else {
        format!("#{hex}")
    };
    let mut theme = ThemeStore::load(conn)?;
    if !theme.set_color(&hex, conn)? {
        println!("Invalid color format. Please provide a hex code like #RRGGBB.");
        return Ok(());
    }
    println!("Accent color set to {hex}");
    Ok(())
}

fn handle_color_presets() {
    for (index, preset) in PRESET_COLORS.iter().enumerate() {
        println!("{}  {preset}", index + 1);
    }
}

fn handle_goal_list(conn: &Connection) -> Result<()> {
    let goals = GoalStore::load(conn)?;
    if goals.is_empty() {
        println!("No goals yet.");
        return Ok(());
    }
    for goal in goals.goals() {
        println!("{}  {}  {}  {}", goal.id, goal.date, goal.color, goal.text);
    }
    Ok(())
}

fn handle_goal_add(text: &str, date: &str, conn: &Connection) -> Result<()> {
    let mut goals = GoalStore::load(conn)?;
    match goals.add_goal(text, parse_goal_date(date), conn)? {
        Some(id) => println!("Added goal {id}"),
        None => println!("A goal needs text and a date like 2025-12-31."),
    }
    Ok(())
}

fn handle_goal_remove(id: &str, conn: &Connection) -> Result<()> {
    let mut goals = GoalStore::load(conn)?;
    if goals.remove_goal(id, conn)? {
        println!("Removed goal {id}");
    } else {
        println!("Goal '{id}' not found");
    }
    Ok(())
}

fn handle_life_show(conn: &Connection) -> Result<()> {
    let life = LifeSettings::load(conn)?;
    let today = Local::now().date_naive();
    println!("Life expectancy: {} years", life.life_expectancy());
    match (life.birthday(), life.percentage_lived(today)) {
        (Some(birthday), Some(percentage)) => {
            println!("Birthday: {birthday}");
            println!(
                "Weeks lived: {} of {} ({percentage:.1}%)",
                life.weeks_lived(today),
                life.total_weeks()
            );
        }
        _ => println!("Birthday: not set"),
    }
    Ok(())
}

fn handle_life_birthday(date: &str, conn: &Connection) -> Result<()> {
    let mut life = LifeSettings::load(conn)?;
    if date.trim().is_empty() {
        life.set_birthday(None, conn)?;
        println!("Birthday cleared");
        return Ok(());
    }
    let Some(birthday) = parse_goal_date(date) else {
        println!("Invalid date. Please provide a date like 1990-01-31.");
        return Ok(());
    };
    if birthday > Local::now().date_naive() {
        println!("Birthday cannot be in the future.");
        return Ok(());
    }
    life.set_birthday(Some(birthday), conn)?;
    println!("Birthday set to {birthday}");
    Ok(())
}

fn handle_life_expectancy(years: u32, conn: &Connection) -> Result<()> {
    let mut life = LifeSettings::load(conn)?;
    life.set_life_expectancy(years, conn)?;
    println!("Life expectancy set to {} years", life.life_expectancy());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("notime").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn parses_global_db_flag() {
        let cli = parse(&["goal", "list", "--db", "/tmp/x.db"]);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
        assert!(matches!(
            cli.command,
            Some(Command::Goal {
                command: GoalCommand::List
            })
        ));
        assert!(parse(&[]).command.is_none());
    }

    #[test]
    fn color_set_accepts_bare_hex() {
        let conn = db::init_in_memory().unwrap();
        let cli = parse(&["color", "set", "22c55e"]);
        run(cli.command.unwrap(), &conn).unwrap();
        assert_eq!(ThemeStore::load(&conn).unwrap().hex(), "#22c55e");

        run(parse(&["color", "set", "nope"]).command.unwrap(), &conn).unwrap();
        assert_eq!(ThemeStore::load(&conn).unwrap().hex(), "#22c55e");
    }

    #[test]
    fn goal_commands_round_trip() {
        let conn = db::init_in_memory().unwrap();
        run(parse(&["goal", "add", "Ship", "2026-01-15"]).command.unwrap(), &conn).unwrap();
        run(parse(&["goal", "add", "Bad", "soon"]).command.unwrap(), &conn).unwrap();

        let goals = GoalStore::load(&conn).unwrap();
        assert_eq!(goals.len(), 1);
        let id = goals.goals()[0].id.clone();

        run(parse(&["goal", "remove", &id]).command.unwrap(), &conn).unwrap();
        assert!(GoalStore::load(&conn).unwrap().is_empty());
    }

    #[test]
    fn life_commands_update_settings() {
        let conn = db::init_in_memory().unwrap();
        run(parse(&["life", "birthday", "1990-06-15"]).command.unwrap(), &conn).unwrap();
        run(parse(&["life", "expectancy", "200"]).command.unwrap(), &conn).unwrap();

        let life = LifeSettings::load(&conn).unwrap();
        assert_eq!(life.birthday(), chrono::NaiveDate::from_ymd_opt(1990, 6, 15));
        assert_eq!(life.life_expectancy(), 120);
    }
}
