//! Display theme preference.

use super::AppContext;
use anyhow::Result;
use clap::{Args, Subcommand};
use quizbank_core::{PreferenceStore, Theme};

#[derive(Args, Debug)]
pub struct ThemeArgs {
    #[command(subcommand)]
    pub command: Option<ThemeCommands>,
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommands {
    /// Switch between light and dark
    Toggle,
    /// Set the theme explicitly
    Set { theme: Theme },
}

pub fn run(ctx: &AppContext, args: ThemeArgs) -> Result<()> {
    let preferences = PreferenceStore::new(&*ctx.store);
    let theme = match args.command {
        None => preferences.theme(),
        Some(ThemeCommands::Toggle) => preferences.toggle_theme()?,
        Some(ThemeCommands::Set { theme }) => {
            preferences.set_theme(theme)?;
            theme
        }
    };
    println!("Theme: {}", ctx.palette().accent(theme.as_str()));
    Ok(())
}
