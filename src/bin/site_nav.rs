//! Navigation and theme inspection tool
//!
//! Prints the site navigation, resolves ids and paths the way the sidebar
//! does, and exports the theme tokens for the style pipeline.
//!
//! Run with: cargo run --bin site-nav -- tree

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cloud_atlas_nav::config::NavigationConfig;
use cloud_atlas_nav::domain::{NavItem, NavigationTree, ThemeConfig};
use cloud_atlas_nav::shared::logging::log_theme_export;
use cloud_atlas_nav::shared::state::NavigationState;

#[derive(Parser)]
#[command(name = "site-nav", version, about = "Inspect the Cloud Atlas navigation and export theme tokens")]
struct Cli {
    /// Read the navigation tree from a JSON file instead of the built-in one
    #[arg(long, global = true)]
    tree: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the navigation as an indented outline
    Tree,
    /// Print the navigation tree as JSON
    TreeJson,
    /// Show one item and its ancestors as JSON
    Find { id: String },
    /// Resolve a path and print the resulting navigation state
    Resolve { href: String },
    /// Print the initial navigation state (defaults + SITE_NAV_* overrides)
    State,
    /// Print the theme as CSS custom properties, keyframes and utilities
    ThemeCss,
    /// Print the theme as JSON
    ThemeJson,
}

fn main() -> Result<()> {
    // Logs go to stderr so JSON/CSS output stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let tree = load_tree(cli.tree.as_ref())?;

    match cli.command {
        Command::Tree => print_outline(tree.list(), 0),
        Command::TreeJson => println!("{}", tree.to_json()?),
        Command::Find { id } => {
            let Some(item) = tree.find_by_id(&id) else {
                bail!("No navigation item with id {id}");
            };
            let ancestors: Vec<&str> = tree
                .ancestors(&id)
                .unwrap_or_default()
                .into_iter()
                .map(|a| a.id.as_str())
                .collect();
            let out = serde_json::json!({ "item": item, "ancestors": ancestors });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::Resolve { href } => {
            let state = initial_state(tree)?;
            if !state.navigate_to(&href) {
                bail!("No navigation item with href {href}");
            }
            println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
        }
        Command::State => {
            let state = initial_state(tree)?;
            println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
        }
        Command::ThemeCss => {
            let theme = ThemeConfig::canonical();
            theme.validate()?;
            let css = theme.to_css();
            log_theme_export("css", css.len());
            print!("{css}");
        }
        Command::ThemeJson => {
            let theme = ThemeConfig::canonical();
            theme.validate()?;
            let json = serde_json::to_string_pretty(&theme)?;
            log_theme_export("json", json.len());
            println!("{json}");
        }
    }

    Ok(())
}

fn load_tree(path: Option<&PathBuf>) -> Result<NavigationTree> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            NavigationTree::from_json(&json)
                .with_context(|| format!("Invalid navigation tree in {}", path.display()))
        }
        None => Ok(NavigationTree::builtin()),
    }
}

fn initial_state(tree: NavigationTree) -> Result<NavigationState> {
    let config = NavigationConfig::from_env();
    NavigationState::from_config(tree, &config).context("Invalid SITE_NAV_* configuration")
}

fn print_outline(items: &[NavItem], depth: usize) {
    for item in items {
        println!(
            "{}{} [{}] {} -> {}",
            "  ".repeat(depth),
            item.label,
            item.id,
            item.icon,
            item.href
        );
        print_outline(&item.children, depth + 1);
    }
}
