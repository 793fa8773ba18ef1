//! `flyfind` - CLI for flightfinder
//!
//! This binary lists, maps and renders the flight experiences catalog from
//! the command line.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::fs;
use std::path::Path;

use clap::Parser;
use tracing::debug;

use flightfinder::cli::{
    Cli, Command, ConfigCommand, FilterArgs, ListCommand, MapCommand, OutputFormat, RenderCommand,
    ShowCommand,
};
use flightfinder::map::HeadlessMap;
use flightfinder::view::{html, money, rate, DetailView};
use flightfinder::{init_logging, Browser, BrowserSettings, Config, Dataset, Error};

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() -> CliResult {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;
    let data_path = cli
        .data
        .clone()
        .unwrap_or_else(|| config.data.dataset_path.clone());
    let data_path = data_path.as_path();

    // Execute the command
    let result = match cli.command {
        Command::List(cmd) => handle_list(&config, data_path, &cmd),
        Command::Show(cmd) => handle_show(&config, data_path, &cmd),
        Command::Map(cmd) => handle_map(&config, data_path, &cmd),
        Command::Render(cmd) => handle_render(&config, data_path, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    };

    if let Err(err) = &result {
        if err.downcast_ref::<Error>().is_some_and(Error::is_dataset_error) {
            eprintln!(
                "hint: pass --data FILE or set [data] dataset_path in {}",
                Config::default_config_path().display()
            );
        }
    }
    result
}

fn open_browser(
    config: &Config,
    data_path: &Path,
    filters: &FilterArgs,
) -> Result<Browser<HeadlessMap>, Error> {
    let filters = filters.to_filter_state()?;
    let dataset = Dataset::load(data_path)?;
    let mut browser = Browser::new(dataset, BrowserSettings::from(config), HeadlessMap::new());
    browser.set_filters(filters);
    debug!(visible = browser.visible_ids().len(), "Filters applied");
    Ok(browser)
}

fn handle_list(config: &Config, data_path: &Path, cmd: &ListCommand) -> CliResult {
    let browser = open_browser(config, data_path, &cmd.filters)?;
    let currency = &config.display.currency_symbol;

    match cmd.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(browser.cards())?);
        }
        OutputFormat::Plain => {
            for card in browser.cards().cards() {
                let flag = if card.over_budget { " [over budget]" } else { "" };
                println!(
                    "{}  {} - {}, {} min, {}{flag}",
                    card.id,
                    card.title,
                    card.price_label(currency),
                    card.duration,
                    card.drive_label()
                );
            }
        }
        OutputFormat::Table => {
            if browser.cards().is_empty() {
                println!("{}", flightfinder::view::EMPTY_TITLE);
                println!("{}", flightfinder::view::EMPTY_HINT);
            } else {
                println!(
                    "{:>4}  {:<40} {:>8} {:>6} {:>9} {:>6}",
                    "ID", "NAME", "PRICE", "MIN", "PER MIN", "DRIVE"
                );
                for card in browser.cards().cards() {
                    println!(
                        "{:>4}  {:<40} {:>8} {:>6} {:>9} {:>6}{}",
                        card.id,
                        truncate(&card.title, 40),
                        money(currency, card.price),
                        card.duration,
                        rate(currency, card.cost_per_min),
                        card.drive_time,
                        if card.over_budget { "  over budget" } else { "" }
                    );
                }
            }
            println!();
            println!("{}", browser.results_label());
        }
    }
    Ok(())
}

fn handle_show(config: &Config, data_path: &Path, cmd: &ShowCommand) -> CliResult {
    let dataset = Dataset::load(data_path)?;
    let Some(record) = dataset.experience(cmd.id) else {
        return Err(format!("no experience with id {}", cmd.id).into());
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    let home_name = dataset.home().map_or("home", |home| home.name.as_str());
    let detail = DetailView::project(record, home_name);
    let currency = &config.display.currency_symbol;

    println!("{}", detail.title);
    println!("{}", "=".repeat(detail.title.chars().count()));
    println!("{}", detail.aircraft);
    println!();
    for (label, value) in detail.facts(currency) {
        println!("  {label:<22} {value}");
    }
    println!();
    println!("Landmarks:    {}", detail.landmarks);
    println!("Notes:        {}", detail.notes);
    println!("Location:     {}", detail.location);
    println!("Operator:     {}", detail.operator);
    println!("Availability: {}", detail.availability);
    println!("Website:      {}", detail.website);
    Ok(())
}

fn handle_map(config: &Config, data_path: &Path, cmd: &MapCommand) -> CliResult {
    let browser = open_browser(config, data_path, &cmd.filters)?;
    let map = browser.map();

    if cmd.json {
        let output = serde_json::json!({
            "center": map.center(),
            "zoom": map.zoom(),
            "bounds": map.fitted_bounds(),
            "padding": map.fit_padding(),
            "markers": map.markers(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let Some(home) = browser.dataset().home() {
        println!("🏠 {} ({})", home.name, home.coordinate());
    }
    for group in browser.markers().groups() {
        println!("{:>3}  {}", group.icon().label(), group.coordinate());
        for id in group.member_ids() {
            if let Some(record) = browser.dataset().experience(id) {
                println!("       {id}  {}", record.name);
            }
        }
    }
    if let Some(bounds) = map.fitted_bounds() {
        println!();
        println!(
            "View: {:.4},{:.4} to {:.4},{:.4}",
            bounds.south, bounds.west, bounds.north, bounds.east
        );
    }
    Ok(())
}

fn handle_render(config: &Config, data_path: &Path, cmd: &RenderCommand) -> CliResult {
    let browser = open_browser(config, data_path, &cmd.filters)?;
    let fragment = html::card_list(browser.cards(), &config.display.currency_symbol);

    match &cmd.output {
        Some(path) => {
            fs::write(path, fragment)?;
            eprintln!("{} written to {}", browser.results_label(), path.display());
        }
        None => println!("{fragment}"),
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> CliResult {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Data]");
                println!("  Dataset path:       {}", config.data.dataset_path.display());
                println!();
                println!("[Map]");
                println!("  Center:             {}", config.map_center());
                println!("  Zoom:               {}", config.map.zoom);
                println!("  Tiles:              {}", config.map.tile_url);
                println!("  Fit padding:        {}", config.map.fit_padding);
                println!("  Resize padding:     {}", config.map.resize_fit_padding);
                println!("  Resize delay (ms):  {}", config.map.resize_delay_ms);
                println!();
                println!("[Display]");
                println!("  Currency symbol:    {}", config.display.currency_symbol);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
