//! ColorWall Control CLI
//!
//! Command-line interface for monitoring and controlling ColorWall light walls.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use color_wall::config::AppConfig;
use color_wall::protocol::{EFFECTS, id_for_name};
use color_wall::storage;
use color_wall::utils::parsing::{parse_param, parse_switch};
use color_wall::{ColorWall, PanelLight};

// =============================================================================
// CLI Arguments
// =============================================================================

/// ColorWall Control Tool
#[derive(Parser, Debug)]
#[command(name = "color-wall-cli")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Device address (ip or ip:port). Defaults to the saved host.
    #[arg(long, global = true)]
    host: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show current device state
    Status,

    /// Check that the device answers
    Validate,

    /// Validate and save the device address
    SetHost {
        /// Device address (ip or ip:port)
        host: String,
    },

    /// Switch the wall on or off
    Power {
        /// on or off
        state: String,

        /// Master brightness (0-255). Keeps the current value if omitted.
        #[arg(short, long)]
        brightness: Option<u8>,
    },

    /// List panels
    Panels,

    /// Turn a panel on, optionally changing brightness and color
    PanelOn {
        /// Panel id
        id: u16,

        /// Brightness (0-255)
        #[arg(short, long)]
        brightness: Option<u8>,

        /// Hue in degrees (0-360)
        #[arg(long)]
        hue: Option<f64>,

        /// Saturation percentage (0-100)
        #[arg(long)]
        saturation: Option<f64>,
    },

    /// Turn a panel off
    PanelOff {
        /// Panel id
        id: u16,
    },

    /// List effects with their configured parameters
    Effects,

    /// Start an effect with its configured parameters
    Effect {
        /// Effect name, e.g. "Color wash"
        name: String,
    },

    /// Change saved parameters of an effect
    Configure {
        /// Effect name, e.g. "Color wash"
        name: String,

        /// Parameters as name=value, e.g. speed=3 deltaHue=24
        #[arg(required = true)]
        params: Vec<String>,
    },

    /// Restore the default parameters of an effect
    ResetEffect {
        /// Effect name
        name: String,
    },

    /// Poll the device and print its state (Ctrl+C to stop)
    Monitor {
        /// Poll interval in seconds (default: saved poll interval)
        #[arg(short, long)]
        interval: Option<u64>,
    },
}

// =============================================================================
// Main
// =============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = storage::load_config().context("Failed to load config")?;
    let host = args.host.clone();

    match args.command {
        Command::Status => cmd_status(&resolve_host(host, &config)?, &config),
        Command::Validate => cmd_validate(&resolve_host(host, &config)?),
        Command::SetHost { host } => cmd_set_host(&host, config),
        Command::Power { state, brightness } => {
            cmd_power(&resolve_host(host, &config)?, &state, brightness)
        }
        Command::Panels => cmd_panels(&resolve_host(host, &config)?),
        Command::PanelOn {
            id,
            brightness,
            hue,
            saturation,
        } => cmd_panel_on(&resolve_host(host, &config)?, id, brightness, hue, saturation),
        Command::PanelOff { id } => cmd_panel_off(&resolve_host(host, &config)?, id),
        Command::Effects => cmd_effects(&config),
        Command::Effect { name } => cmd_effect(&resolve_host(host, &config)?, &config, &name),
        Command::Configure { name, params } => cmd_configure(config, &name, &params),
        Command::ResetEffect { name } => cmd_reset_effect(config, &name),
        Command::Monitor { interval } => cmd_monitor(
            &resolve_host(host, &config)?,
            &config,
            interval.unwrap_or(config.poll_interval),
        ),
    }
}

fn resolve_host(host: Option<String>, config: &AppConfig) -> Result<String> {
    match host.or_else(|| config.host.clone()) {
        Some(host) => Ok(host),
        None => bail!("No device configured. Use --host or `color-wall-cli set-host <HOST>`"),
    }
}

fn connect(host: &str, config: &AppConfig) -> Result<ColorWall> {
    let mut wall = ColorWall::new(host).context("Failed to create client")?;
    wall.load_effect_settings(&config.effects)
        .context("Invalid effect options")?;
    Ok(wall)
}

// =============================================================================
// Command Implementations
// =============================================================================

fn cmd_status(host: &str, config: &AppConfig) -> Result<()> {
    let mut wall = connect(host, config)?;
    wall.update().context("Failed to read device state")?;
    print!("{}", wall.state());
    Ok(())
}

fn cmd_validate(host: &str) -> Result<()> {
    println!("📡 Probing {}...", host);
    ColorWall::validate_connection(host).context("Device did not answer")?;
    println!("✅ ColorWall at {} is reachable.", host);
    Ok(())
}

fn cmd_set_host(host: &str, mut config: AppConfig) -> Result<()> {
    ColorWall::validate_connection(host).context("Device did not answer")?;
    config.host = Some(host.to_string());
    storage::save_config(&config).context("Failed to save config")?;
    println!("✅ Saved host {}", host);
    Ok(())
}

fn cmd_power(host: &str, state: &str, brightness: Option<u8>) -> Result<()> {
    let on = parse_switch(state)?;
    let wall = ColorWall::new(host).context("Failed to create client")?;

    let brightness = match brightness {
        Some(value) => value,
        None => {
            wall.get_power()
                .context("Failed to read power state")?
                .brightness
        }
    };

    if !wall.set_power(on, brightness).context("Failed to set power")? {
        bail!("Device rejected the power change");
    }
    println!(
        "✅ Wall {} (brightness {})",
        if on { "on" } else { "off" },
        brightness
    );
    Ok(())
}

fn cmd_panels(host: &str) -> Result<()> {
    let wall = ColorWall::new(host).context("Failed to create client")?;
    let panels = wall.get_panels().context("Failed to read panels")?;

    println!("🧱 {} panels:", panels.len());
    println!("{}", "─".repeat(50));
    for panel in &panels {
        let (hue, saturation) = color_wall::utils::device_to_hs(panel.hue, panel.saturation);
        println!("  {}  ({:.0}°, {:.0}%)", panel, hue, saturation);
    }
    Ok(())
}

fn cmd_panel_on(
    host: &str,
    id: u16,
    brightness: Option<u8>,
    hue: Option<f64>,
    saturation: Option<f64>,
) -> Result<()> {
    let mut wall = ColorWall::new(host).context("Failed to create client")?;
    wall.update().context("Failed to read device state")?;
    let mut light = PanelLight::new(&wall, id)?;

    let hs = match (hue, saturation) {
        (None, None) => None,
        (hue, saturation) => {
            let (current_hue, current_saturation) = light.hs_color();
            Some((
                hue.unwrap_or(current_hue),
                saturation.unwrap_or(current_saturation),
            ))
        }
    };

    light
        .turn_on(&mut wall, brightness, hs)
        .context("Failed to update panel")?;
    println!("✅ {}", light.panel());
    Ok(())
}

fn cmd_panel_off(host: &str, id: u16) -> Result<()> {
    let mut wall = ColorWall::new(host).context("Failed to create client")?;
    wall.update().context("Failed to read device state")?;
    let mut light = PanelLight::new(&wall, id)?;

    light.turn_off(&mut wall).context("Failed to update panel")?;
    println!("✅ {} off", light.name());
    Ok(())
}

fn cmd_effects(config: &AppConfig) -> Result<()> {
    println!("🎨 Effects:");
    for kind in EFFECTS {
        let effect = config
            .effects
            .effect(kind.id())
            .with_context(|| format!("Invalid options for '{}'", kind.name()))?;
        println!("  [{}] {}", kind.id(), effect);
    }
    Ok(())
}

fn cmd_effect(host: &str, config: &AppConfig, name: &str) -> Result<()> {
    let wall = connect(host, config)?;
    let effect = wall.configured_effect(name)?;

    println!("🎨 Starting {}", effect);
    if !wall.set_effect(&effect).context("Failed to set effect")? {
        bail!("Device rejected effect '{}'", name);
    }
    println!("✅ Effect started.");
    Ok(())
}

fn cmd_configure(mut config: AppConfig, name: &str, params: &[String]) -> Result<()> {
    let id = id_for_name(name)?;
    for param in params {
        let (key, value) = parse_param(param)?;
        config.effects.set_param(id, &key, value)?;
    }

    storage::save_config(&config).context("Failed to save config")?;
    println!("✅ {}", config.effects.effect(id)?);
    Ok(())
}

fn cmd_reset_effect(mut config: AppConfig, name: &str) -> Result<()> {
    let id = id_for_name(name)?;
    config.effects.reset(id)?;

    storage::save_config(&config).context("Failed to save config")?;
    println!("✅ {}", config.effects.effect(id)?);
    Ok(())
}

fn cmd_monitor(host: &str, config: &AppConfig, interval_secs: u64) -> Result<()> {
    let mut wall = connect(host, config)?;

    // Setup Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .context("Failed to set Ctrl+C handler")?;

    println!(
        "📡 Monitoring {} every {}s (Ctrl+C to stop)...\n",
        host, interval_secs
    );

    let mut available = true;
    while running.load(Ordering::SeqCst) {
        match wall.update() {
            Ok(()) => {
                if !available {
                    println!("✅ {} is reachable again", host);
                }
                available = true;
                // Clear screen and move cursor to top
                print!("\x1B[2J\x1B[1;1H");
                print!("{}", wall.state());
            }
            Err(e) if e.is_connection() => {
                if available {
                    println!("❌ {} unavailable: {}", host, e);
                }
                available = false;
            }
            Err(e) => return Err(e).context("Failed to read device state"),
        }

        // Sleep in small steps so Ctrl+C stays responsive
        let ticks = sleep_ticks(interval_secs);
        let mut waited = 0;
        while waited < ticks && running.load(Ordering::SeqCst) {
            std::thread::sleep(Duration::from_millis(100));
            waited += 1;
        }
    }

    println!("\n👋 Monitor stopped.");
    Ok(())
}

/// Number of 100 ms sleeps in one poll interval.
fn sleep_ticks(interval_secs: u64) -> u64 {
    interval_secs.saturating_mul(10)
}
