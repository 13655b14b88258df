//! Config subcommand handlers.

use std::path::PathBuf;
use std::str::FromStr;

use topoview_core::{RefreshInterval, Theme, ViewMode};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

fn format_config(cfg: &Config) -> String {
    toml::to_string_pretty(cfg).unwrap_or_else(|e| format!("# failed to render config: {e}"))
}

fn save_config(cfg: &Config) -> Result<PathBuf, CliError> {
    cfg.validate()?;
    Ok(config::save_config(cfg)?)
}

fn parse_value<T: FromStr>(field: &str, value: &str, expected: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("'{value}' is not {expected}"),
    })
}

fn parse_refresh(value: &str) -> Result<RefreshInterval, CliError> {
    Ok(value.parse::<RefreshInterval>()?)
}

const VALID_KEYS: &str = "topology, view, theme, refresh, default_profile, defaults.output, \
     defaults.color, defaults.view, defaults.theme, defaults.refresh, popup.width, \
     popup.height, popup.padding, popup.margin, popup.below_offset, popup.reserved_top";

/// Apply one `key = value` edit. Bare keys target the active profile.
fn apply_setting(
    cfg: &mut Config,
    profile_name: &str,
    key: &str,
    value: &str,
) -> Result<(), CliError> {
    let number = |field: &str| parse_value::<f64>(field, value, "a number");

    match key {
        "default_profile" | "default-profile" => cfg.default_profile = Some(value.into()),
        "defaults.output" => cfg.defaults.output = value.into(),
        "defaults.color" => {
            if !matches!(value, "auto" | "always" | "never") {
                return Err(CliError::Validation {
                    field: key.into(),
                    reason: "must be 'auto', 'always', or 'never'".into(),
                });
            }
            cfg.defaults.color = value.into();
        }
        "defaults.view" => cfg.defaults.view = parse_value(key, value, "a view mode")?,
        "defaults.theme" => cfg.defaults.theme = parse_value(key, value, "a theme")?,
        "defaults.refresh" => cfg.defaults.refresh = parse_refresh(value)?,
        "popup.width" => cfg.popup.width = number(key)?,
        "popup.height" => cfg.popup.height = number(key)?,
        "popup.padding" => cfg.popup.padding = number(key)?,
        "popup.margin" => cfg.popup.margin = number(key)?,
        "popup.below_offset" | "popup.below-offset" => cfg.popup.below_offset = number(key)?,
        "popup.reserved_top" | "popup.reserved-top" => cfg.popup.reserved_top = number(key)?,

        "topology" | "view" | "theme" | "refresh" => {
            if key != "topology" && !cfg.profiles.contains_key(profile_name) {
                return Err(CliError::ProfileNotFound {
                    name: profile_name.into(),
                    available: cfg.profile_names(),
                });
            }
            let profile = cfg
                .profiles
                .entry(profile_name.into())
                .or_insert_with(|| Profile::new(value));
            match key {
                "topology" => profile.topology = value.into(),
                "view" => profile.view = Some(parse_value::<ViewMode>(key, value, "a view mode")?),
                "theme" => profile.theme = Some(parse_value::<Theme>(key, value, "a theme")?),
                _ => profile.refresh = Some(parse_refresh(value)?),
            }
        }

        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!("unknown config key '{other}'. Valid keys: {VALID_KEYS}"),
            });
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init {
            topology,
            name,
            force,
        } => {
            let path = config::config_path();
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let mut cfg = Config {
                default_profile: Some(name.clone()),
                ..Config::default()
            };
            cfg.profiles.insert(name.clone(), Profile::new(topology));
            let written = save_config(&cfg)?;

            if !global.quiet {
                eprintln!("✓ Configuration written to {}", written.display());
                eprintln!("  Active profile: {name}");
                eprintln!("  Try it: topoview tree");
            }
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = output::render_single(&global.output, &cfg, format_config, |c| {
                c.profiles.keys().cloned().collect::<Vec<_>>().join("\n")
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            apply_setting(&mut cfg, &profile_name, &key, &value)?;
            save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Set {key} = {value}");
            }
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config()?;
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: topoview config init --topology <FILE>");
                return Ok(());
            }
            let default = cfg.default_profile.as_deref().unwrap_or_default();
            let lines: Vec<String> = cfg
                .profiles
                .iter()
                .map(|(name, p)| {
                    let marker = if name == default { " *" } else { "" };
                    format!("{name}{marker}\t{}", p.topology.display())
                })
                .collect();
            output::print_output(&lines.join("\n"), global.quiet);
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    name,
                    available: cfg.profile_names(),
                });
            }
            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Default profile set to '{name}'");
            }
            Ok(())
        }
    }
}
