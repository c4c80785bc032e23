use std::path::{Path, PathBuf};

use super::types::{AppConfig, ColorMode};

/// Get the default annotate data directory: ~/.annotate
pub fn get_annotate_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".annotate"))
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)?;
    toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.annotate/config.toml
    let user_config = get_annotate_data_dir().ok().map(|d| d.join("config.toml"));

    // Priority 2: ./annotate.toml
    let local_config = Path::new("annotate.toml");

    let mut cfg = match user_config.as_deref() {
        Some(p) if p.exists() => load_from_path(p)?,
        _ if local_config.exists() => load_from_path(local_config)?,
        _ => AppConfig::default(),
    };

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok())?;
    Ok(cfg)
}

fn apply_env_overrides(
    cfg: &mut AppConfig,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    // An explicitly empty prefix is a valid template.
    if let Some(v) = var("ANNOTATE_PREFIX") {
        cfg.prefix = v;
    }
    if let Some(v) = var("ANNOTATE_COLOR") {
        if !v.trim().is_empty() {
            cfg.color = v
                .parse::<ColorMode>()
                .map_err(|e| anyhow::anyhow!("ANNOTATE_COLOR: {e}"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "color = \"never\"\n[logging]\nlevel = \"debug\"").unwrap();

        let cfg = load_from_path(f.path()).unwrap();
        assert_eq!(cfg.prefix, "%0 ");
        assert_eq!(cfg.color, ColorMode::Never);
        assert_eq!(cfg.logging.level, "debug");
        assert!(cfg.logging.console);
        assert!(!cfg.logging.file);
    }

    #[test]
    fn bad_file_reports_path() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "color = \"sometimes\"").unwrap();

        let err = load_from_path(f.path()).unwrap_err().to_string();
        assert!(err.contains(&f.path().display().to_string()), "{err}");
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> =
            HashMap::from([("ANNOTATE_PREFIX", "[%>] "), ("ANNOTATE_COLOR", "always")]);
        let mut cfg = AppConfig::default();

        apply_env_overrides(&mut cfg, |k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(cfg.prefix, "[%>] ");
        assert_eq!(cfg.color, ColorMode::Always);
    }

    #[test]
    fn invalid_color_env_is_rejected() {
        let mut cfg = AppConfig::default();
        let res = apply_env_overrides(&mut cfg, |k| {
            (k == "ANNOTATE_COLOR").then(|| "purple".to_string())
        });
        assert!(res.is_err());
    }
}
