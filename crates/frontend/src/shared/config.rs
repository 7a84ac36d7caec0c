use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub app: AppSettings,
    pub router: RouterSettings,
    pub auth: AuthSettings,
    pub theme: ThemeSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppSettings {
    pub title_suffix: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RouterSettings {
    pub public_path: String,
    pub home_path: String,
    pub max_redirects: usize,
    /// 0 disables the guard timeout.
    #[serde(default)]
    pub guard_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AuthSettings {
    pub storage_key: String,
    pub session_ttl_hours: i64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ThemeSettings {
    pub storage_key: String,
}

/// Default configuration embedded in the binary
pub const DEFAULT_CONFIG: &str = r#"
[app]
title_suffix = "케빈랩 사업관리 시스템"

[router]
public_path = "/"
home_path = "/dashboard"
max_redirects = 8
guard_timeout_ms = 0

[auth]
storage_key = "auth"
session_ttl_hours = 24

[theme]
storage_key = "theme"
"#;

/// Element whose text, when present, overrides the embedded configuration.
const CONFIG_ELEMENT_ID: &str = "app-config";

pub fn parse_config(contents: &str) -> anyhow::Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents)?;
    if !config.router.public_path.starts_with('/') || !config.router.home_path.starts_with('/') {
        anyhow::bail!(
            "router paths must be absolute: public_path={:?}, home_path={:?}",
            config.router.public_path,
            config.router.home_path
        );
    }
    Ok(config)
}

/// Load configuration
///
/// Search order:
/// 1. `<script id="app-config" type="application/toml">` in the host page
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<AppConfig> {
    let inline = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content());

    match inline {
        Some(contents) if !contents.trim().is_empty() => {
            log::info!("Loading config from #{}", CONFIG_ELEMENT_ID);
            parse_config(&contents)
        }
        _ => {
            log::info!("Using default embedded configuration");
            parse_config(DEFAULT_CONFIG)
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings {
                title_suffix: "케빈랩 사업관리 시스템".to_string(),
            },
            router: RouterSettings {
                public_path: "/".to_string(),
                home_path: "/dashboard".to_string(),
                max_redirects: 8,
                guard_timeout_ms: 0,
            },
            auth: AuthSettings {
                storage_key: "auth".to_string(),
                session_ttl_hours: 24,
            },
            theme: ThemeSettings {
                storage_key: "theme".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.router.public_path, "/");
        assert_eq!(config.router.home_path, "/dashboard");
        assert_eq!(config.router.max_redirects, 8);
    }

    #[test]
    fn test_default_matches_embedded_document() {
        assert_eq!(parse_config(DEFAULT_CONFIG).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_guard_timeout_is_optional() {
        let contents = DEFAULT_CONFIG.replace("guard_timeout_ms = 0\n", "");
        let config = parse_config(&contents).unwrap();
        assert_eq!(config.router.guard_timeout_ms, 0);
    }

    #[test]
    fn test_relative_paths_rejected() {
        let contents = DEFAULT_CONFIG.replace("home_path = \"/dashboard\"", "home_path = \"dashboard\"");
        assert!(parse_config(&contents).is_err());
    }
}
