use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default)]
    pub download_dir: Option<String>,
    #[serde(default)]
    pub export_timeout_secs: Option<u64>,
    #[serde(default)]
    pub strict_metric_rendering: bool,
    #[serde(default = "default_export_limit")]
    pub default_export_limit: u32,
}

fn default_server_url() -> String { "http://127.0.0.1:5000".to_string() }
fn default_export_limit() -> u32 { 20 }

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            download_dir: None,
            export_timeout_secs: None,
            strict_metric_rendering: false,
            default_export_limit: default_export_limit(),
        }
    }
}

impl AppSettings {
    pub fn render_policy(&self) -> MissingValuePolicy {
        if self.strict_metric_rendering {
            MissingValuePolicy::Strict
        } else {
            MissingValuePolicy::Dash
        }
    }
}

/// How the renderer treats a metric that could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MissingValuePolicy {
    /// Show a `-` placeholder.
    #[default]
    #[serde(rename = "dash")]
    Dash,
    /// Fail the render, as the legacy web page did when formatting a null.
    #[serde(rename = "strict")]
    Strict,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults_from_empty_json() {
        let s: AppSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(s, AppSettings::default());
        assert_eq!(s.render_policy(), MissingValuePolicy::Dash);
    }

    #[test]
    fn test_strict_flag_selects_policy() {
        let s: AppSettings = serde_json::from_str(r#"{"strict_metric_rendering": true}"#).unwrap();
        assert_eq!(s.render_policy(), MissingValuePolicy::Strict);
        assert_eq!(s.default_export_limit, 20);
    }
}
