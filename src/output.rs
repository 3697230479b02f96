//! # Output Configuration
//!
//! Controls how progress lines look: with colours enabled they are
//! prefixed with an emoji, otherwise with a plain bracketed tag.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;

use crate::mirror::SyncAction;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `--color=always` wins over `NO_COLOR`, `--color=never` always turns
    /// colors off, and anything else falls back to environment detection.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }

    /// Status line printed before a repository is cloned or pulled.
    pub fn action_line(&self, action: &SyncAction) -> String {
        let marker = if action.is_clone() {
            emoji(self, "📥", "[CLONE]")
        } else {
            emoji(self, "🔄", "[PULL]")
        };
        format!("{} {}", marker, action)
    }

    /// Line announcing how many repositories were listed.
    pub fn found_line(&self, count: usize) -> String {
        format!(
            "{} Found {} {}. Starting download or update...",
            emoji(self, "📦", "[LIST]"),
            count,
            if count == 1 {
                "repository"
            } else {
                "repositories"
            }
        )
    }

    /// Banner printed once every repository has been synchronized.
    pub fn success_banner(&self) -> String {
        format!(
            "{} All repositories cloned/updated successfully.",
            emoji(self, "✅", "[DONE]")
        )
    }
}

/// Returns `emoji_str` when colors are enabled and `plain` otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}
