//! Persisted application settings.
//!
//! Stored as a plain `key=value` file in the platform config directory.
//! Unknown keys and malformed values are skipped, so older or hand-edited
//! files load as far as they parse and fall back to defaults for the rest.

use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

/// Application settings that persist across sessions.
#[derive(Clone, Debug)]
pub struct AppSettings {
    pub theme_mode: ThemeMode,
    /// Pen color as RGBA.
    pub ink_color: [u8; 4],
    /// Pen width in surface pixels.
    pub pen_width: f32,
    /// Language code (e.g. "en", "es"). Empty string = auto-detect.
    pub language: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::Light,
            ink_color: [0, 0, 0, 255],
            pen_width: 2.0,
            language: String::new(),
        }
    }
}

impl AppSettings {
    /// Path to the settings file.
    /// On Linux:   ~/.config/signpad/signpad_settings.cfg  (XDG_CONFIG_HOME respected)
    /// On Windows: %APPDATA%\SignPad\signpad_settings.cfg
    /// On macOS:   ~/Library/Application Support/SignPad/signpad_settings.cfg
    /// Fallback:   same directory as the executable.
    pub(crate) fn settings_path() -> Option<PathBuf> {
        #[cfg(target_os = "linux")]
        {
            let config_dir = std::env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    let home = std::env::var("HOME").unwrap_or_else(|_| "~".to_string());
                    PathBuf::from(home).join(".config")
                })
                .join("signpad");
            let _ = std::fs::create_dir_all(&config_dir);
            return Some(config_dir.join("signpad_settings.cfg"));
        }
        #[cfg(target_os = "windows")]
        {
            // %APPDATA% keeps the settings in the user profile instead of a
            // possibly world-writable EXE directory.
            let appdata = std::env::var("APPDATA")
                .or_else(|_| std::env::var("USERPROFILE"))
                .unwrap_or_else(|_| {
                    std::env::current_exe()
                        .ok()
                        .and_then(|p| p.parent().map(|d| d.to_string_lossy().into_owned()))
                        .unwrap_or_default()
                });
            let config_dir = PathBuf::from(appdata).join("SignPad");
            let _ = std::fs::create_dir_all(&config_dir);
            return Some(config_dir.join("signpad_settings.cfg"));
        }
        #[cfg(target_os = "macos")]
        {
            let home = std::env::var("HOME").unwrap_or_else(|_| "~".to_string());
            let config_dir = PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("SignPad");
            let _ = std::fs::create_dir_all(&config_dir);
            return Some(config_dir.join("signpad_settings.cfg"));
        }
        #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
        {
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|d| d.join("signpad_settings.cfg")))
        }
    }

    /// Serialize an RGBA color as "r,g,b,a"
    fn color_to_str(c: [u8; 4]) -> String {
        format!("{},{},{},{}", c[0], c[1], c[2], c[3])
    }

    /// Parse an RGBA color from "r,g,b,a"
    fn str_to_color(s: &str) -> Option<[u8; 4]> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() == 4 {
            let r = parts[0].trim().parse::<u8>().ok()?;
            let g = parts[1].trim().parse::<u8>().ok()?;
            let b = parts[2].trim().parse::<u8>().ok()?;
            let a = parts[3].trim().parse::<u8>().ok()?;
            Some([r, g, b, a])
        } else {
            None
        }
    }

    /// Save settings to disk. Write errors are ignored; settings are
    /// best-effort persistence, never a reason to interrupt the user.
    pub fn save(&self) {
        let Some(path) = Self::settings_path() else {
            return;
        };
        let mode_str = match self.theme_mode {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        };
        let content = format!(
            "theme_mode={mode_str}\n\
             ink_color={}\n\
             pen_width={}\n\
             language={}\n",
            Self::color_to_str(self.ink_color),
            self.pen_width,
            self.language,
        );
        let _ = std::fs::write(path, content);
    }

    /// Load settings from disk (returns default if file missing or corrupt)
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        Self::parse(&content)
    }

    fn parse(content: &str) -> Self {
        let mut s = Self::default();
        for line in content.lines() {
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let val = val.trim();
            match key {
                "theme_mode" => {
                    s.theme_mode = match val {
                        "dark" => ThemeMode::Dark,
                        _ => ThemeMode::Light,
                    };
                }
                "ink_color" => {
                    if let Some(c) = Self::str_to_color(val) {
                        s.ink_color = c;
                    }
                }
                "pen_width" => {
                    s.pen_width = val.parse().map(|w: f32| w.clamp(0.5, 64.0)).unwrap_or(2.0);
                }
                "language" => {
                    s.language = val.to_string();
                }
                _ => {}
            }
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_string_round_trips() {
        let c = [12, 34, 56, 200];
        assert_eq!(AppSettings::str_to_color(&AppSettings::color_to_str(c)), Some(c));
        assert_eq!(AppSettings::str_to_color("1,2,3"), None);
        assert_eq!(AppSettings::str_to_color("1,2,3,999"), None);
    }

    /// Corrupt lines fall back to defaults instead of failing the load.
    #[test]
    fn parse_tolerates_junk_lines() {
        let s = AppSettings::parse(
            "theme_mode=dark\nink_color=garbage\npen_width=4.5\nnot a line\nmystery=1\n",
        );
        assert_eq!(s.theme_mode, ThemeMode::Dark);
        assert_eq!(s.ink_color, [0, 0, 0, 255]);
        assert_eq!(s.pen_width, 4.5);
        assert!(s.language.is_empty());
    }

    #[test]
    fn pen_width_is_clamped_to_sane_range() {
        assert_eq!(AppSettings::parse("pen_width=0.01").pen_width, 0.5);
        assert_eq!(AppSettings::parse("pen_width=500").pen_width, 64.0);
        assert_eq!(AppSettings::parse("pen_width=oops").pen_width, 2.0);
    }
}
