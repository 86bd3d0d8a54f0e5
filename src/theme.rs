use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

/// All semantic color slots for the splitdiff UI.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,

    /// Pane content and menu body text.
    pub text: Color,
    /// Menu choices.
    pub item: Color,
    pub title: Color,
    /// Pane labels and the END sentinel.
    pub info: Color,
    pub error: Color,
    /// Rows the highlight rule marks as equal.
    pub matched: Color,
    /// Label of the pane that scrolls in independent mode.
    pub accent: Color,
}

pub const THEME_NAMES: &[&str] = &["classic", "one-dark", "mono"];

impl Theme {
    /// Look up a built-in theme. Unknown names fall back to `classic`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "one-dark" => one_dark(),
            "mono" => mono(),
            _ => classic(),
        }
    }

    pub fn is_known(name: &str) -> bool {
        THEME_NAMES.contains(&name)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn item_style(&self) -> Style {
        Style::default().fg(self.item)
    }

    pub fn selected_item_style(&self) -> Style {
        self.item_style().add_modifier(Modifier::BOLD)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info).add_modifier(Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn matched_style(&self) -> Style {
        Style::default().fg(self.matched).add_modifier(Modifier::BOLD)
    }

    pub fn accent_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }
}

impl Default for Theme {
    fn default() -> Self {
        classic()
    }
}

pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

// ── Serde-compatible override struct ──────────────────────────────

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ThemeOverrides {
    pub text: Option<String>,
    pub item: Option<String>,
    pub title: Option<String>,
    pub info: Option<String>,
    pub error: Option<String>,
    pub matched: Option<String>,
    pub accent: Option<String>,
}

/// Apply `#rrggbb` overrides. Malformed values are logged and skipped.
pub fn apply_overrides(theme: &mut Theme, overrides: &ThemeOverrides) {
    macro_rules! apply {
        ($field:ident) => {
            if let Some(ref hex) = overrides.$field {
                match parse_hex_color(hex) {
                    Some(c) => theme.$field = c,
                    None => tracing::warn!(slot = stringify!($field), value = %hex, "ignoring bad color"),
                }
            }
        };
    }
    apply!(text);
    apply!(item);
    apply!(title);
    apply!(info);
    apply!(error);
    apply!(matched);
    apply!(accent);
}

// ── Built-in themes ──────────────────────────────────────────────

/// Green text, white items and red highlights on the terminal background.
fn classic() -> Theme {
    Theme {
        name: "classic".to_string(),
        text: Color::Green,
        item: Color::White,
        title: Color::White,
        info: Color::White,
        error: Color::Red,
        matched: Color::Red,
        accent: Color::Yellow,
    }
}

fn one_dark() -> Theme {
    Theme {
        name: "one-dark".to_string(),
        text: Color::Rgb(171, 178, 191),
        item: Color::Rgb(97, 175, 239),
        title: Color::Rgb(229, 192, 123),
        info: Color::Rgb(86, 182, 194),
        error: Color::Rgb(224, 108, 117),
        matched: Color::Rgb(152, 195, 121),
        accent: Color::Rgb(198, 120, 221),
    }
}

fn mono() -> Theme {
    Theme {
        name: "mono".to_string(),
        text: Color::Reset,
        item: Color::Reset,
        title: Color::Reset,
        info: Color::Reset,
        error: Color::Reset,
        matched: Color::Reset,
        accent: Color::Reset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(parse_hex_color("00ff00"), Some(Color::Rgb(0, 255, 0)));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_unknown_theme_falls_back_to_classic() {
        assert_eq!(Theme::from_name("nope").name, "classic");
        assert!(!Theme::is_known("nope"));
        for name in THEME_NAMES {
            assert_eq!(Theme::from_name(name).name, *name);
        }
    }

    #[test]
    fn test_overrides_replace_only_given_slots() {
        let mut theme = Theme::from_name("classic");
        let overrides = ThemeOverrides {
            matched: Some("#010203".into()),
            error: Some("not-a-color".into()),
            ..Default::default()
        };
        apply_overrides(&mut theme, &overrides);
        assert_eq!(theme.matched, Color::Rgb(1, 2, 3));
        assert_eq!(theme.error, Color::Red);
        assert_eq!(theme.text, Color::Green);
    }

    #[test]
    fn test_emphasis_styles_are_bold() {
        let theme = Theme::default();
        for style in [
            theme.title_style(),
            theme.info_style(),
            theme.error_style(),
            theme.matched_style(),
            theme.selected_item_style(),
        ] {
            assert!(style.add_modifier.contains(Modifier::BOLD));
        }
        assert!(!theme.text_style().add_modifier.contains(Modifier::BOLD));
    }
}
