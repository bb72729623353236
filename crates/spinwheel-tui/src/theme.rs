use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use tracing::warn;

/// Styles for every piece of the wheel screen.
#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub border: Style,
    pub normal: Style,
    pub dimmed: Style,
    pub error: Style,
    pub winner: Style,
    pub status_bar: Style,
    pub popup_border: Style,
    pub popup_title: Style,
    pub button: Style,
    pub button_disabled: Style,
    pub pointer: Style,
    pub segment_label: Style,
    pub segment_label_alternate: Style,
    pub special_prize: Style,
    /// Outer ring and segment dividers.
    pub wheel_rim: Color,
    /// Fill for segments flagged `alternate_color`.
    pub wheel_alternate: Color,
}

impl Theme {
    /// Catppuccin Mocha.
    pub fn dark() -> Self {
        let base = Color::Rgb(30, 30, 46); // #1e1e2e
        let surface0 = Color::Rgb(49, 50, 68); // #313244
        let surface2 = Color::Rgb(88, 91, 112); // #585b70
        let overlay0 = Color::Rgb(108, 112, 134); // #6c7086
        let subtext0 = Color::Rgb(166, 173, 200); // #a6adc8
        let text = Color::Rgb(205, 214, 244); // #cdd6f4
        let blue = Color::Rgb(137, 180, 250); // #89b4fa
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let red = Color::Rgb(243, 139, 168); // #f38ba8
        let peach = Color::Rgb(250, 179, 135); // #fab387
        let yellow = Color::Rgb(249, 226, 175); // #f9e2af
        let mauve = Color::Rgb(203, 166, 247); // #cba6f7

        Self {
            title: Style::default().fg(lavender).add_modifier(Modifier::BOLD),
            border: Style::default().fg(surface2),
            normal: Style::default().fg(text),
            dimmed: Style::default().fg(overlay0),
            error: Style::default().fg(red).add_modifier(Modifier::BOLD),
            winner: Style::default().fg(green).add_modifier(Modifier::BOLD),
            status_bar: Style::default().fg(subtext0).bg(surface0),
            popup_border: Style::default().fg(mauve),
            popup_title: Style::default().fg(mauve).add_modifier(Modifier::BOLD),
            button: Style::default()
                .fg(base)
                .bg(blue)
                .add_modifier(Modifier::BOLD),
            button_disabled: Style::default().fg(subtext0).bg(surface2),
            pointer: Style::default().fg(peach).add_modifier(Modifier::BOLD),
            segment_label: Style::default().fg(text).add_modifier(Modifier::BOLD),
            segment_label_alternate: Style::default()
                .fg(base)
                .bg(text)
                .add_modifier(Modifier::BOLD),
            special_prize: Style::default().fg(yellow).add_modifier(Modifier::BOLD),
            wheel_rim: overlay0,
            wheel_alternate: text,
        }
    }

    /// Light theme for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::DarkGray),
            normal: Style::default().fg(Color::Black),
            dimmed: Style::default().fg(Color::Gray),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            winner: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            status_bar: Style::default().fg(Color::Black).bg(Color::Gray),
            popup_border: Style::default().fg(Color::Blue),
            popup_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            button: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            button_disabled: Style::default().fg(Color::White).bg(Color::Gray),
            pointer: Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
            segment_label: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            segment_label_alternate: Style::default()
                .fg(Color::White)
                .bg(Color::Black)
                .add_modifier(Modifier::BOLD),
            special_prize: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            wheel_rim: Color::DarkGray,
            wheel_alternate: Color::Black,
        }
    }

    /// Nord theme.
    pub fn nord() -> Self {
        let polar0 = Color::Rgb(46, 52, 64);
        let polar3 = Color::Rgb(76, 86, 106);
        let snow0 = Color::Rgb(216, 222, 233);
        let snow2 = Color::Rgb(236, 239, 244);
        let frost0 = Color::Rgb(143, 188, 187);
        let frost2 = Color::Rgb(129, 161, 193);
        let frost3 = Color::Rgb(94, 129, 172);
        let aurora_red = Color::Rgb(191, 97, 106);
        let aurora_orange = Color::Rgb(208, 135, 112);
        let aurora_yellow = Color::Rgb(235, 203, 139);
        let aurora_green = Color::Rgb(163, 190, 140);

        Self {
            title: Style::default().fg(frost2).add_modifier(Modifier::BOLD),
            border: Style::default().fg(frost0),
            normal: Style::default().fg(snow0),
            dimmed: Style::default().fg(polar3),
            error: Style::default().fg(aurora_red).add_modifier(Modifier::BOLD),
            winner: Style::default()
                .fg(aurora_green)
                .add_modifier(Modifier::BOLD),
            status_bar: Style::default().fg(snow2).bg(polar0),
            popup_border: Style::default().fg(aurora_yellow),
            popup_title: Style::default()
                .fg(aurora_yellow)
                .add_modifier(Modifier::BOLD),
            button: Style::default()
                .fg(polar0)
                .bg(frost3)
                .add_modifier(Modifier::BOLD),
            button_disabled: Style::default().fg(snow0).bg(polar3),
            pointer: Style::default()
                .fg(aurora_orange)
                .add_modifier(Modifier::BOLD),
            segment_label: Style::default().fg(snow2).add_modifier(Modifier::BOLD),
            segment_label_alternate: Style::default()
                .fg(polar0)
                .bg(frost0)
                .add_modifier(Modifier::BOLD),
            special_prize: Style::default()
                .fg(aurora_yellow)
                .add_modifier(Modifier::BOLD),
            wheel_rim: frost2,
            wheel_alternate: frost0,
        }
    }

    /// Load a theme by name. Unknown names are looked up as
    /// `<config_dir>/spinwheel/themes/<name>.toml`.
    pub fn load(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            "nord" => Self::nord(),
            _ => {
                if let Some(config_dir) = dirs::config_dir() {
                    let theme_path = config_dir
                        .join("spinwheel")
                        .join("themes")
                        .join(format!("{}.toml", name));
                    if let Ok(content) = std::fs::read_to_string(&theme_path) {
                        match Self::from_toml(&content) {
                            Ok(theme) => return theme,
                            Err(e) => warn!("Failed to parse theme file {:?}: {}", theme_path, e),
                        }
                    }
                }
                warn!("Unknown theme '{}', using dark", name);
                Self::dark()
            }
        }
    }

    /// Build a theme from a `[colors]` table. Unset entries fall back to the
    /// dark theme.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let def: ThemeDefinition = toml::from_str(content)?;
        Ok(def.colors.apply(Self::dark()))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

// --- TOML deserialization types ---

#[derive(Debug, Deserialize)]
struct ThemeDefinition {
    #[serde(default)]
    colors: ThemeColors,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ThemeColors {
    title: Option<StyleDef>,
    border: Option<StyleDef>,
    normal: Option<StyleDef>,
    dimmed: Option<StyleDef>,
    error: Option<StyleDef>,
    winner: Option<StyleDef>,
    status_bar: Option<StyleDef>,
    popup_border: Option<StyleDef>,
    popup_title: Option<StyleDef>,
    button: Option<StyleDef>,
    button_disabled: Option<StyleDef>,
    pointer: Option<StyleDef>,
    segment_label: Option<StyleDef>,
    segment_label_alternate: Option<StyleDef>,
    special_prize: Option<StyleDef>,
    wheel_rim: Option<String>,
    wheel_alternate: Option<String>,
}

impl ThemeColors {
    fn apply(&self, mut theme: Theme) -> Theme {
        let styles = [
            (&self.title, &mut theme.title),
            (&self.border, &mut theme.border),
            (&self.normal, &mut theme.normal),
            (&self.dimmed, &mut theme.dimmed),
            (&self.error, &mut theme.error),
            (&self.winner, &mut theme.winner),
            (&self.status_bar, &mut theme.status_bar),
            (&self.popup_border, &mut theme.popup_border),
            (&self.popup_title, &mut theme.popup_title),
            (&self.button, &mut theme.button),
            (&self.button_disabled, &mut theme.button_disabled),
            (&self.pointer, &mut theme.pointer),
            (&self.segment_label, &mut theme.segment_label),
            (&self.segment_label_alternate, &mut theme.segment_label_alternate),
            (&self.special_prize, &mut theme.special_prize),
        ];
        for (def, slot) in styles {
            if let Some(def) = def {
                *slot = def.to_style();
            }
        }
        if let Some(ref rim) = self.wheel_rim {
            theme.wheel_rim = parse_color(rim);
        }
        if let Some(ref alternate) = self.wheel_alternate {
            theme.wheel_alternate = parse_color(alternate);
        }
        theme
    }
}

#[derive(Debug, Default, Deserialize)]
struct StyleDef {
    #[serde(default)]
    fg: Option<String>,
    #[serde(default)]
    bg: Option<String>,
    #[serde(default)]
    modifiers: Option<String>,
}

impl StyleDef {
    fn to_style(&self) -> Style {
        let mut style = Style::default();
        if let Some(ref fg) = self.fg {
            style = style.fg(parse_color(fg));
        }
        if let Some(ref bg) = self.bg {
            style = style.bg(parse_color(bg));
        }
        for m in self.modifiers.iter().flat_map(|m| m.split('|')) {
            style = match m.trim().to_uppercase().as_str() {
                "BOLD" => style.add_modifier(Modifier::BOLD),
                "ITALIC" => style.add_modifier(Modifier::ITALIC),
                "UNDERLINED" => style.add_modifier(Modifier::UNDERLINED),
                "DIM" => style.add_modifier(Modifier::DIM),
                "REVERSED" => style.add_modifier(Modifier::REVERSED),
                _ => style,
            };
        }
        style
    }
}

/// Named ANSI colors or `#RRGGBB`. Anything else becomes white.
fn parse_color(s: &str) -> Color {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "dark_gray" | "dark_grey" | "darkgray" => Color::DarkGray,
        "white" => Color::White,
        _ => {
            let hex = s.strip_prefix('#').unwrap_or(&s);
            match (
                hex.len(),
                hex.get(0..2).and_then(|h| u8::from_str_radix(h, 16).ok()),
                hex.get(2..4).and_then(|h| u8::from_str_radix(h, 16).ok()),
                hex.get(4..6).and_then(|h| u8::from_str_radix(h, 16).ok()),
            ) {
                (6, Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
                _ => Color::White,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("red"), Color::Red);
        assert_eq!(parse_color("DarkGray"), Color::DarkGray);
        assert_eq!(parse_color("#FF8000"), Color::Rgb(255, 128, 0));
        assert_eq!(parse_color("00ff00"), Color::Rgb(0, 255, 0));
        assert_eq!(parse_color("not-a-color"), Color::White);
    }

    #[test]
    fn test_load_builtin_themes() {
        assert_eq!(Theme::load("light").wheel_rim, Color::DarkGray);
        assert_eq!(Theme::load("NORD").wheel_rim, Theme::nord().wheel_rim);
        assert_eq!(Theme::load("dark").wheel_rim, Theme::dark().wheel_rim);
    }

    #[test]
    fn test_unknown_theme_falls_back_to_dark() {
        let theme = Theme::load("definitely-not-installed");
        assert_eq!(theme.wheel_alternate, Theme::dark().wheel_alternate);
    }

    #[test]
    fn test_custom_theme_overrides_only_given_fields() {
        let toml = r##"
[colors]
wheel_rim = "#102030"
winner = { fg = "yellow", modifiers = "BOLD|ITALIC" }
"##;
        let theme = Theme::from_toml(toml).unwrap();
        assert_eq!(theme.wheel_rim, Color::Rgb(16, 32, 48));
        assert_eq!(
            theme.winner,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC)
        );
        assert_eq!(theme.button, Theme::dark().button);
    }
}
