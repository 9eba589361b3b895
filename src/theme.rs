use iced::{Background, Border, Color};

/// How the theme is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
    /// Follow the desktop color scheme at startup.
    Auto,
}

impl ThemeMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            "auto" => Some(ThemeMode::Auto),
            _ => None,
        }
    }
}

/// All colors and font sizes used by the viewer chrome, derived from the active theme.
///
/// Grid cells take their colors from the symbol catalog, not from here.
pub struct ThemeColors {
    pub is_dark: bool,
    // Text
    pub text: Color,
    pub muted: Color,
    pub hover_text: Color,
    // Backgrounds
    pub window_bg: Color,
    pub panel_bg: Color,
    pub hover: Color,
    pub grid_bg: Color,
    // Font sizes (logical pixels)
    pub title_size: f32,
    pub body_text: f32,
    pub small_text: f32,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            is_dark: true,
            text: Color {
                r: 1.0,
                g: 1.0,
                b: 1.0,
                a: 0.85,
            },
            muted: Color {
                r: 1.0,
                g: 1.0,
                b: 1.0,
                a: 0.4,
            },
            hover_text: Color {
                r: 1.0,
                g: 0.78,
                b: 0.0,
                a: 1.0,
            },
            window_bg: Color {
                r: 0.05,
                g: 0.05,
                b: 0.08,
                a: 1.0,
            },
            panel_bg: Color {
                r: 0.08,
                g: 0.08,
                b: 0.12,
                a: 1.0,
            },
            hover: Color {
                r: 0.12,
                g: 0.12,
                b: 0.18,
                a: 1.0,
            },
            grid_bg: Color {
                r: 0.15,
                g: 0.15,
                b: 0.22,
                a: 1.0,
            },
            title_size: 20.0,
            body_text: 13.0,
            small_text: 10.0,
        }
    }

    pub fn light() -> Self {
        Self {
            is_dark: false,
            text: Color {
                r: 0.08,
                g: 0.08,
                b: 0.08,
                a: 0.9,
            },
            muted: Color {
                r: 0.35,
                g: 0.35,
                b: 0.35,
                a: 0.8,
            },
            hover_text: Color {
                r: 0.6,
                g: 0.35,
                b: 0.0,
                a: 1.0,
            },
            window_bg: Color {
                r: 0.95,
                g: 0.95,
                b: 0.97,
                a: 1.0,
            },
            panel_bg: Color {
                r: 0.90,
                g: 0.90,
                b: 0.94,
                a: 1.0,
            },
            hover: Color {
                r: 0.80,
                g: 0.80,
                b: 0.88,
                a: 1.0,
            },
            grid_bg: Color {
                r: 0.75,
                g: 0.75,
                b: 0.85,
                a: 1.0,
            },
            title_size: 20.0,
            body_text: 13.0,
            small_text: 10.0,
        }
    }

    pub fn panel_style(&self) -> impl Fn(&iced::Theme) -> iced::widget::container::Style {
        let color = self.panel_bg;
        move |_theme: &iced::Theme| iced::widget::container::Style {
            background: Some(Background::Color(color)),
            border: Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn hover_style(&self) -> impl Fn(&iced::Theme) -> iced::widget::container::Style {
        let color = self.hover;
        move |_theme: &iced::Theme| iced::widget::container::Style {
            background: Some(Background::Color(color)),
            border: Border {
                radius: 4.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn window_style(&self) -> impl Fn(&iced::Theme) -> iced::widget::container::Style {
        let color = self.window_bg;
        move |_theme: &iced::Theme| iced::widget::container::Style {
            background: Some(Background::Color(color)),
            ..Default::default()
        }
    }

    pub fn grid_style(&self) -> impl Fn(&iced::Theme) -> iced::widget::container::Style {
        let color = self.grid_bg;
        move |_theme: &iced::Theme| iced::widget::container::Style {
            background: Some(Background::Color(color)),
            ..Default::default()
        }
    }

    /// A grid square filled with `fill`, outlined when hovered.
    pub fn cell_style(
        &self,
        fill: Color,
        hovered: bool,
    ) -> impl Fn(&iced::Theme) -> iced::widget::container::Style {
        let outline = if hovered { self.hover_text } else { self.grid_bg };
        let width = if hovered { 2.0 } else { 0.5 };
        move |_theme: &iced::Theme| iced::widget::container::Style {
            background: Some(Background::Color(fill)),
            border: Border {
                color: outline,
                width,
                radius: 0.0.into(),
            },
            ..Default::default()
        }
    }

    /// Text color that stays readable on top of `fill`.
    pub fn ink_on(fill: Color) -> Color {
        let luminance = 0.2126 * fill.r + 0.7152 * fill.g + 0.0722 * fill.b;
        if luminance > 0.5 { Color::BLACK } else { Color::WHITE }
    }
}

/// Detect system dark mode via the desktop color-scheme setting.
/// Spawns CLI tools synchronously; call once at startup.
pub fn detect_system_dark() -> bool {
    // 1. gsettings color-scheme (GNOME 42+)
    if let Ok(output) = std::process::Command::new("gsettings")
        .args(["get", "org.gnome.desktop.interface", "color-scheme"])
        .output()
    {
        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.contains("prefer-dark") {
            return true;
        }
        if stdout.contains("prefer-light") || stdout.contains("default") {
            return false;
        }
    }

    // 2. GTK_THEME env var (e.g. "Adwaita:dark")
    if let Ok(val) = std::env::var("GTK_THEME") {
        return val.to_lowercase().contains("dark");
    }

    // 3. All detection failed, default to dark
    true
}

/// Resolve the ThemeColors for a given mode.
pub fn resolve(mode: ThemeMode) -> ThemeColors {
    match mode {
        ThemeMode::Dark => ThemeColors::dark(),
        ThemeMode::Light => ThemeColors::light(),
        ThemeMode::Auto => {
            if detect_system_dark() {
                ThemeColors::dark()
            } else {
                ThemeColors::light()
            }
        }
    }
}
