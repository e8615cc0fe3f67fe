//! Light and dark palettes for the search TUI.
//!
//! The theme flag in `AppState` picks one of the two palettes; every draw
//! call takes its colours from the palette it is handed, never from globals.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub accent: Color,
    pub primary: Color,
    pub secondary: Color,
    pub muted: Color,
    pub separator: Color,
    pub selection_bg: Color,
    pub panel_border: Color,
    pub panel_border_focused: Color,
    pub input_bg: Color,
    pub input_fg: Color,
    pub badge: Color,
    pub score: Color,
    pub toast_info: Color,
    pub toast_success: Color,
    pub toast_error: Color,
}

pub const DARK: Palette = Palette {
    bg: Color::Rgb(18, 18, 18),
    accent: Color::Rgb(255, 95, 95),
    primary: Color::Rgb(210, 210, 225),
    secondary: Color::Rgb(115, 115, 138),
    muted: Color::Rgb(72, 72, 88),
    separator: Color::Rgb(40, 40, 52),
    selection_bg: Color::Rgb(28, 28, 40),
    panel_border: Color::Rgb(40, 40, 52),
    panel_border_focused: Color::Rgb(120, 100, 200), // vibrant purple
    input_bg: Color::Rgb(20, 20, 32),
    input_fg: Color::Rgb(255, 200, 80),
    badge: Color::Rgb(80, 140, 200),
    score: Color::Rgb(100, 160, 130),
    toast_info: Color::Rgb(80, 160, 220),
    toast_success: Color::Rgb(80, 200, 120),
    toast_error: Color::Rgb(255, 95, 95),
};

pub const LIGHT: Palette = Palette {
    bg: Color::Rgb(248, 248, 250),
    accent: Color::Rgb(200, 60, 60),
    primary: Color::Rgb(30, 30, 40),
    secondary: Color::Rgb(90, 90, 110),
    muted: Color::Rgb(150, 150, 165),
    separator: Color::Rgb(215, 215, 225),
    selection_bg: Color::Rgb(225, 225, 240),
    panel_border: Color::Rgb(200, 200, 212),
    panel_border_focused: Color::Rgb(100, 80, 190),
    input_bg: Color::Rgb(236, 236, 244),
    input_fg: Color::Rgb(120, 70, 0),
    badge: Color::Rgb(40, 100, 170),
    score: Color::Rgb(40, 120, 80),
    toast_info: Color::Rgb(30, 110, 180),
    toast_success: Color::Rgb(30, 140, 70),
    toast_error: Color::Rgb(200, 50, 50),
};

pub fn palette(dark_mode: bool) -> &'static Palette {
    if dark_mode {
        &DARK
    } else {
        &LIGHT
    }
}

impl Palette {
    pub fn style_default(&self) -> Style {
        Style::default().fg(self.primary).bg(self.bg)
    }

    pub fn style_secondary(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn style_muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn style_accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn style_selected(&self) -> Style {
        Style::default().bg(self.selection_bg).fg(self.primary)
    }

    pub fn style_focused_border(&self) -> Style {
        Style::default().fg(self.panel_border_focused)
    }

    pub fn style_unfocused_border(&self) -> Style {
        Style::default().fg(self.panel_border)
    }

    pub fn style_input(&self) -> Style {
        Style::default().fg(self.input_fg).bg(self.input_bg)
    }

    pub fn style_title(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }
}
