use ratatui::style::{Color, Modifier, Style};

#[derive(Clone, Debug)]
pub struct Theme {
    pub fg: Color,
    pub primary: Color,
    pub accent: Color,
    pub muted: Color,
    pub selection: Color,
    pub secret: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            primary: Color::Blue,
            accent: Color::Red,
            muted: Color::DarkGray,
            selection: Color::Cyan,
            secret: Color::Yellow,
        }
    }
}

impl Theme {
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }
    pub fn normal_style(&self) -> Style { Style::default().fg(self.fg) }
    pub fn muted_style(&self) -> Style { Style::default().fg(self.muted) }
    pub fn selection_style(&self) -> Style { Style::default().fg(self.selection).add_modifier(Modifier::BOLD) }
    pub fn row_highlight_style(&self) -> Style { Style::default().add_modifier(Modifier::REVERSED) }
    pub fn secret_style(&self) -> Style { Style::default().fg(self.secret) }
    pub fn toast_style(&self) -> Style { Style::default().fg(self.accent).add_modifier(Modifier::BOLD) }
}
