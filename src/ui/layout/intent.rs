use crate::ui::layout::state::Theme;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone, Copy)]
pub enum LayoutIntent {
    ToggleSidebar,
    SetSidebarOpen(bool),
    SetTheme(Theme),
}

impl Intent for LayoutIntent {}
