pub mod header;
pub mod help_overlay;
pub mod results_panel;
pub mod search_bar;
