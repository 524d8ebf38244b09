pub mod dashboard;
pub mod mode_tabs;
pub mod popup;
pub mod progress_bar;
pub mod stats_bar;
pub mod typing_area;
