pub mod app;
pub mod chart;
pub mod report;
pub mod statusbar;

pub use app::run;
pub use chart::Chart;
pub use report::render_report;
pub use statusbar::StatusBar;
