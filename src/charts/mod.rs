//! Charts module - render model and chart drawing

mod model;
mod plotter;

pub use model::{DashboardModel, EmptySelectionWarning, LanguageDetail, ScatterPoint, Selection};
pub use plotter::ChartPlotter;
