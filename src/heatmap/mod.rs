mod grid;
mod intensity;
mod summary;
mod view;
mod widget;
pub(crate) use self::view::HeatmapView;
pub(crate) use self::widget::Heatmap;
