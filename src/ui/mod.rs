/// UI layer: panel layout, filter widgets, and egui_plot chart renderings.
pub mod charts;
pub mod panels;
