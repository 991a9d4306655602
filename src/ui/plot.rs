use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot};

use crate::color::LabelColors;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Class distribution (side panel)
// ---------------------------------------------------------------------------

/// Bar chart of records per localization site.
pub fn class_distribution(ui: &mut Ui, dataset: &Dataset, colors: &LabelColors) {
    let bars: Vec<Bar> = dataset
        .label_counts
        .iter()
        .enumerate()
        .map(|(i, (label, &count))| {
            Bar::new(i as f64, count as f64)
                .name(label)
                .fill(colors.color_for(label))
                .width(0.8)
        })
        .collect();

    let labels: Vec<String> = dataset.label_counts.keys().cloned().collect();

    Plot::new("class_distribution")
        .height(180.0)
        .legend(egui_plot::Legend::default())
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show_y(true)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("records"));
        });
}
