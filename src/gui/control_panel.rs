//! Control Panel Widget
//! Left side panel with the volume range selectors and the table filters.

use crate::data::{CategorySelection, VolumeCatalog};
use egui::{Color32, ComboBox, RichText};
use std::collections::BTreeSet;

const LABEL_WIDTH: f32 = 95.0;
const COMBO_WIDTH: f32 = 190.0;

/// Left side control panel owning every user input of a render pass.
pub struct ControlPanel {
    pub start_volume: u32,
    pub end_volume: u32,
    /// Values currently ticked in the table multiselects.
    pub selection: CategorySelection,
    /// Values present in the selected range (the multiselect options).
    pub options: CategorySelection,
}

impl ControlPanel {
    pub fn new(start_volume: u32, end_volume: u32) -> Self {
        Self {
            start_volume,
            end_volume,
            selection: CategorySelection::default(),
            options: CategorySelection::default(),
        }
    }

    /// New range, new options: everything selected again.
    pub fn reset_selection(&mut self, options: CategorySelection) {
        self.selection = options.clone();
        self.options = options;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, catalog: &VolumeCatalog) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📡 Radar Lens")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Technology Radar Analysis")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Volume Range Section =====
        ui.label(RichText::new("📅 Volume Range Selection").size(14.0).strong());
        ui.add_space(8.0);

        let start_changed = volume_combo(
            ui,
            "start_volume",
            "Start Volume:",
            &mut self.start_volume,
            catalog,
        );
        ui.add_space(5.0);
        let end_changed = volume_combo(ui, "end_volume", "End Volume:", &mut self.end_volume, catalog);

        if start_changed || end_changed {
            action = ControlPanelAction::RangeChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Table Filter Section =====
        ui.label(RichText::new("🔎 Table Filters").size(14.0).strong());
        ui.add_space(5.0);

        let mut selection_changed = false;
        selection_changed |= multiselect(
            ui,
            "Select Quadrants",
            &self.options.quadrants,
            &mut self.selection.quadrants,
            |q| q.clone(),
        );
        selection_changed |= multiselect(
            ui,
            "Select Rings",
            &self.options.rings,
            &mut self.selection.rings,
            |r| r.clone(),
        );
        selection_changed |= multiselect(
            ui,
            "Select New Technologies",
            &self.options.novelty,
            &mut self.selection.novelty,
            |&is_new| (if is_new { "New" } else { "Existing" }).to_string(),
        );

        if selection_changed && action == ControlPanelAction::None {
            action = ControlPanelAction::SelectionChanged;
        }

        action
    }
}

/// Labelled volume selector; returns true when the value changed.
fn volume_combo(
    ui: &mut egui::Ui,
    id: &str,
    label: &str,
    value: &mut u32,
    catalog: &VolumeCatalog,
) -> bool {
    let mut changed = false;

    ui.horizontal(|ui| {
        ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new(label));
        ComboBox::from_id_salt(id)
            .width(COMBO_WIDTH)
            .selected_text(catalog.label(*value))
            .show_ui(ui, |ui| {
                for info in catalog.volumes() {
                    if ui
                        .selectable_label(*value == info.volume_id, info.label())
                        .clicked()
                        && *value != info.volume_id
                    {
                        *value = info.volume_id;
                        changed = true;
                    }
                }
            });
    });

    changed
}

/// Checkbox list over `options`; returns true when `selected` changed.
fn multiselect<T: Ord + Clone>(
    ui: &mut egui::Ui,
    title: &str,
    options: &BTreeSet<T>,
    selected: &mut BTreeSet<T>,
    label: impl Fn(&T) -> String,
) -> bool {
    let mut changed = false;

    egui::CollapsingHeader::new(title)
        .default_open(true)
        .show(ui, |ui| {
            for option in options {
                let mut checked = selected.contains(option);
                if ui.checkbox(&mut checked, label(option)).changed() {
                    if checked {
                        selected.insert(option.clone());
                    } else {
                        selected.remove(option);
                    }
                    changed = true;
                }
            }

            ui.horizontal(|ui| {
                if ui.small_button("Select All").clicked() {
                    *selected = options.clone();
                    changed = true;
                }
                if ui.small_button("Clear All").clicked() {
                    selected.clear();
                    changed = true;
                }
            });
        });

    changed
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    /// Start or end volume changed: rebuild the whole report.
    RangeChanged,
    /// Only the table multiselects changed.
    SelectionChanged,
}
