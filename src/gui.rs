use glam::Vec3;

/// Widget surface the path editor draws into. Each call renders one widget
/// for the current frame and reports whether its bound value changed this
/// call. Implemented for egui below; tests drive the panel with a scripted
/// surface instead.
pub trait Gui {
    fn button(&mut self, label: &str) -> bool;
    fn checkbox(&mut self, label: &str, value: &mut bool) -> bool;
    fn float_var(&mut self, label: &str, value: &mut f32, min: f32, max: f32, step: f32) -> bool;
    fn float3_var(&mut self, label: &str, value: &mut Vec3, min: f32, max: f32, step: f32) -> bool;
    fn int_var(&mut self, label: &str, value: &mut usize, min: usize, max: usize) -> bool;
    /// Bounded text editor; commits beyond `capacity` bytes are truncated.
    fn text_box(&mut self, label: &str, text: &mut String, capacity: usize) -> bool;
    fn separator(&mut self);
    /// Attaches a hover tooltip to the most recently drawn widget.
    fn tooltip(&mut self, text: &str);
}

/// Truncates to at most `capacity` bytes without splitting a UTF-8 char.
pub(crate) fn truncate_to_capacity(text: &mut String, capacity: usize) {
    if text.len() <= capacity {
        return;
    }
    let mut end = capacity;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}

#[cfg(feature = "editor")]
pub use egui_surface::EguiGui;

#[cfg(feature = "editor")]
mod egui_surface {
    use super::{truncate_to_capacity, Gui};
    use glam::Vec3;

    /// [`Gui`] implementation over an egui `Ui`.
    pub struct EguiGui<'a> {
        ui: &'a mut egui::Ui,
        last_response: Option<egui::Response>,
    }

    impl<'a> EguiGui<'a> {
        pub fn new(ui: &'a mut egui::Ui) -> Self {
            Self { ui, last_response: None }
        }

        fn drag_value(ui: &mut egui::Ui, value: &mut f32, min: f32, max: f32, step: f32) -> egui::Response {
            ui.add(egui::DragValue::new(value).speed(step.max(0.001)).range(min..=max))
        }
    }

    impl Gui for EguiGui<'_> {
        fn button(&mut self, label: &str) -> bool {
            let response = self.ui.button(label);
            let clicked = response.clicked();
            self.last_response = Some(response);
            clicked
        }

        fn checkbox(&mut self, label: &str, value: &mut bool) -> bool {
            let response = self.ui.checkbox(value, label);
            let changed = response.changed();
            self.last_response = Some(response);
            changed
        }

        fn float_var(&mut self, label: &str, value: &mut f32, min: f32, max: f32, step: f32) -> bool {
            let mut changed = false;
            let inner = self.ui.horizontal(|ui| {
                ui.label(label);
                changed = Self::drag_value(ui, value, min, max, step).changed();
            });
            self.last_response = Some(inner.response);
            changed
        }

        fn float3_var(&mut self, label: &str, value: &mut Vec3, min: f32, max: f32, step: f32) -> bool {
            let mut changed = false;
            let inner = self.ui.horizontal(|ui| {
                ui.label(label);
                changed |= Self::drag_value(ui, &mut value.x, min, max, step).changed();
                changed |= Self::drag_value(ui, &mut value.y, min, max, step).changed();
                changed |= Self::drag_value(ui, &mut value.z, min, max, step).changed();
            });
            self.last_response = Some(inner.response);
            changed
        }

        fn int_var(&mut self, label: &str, value: &mut usize, min: usize, max: usize) -> bool {
            let mut changed = false;
            let inner = self.ui.horizontal(|ui| {
                ui.label(label);
                changed = ui.add(egui::DragValue::new(value).range(min..=max)).changed();
            });
            self.last_response = Some(inner.response);
            changed
        }

        fn text_box(&mut self, label: &str, text: &mut String, capacity: usize) -> bool {
            let mut changed = false;
            let inner = self.ui.horizontal(|ui| {
                ui.label(label);
                changed = ui.text_edit_singleline(text).changed();
            });
            if changed {
                truncate_to_capacity(text, capacity);
            }
            self.last_response = Some(inner.response);
            changed
        }

        fn separator(&mut self) {
            self.ui.separator();
            self.last_response = None;
        }

        fn tooltip(&mut self, text: &str) {
            if let Some(response) = self.last_response.take() {
                response.on_hover_text(text.to_string());
            }
        }
    }
}
