use crate::camera::Camera3D;
use crate::gui::{truncate_to_capacity, Gui};
use crate::math::{extract_yaw_pitch_roll_degrees, look_at_orientation, yaw_pitch_roll};
use crate::options::PanelOptions;
use crate::path::AnimationPath;
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;

pub const PATH_NAME_CAPACITY: usize = 1024;

const DEFAULT_FRAME_TARGET: Vec3 = Vec3::Z;
const DEFAULT_FRAME_UP: Vec3 = Vec3::Y;

pub type EditorCallback = Box<dyn FnMut()>;

/// Host notifications fired synchronously from `render`.
pub struct PathEditorCallbacks {
    /// The active keyframe's data or selection changed.
    pub frame_changed: EditorCallback,
    /// Keyframes were added, removed, or reordered.
    pub keyframe_count_changed: EditorCallback,
    /// The editor was closed.
    pub edit_complete: EditorCallback,
}

impl PathEditorCallbacks {
    /// Callbacks that do nothing, for hosts that poll the path instead.
    pub fn noop() -> Self {
        Self {
            frame_changed: Box::new(|| {}),
            keyframe_count_changed: Box::new(|| {}),
            edit_complete: Box::new(|| {}),
        }
    }
}

/// Immediate-mode editor panel for one [`AnimationPath`].
///
/// The panel holds shared handles to the host-owned path and camera, draws
/// its widgets once per UI frame through a [`Gui`] surface, and pushes edits
/// straight into the path. It owns only presentation state: the active frame
/// selection, the staged frame time, and a derived yaw/pitch/roll cache for
/// the rotation widget.
pub struct PathEditorPanel {
    path: Rc<RefCell<AnimationPath>>,
    camera: Rc<RefCell<Camera3D>>,
    callbacks: PathEditorCallbacks,
    options: PanelOptions,
    open: bool,
    active_frame: usize,
    frame_time: f32,
    preserve_rotation: bool,
    active_frame_rot_degrees: Vec3,
}

impl PathEditorPanel {
    pub fn new(
        path: Rc<RefCell<AnimationPath>>,
        camera: Rc<RefCell<Camera3D>>,
        callbacks: PathEditorCallbacks,
    ) -> Self {
        Self::with_options(path, camera, callbacks, PanelOptions::default())
    }

    pub fn with_options(
        path: Rc<RefCell<AnimationPath>>,
        camera: Rc<RefCell<Camera3D>>,
        callbacks: PathEditorCallbacks,
        options: PanelOptions,
    ) -> Self {
        let mut panel = Self {
            path,
            camera,
            callbacks,
            options,
            open: true,
            active_frame: 0,
            frame_time: 0.0,
            preserve_rotation: false,
            active_frame_rot_degrees: Vec3::ZERO,
        };
        if panel.path.borrow().key_frame_count() > 0 {
            panel.frame_time = panel.path.borrow().key_frame(0).time;
            panel.recompute_rotation_cache();
        }
        panel
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn active_frame(&self) -> usize {
        self.active_frame
    }

    pub fn staged_frame_time(&self) -> f32 {
        self.frame_time
    }

    pub fn rotation_degrees(&self) -> Vec3 {
        self.active_frame_rot_degrees
    }

    /// Transitions to Closed and fires the edit-complete notification.
    /// Closing is terminal for this panel instance.
    pub fn close(&mut self) {
        if self.open {
            self.open = false;
            (self.callbacks.edit_complete)();
        }
    }

    /// Draws one UI frame of the panel body. Call once per frame while open.
    pub fn render(&mut self, gui: &mut dyn Gui) {
        if !self.open {
            return;
        }
        if gui.button("Close Editor") {
            self.close();
            return;
        }
        gui.separator();
        self.edit_path_name(gui);
        self.edit_path_loop(gui);
        self.edit_active_frame_index(gui);
        self.add_frame(gui);
        self.remove_frame(gui);
        gui.separator();
        self.edit_frame_time(gui);
        self.update_frame_time(gui);
        gui.separator();
        self.edit_keyframe_properties(gui);
        self.move_to_camera(gui);
    }

    /// egui entry point: wraps [`render`](Self::render) in a window. The
    /// window close button behaves like the panel's own Close control.
    #[cfg(feature = "editor")]
    pub fn show_window(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }
        let mut window_open = true;
        egui::Window::new("Path Editor")
            .default_pos(egui::pos2(self.options.window_x, self.options.window_y))
            .default_size(egui::vec2(self.options.window_width, self.options.window_height))
            .open(&mut window_open)
            .show(ctx, |ui| {
                let mut gui = crate::gui::EguiGui::new(ui);
                self.render(&mut gui);
            });
        if !window_open {
            self.close();
        }
    }

    fn edit_path_name(&mut self, gui: &mut dyn Gui) {
        let mut name = self.path.borrow().name().to_string();
        truncate_to_capacity(&mut name, PATH_NAME_CAPACITY);
        if gui.text_box("Path Name", &mut name, PATH_NAME_CAPACITY) {
            self.path.borrow_mut().set_name(name);
        }
    }

    fn edit_path_loop(&mut self, gui: &mut dyn Gui) {
        let mut repeat = self.path.borrow().repeat_on();
        if gui.checkbox("Loop Path", &mut repeat) {
            self.path.borrow_mut().set_repeat(repeat);
        }
    }

    fn edit_active_frame_index(&mut self, gui: &mut dyn Gui) {
        let count = self.path.borrow().key_frame_count();
        if count == 0 {
            return;
        }
        let mut selected = self.active_frame;
        if gui.int_var("Selected Frame", &mut selected, 0, count - 1) {
            self.set_active_frame(selected);
        }
    }

    fn add_frame(&mut self, gui: &mut dyn Gui) {
        if !gui.button("Add Frame") {
            return;
        }
        let new_index = {
            let mut path = self.path.borrow_mut();
            if path.key_frame_count() > 0 {
                // New keyframe copies the pose of the selected one.
                let frame = *path.key_frame(self.active_frame);
                path.add_key_frame(self.frame_time, frame.position, frame.target, frame.up)
            } else {
                path.add_key_frame(self.frame_time, Vec3::ZERO, DEFAULT_FRAME_TARGET, DEFAULT_FRAME_UP)
            }
        };
        (self.callbacks.keyframe_count_changed)();
        self.set_active_frame(new_index);
    }

    fn remove_frame(&mut self, gui: &mut dyn Gui) {
        if self.path.borrow().key_frame_count() == 0 {
            return;
        }
        if !gui.button("Remove Frame") {
            return;
        }
        let remaining = {
            let mut path = self.path.borrow_mut();
            path.remove_key_frame(self.active_frame);
            path.key_frame_count()
        };
        (self.callbacks.keyframe_count_changed)();
        if remaining > 0 {
            self.set_active_frame(self.active_frame.min(remaining - 1));
        } else {
            self.active_frame = 0;
        }
    }

    fn edit_frame_time(&mut self, gui: &mut dyn Gui) {
        gui.float_var("Frame Time", &mut self.frame_time, 0.0, f32::MAX, 0.01);
    }

    fn update_frame_time(&mut self, gui: &mut dyn Gui) {
        if self.path.borrow().key_frame_count() == 0 {
            return;
        }
        if !gui.button("Update Current Frame Time") {
            return;
        }
        // Re-timing can reorder the sequence; the path reports where the
        // frame ended up.
        let new_index = self.path.borrow_mut().set_frame_time(self.active_frame, self.frame_time);
        (self.callbacks.keyframe_count_changed)();
        self.set_active_frame(new_index);
    }

    fn edit_keyframe_properties(&mut self, gui: &mut dyn Gui) {
        if self.path.borrow().key_frame_count() == 0 {
            return;
        }
        let frame = *self.path.borrow().key_frame(self.active_frame);
        let mut position = frame.position;
        let mut target = frame.target;
        let mut up = frame.up;

        let mut dirty = false;
        let mut rotation_changed = false;

        gui.checkbox("Preserve Rotation", &mut self.preserve_rotation);
        gui.tooltip("If checked, the target will also be updated when position is changed.");

        if gui.float3_var("Position", &mut position, f32::MIN, f32::MAX, 0.01) {
            let mut path = self.path.borrow_mut();
            if self.preserve_rotation {
                // Shift the target by the same delta, keeping the look
                // direction computed from the pre-edit pose.
                let to_target = frame.target - frame.position;
                path.set_frame_target(self.active_frame, position + to_target);
            } else {
                rotation_changed = true;
            }
            path.set_frame_position(self.active_frame, position);
            dirty = true;
        }

        if gui.float3_var("Target", &mut target, f32::MIN, f32::MAX, 0.01) {
            self.path.borrow_mut().set_frame_target(self.active_frame, target);
            rotation_changed = true;
            dirty = true;
        }

        if gui.float3_var("Up", &mut up, f32::MIN, f32::MAX, 0.01) {
            self.path.borrow_mut().set_frame_up(self.active_frame, up);
            rotation_changed = true;
            dirty = true;
        }

        if rotation_changed {
            self.recompute_rotation_cache();
        }

        // Yaw/pitch/roll editing, useful for non-camera paths.
        let rotation_step = self.options.rotation_step;
        if gui.float3_var("Rotation", &mut self.active_frame_rot_degrees, -360.0, 360.0, rotation_step) {
            let rot = yaw_pitch_roll(
                self.active_frame_rot_degrees.x.to_radians(),
                self.active_frame_rot_degrees.y.to_radians(),
                self.active_frame_rot_degrees.z.to_radians(),
            );
            let mut path = self.path.borrow_mut();
            path.set_frame_up(self.active_frame, rot.col(1));
            path.set_frame_target(self.active_frame, position + rot.col(2));
            dirty = true;
        }

        if dirty {
            (self.callbacks.frame_changed)();
        }
    }

    fn move_to_camera(&mut self, gui: &mut dyn Gui) {
        if self.path.borrow().key_frame_count() == 0 {
            return;
        }
        if !gui.button("Move Frame to Camera") {
            return;
        }
        {
            let camera = self.camera.borrow();
            let mut path = self.path.borrow_mut();
            path.set_frame_position(self.active_frame, camera.position);
            path.set_frame_target(self.active_frame, camera.target);
            path.set_frame_up(self.active_frame, camera.up);
        }
        self.recompute_rotation_cache();
        (self.callbacks.frame_changed)();
    }

    /// Selects a keyframe: stages its time, refreshes the rotation cache,
    /// and notifies the host.
    pub fn set_active_frame(&mut self, index: usize) {
        self.active_frame = index;
        self.frame_time = self.path.borrow().key_frame(index).time;
        self.recompute_rotation_cache();
        (self.callbacks.frame_changed)();
    }

    /// Derives the yaw/pitch/roll cache from the active keyframe's pose.
    /// Never mutates the path.
    fn recompute_rotation_cache(&mut self) {
        let frame = *self.path.borrow().key_frame(self.active_frame);
        let orientation = look_at_orientation(frame.position, frame.target, frame.up);
        self.active_frame_rot_degrees = extract_yaw_pitch_roll_degrees(orientation);
    }
}
