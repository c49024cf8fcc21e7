pub mod camera;
pub mod gui;
pub mod math;
pub mod options;
pub mod panel;
pub mod path;

pub use camera::Camera3D;
pub use gui::Gui;
#[cfg(feature = "editor")]
pub use gui::EguiGui;
pub use options::PanelOptions;
pub use panel::{EditorCallback, PathEditorCallbacks, PathEditorPanel, PATH_NAME_CAPACITY};
pub use path::{AnimationPath, Keyframe};
