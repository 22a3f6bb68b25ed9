//! Demo scenes driven by the lumen frame loop.

mod cursor_camera;
mod debug_toggle;
mod fullscreen_resize;
mod spinning_cube;

use glam::Vec3;
use lumen_engine::core::App;
use lumen_engine::paint::Color;
use lumen_engine::scene::{Mesh, Node, NodeId, SceneGraph, Transform};

pub use cursor_camera::CursorCamera;
pub use debug_toggle::DebugToggle;
pub use fullscreen_resize::FullscreenResize;
pub use spinning_cube::SpinningCube;

pub const DEFAULT_SCENE: &str = "spinning-cube";

pub const NAMES: &[&str] = &[
    "spinning-cube",
    "cursor-camera",
    "fullscreen-resize",
    "debug-toggle",
];

/// Looks up a scene by its config name.
pub fn by_name(name: &str) -> Option<Box<dyn App>> {
    let scene: Box<dyn App> = match name {
        "spinning-cube" => Box::new(SpinningCube::default()),
        "cursor-camera" => Box::new(CursorCamera::default()),
        "fullscreen-resize" => Box::new(FullscreenResize::default()),
        "debug-toggle" => Box::new(DebugToggle::default()),
        _ => return None,
    };
    Some(scene)
}

/// Adds the red wireframe unit cube every scene looks at, plus a world-axes helper.
pub(crate) fn add_cube(scene: &mut SceneGraph) -> NodeId {
    scene.add(
        Node::new("axes")
            .with_mesh(Mesh::Axes)
            .with_transform(Transform::IDENTITY.with_scale(Vec3::splat(2.0))),
    );
    scene.add(Node::new("cube").with_mesh(Mesh::WireCube {
        color: Color::from_srgb_u8(0xff, 0x00, 0x00, 0xff),
    }))
}

#[cfg(test)]
pub(crate) mod test_support {
    use lumen_engine::camera::PerspectiveCamera;
    use lumen_engine::config::LumenConfig;
    use lumen_engine::core::SceneContext;
    use lumen_engine::time::FrameTime;

    pub fn ctx() -> SceneContext {
        SceneContext::from_config(&LumenConfig::default())
    }

    pub fn at(elapsed: f64) -> FrameTime {
        FrameTime {
            elapsed,
            dt: 1.0 / 60.0,
            frame_index: 0,
        }
    }

    pub fn camera_xyz(camera: &PerspectiveCamera) -> [f32; 3] {
        camera.position.to_array()
    }
}
