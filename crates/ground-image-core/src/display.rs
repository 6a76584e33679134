//! Display trait and the host context handed to it.
//!
//! A [`Display`] is a plugin that draws something into the host's scene. The
//! host owns the scene, the frame manager and the clock; it lends them to the
//! display through a [`DisplayContext`] for the duration of each lifecycle call.

use std::any::Any;

use crate::error::Result;
use crate::scene::SceneManager;
use crate::status::StatusProperty;
use crate::transform::{Timestamp, TransformResolver};

/// Host services available to a display during a lifecycle call.
pub trait DisplayContext {
    /// The scene the display draws into.
    fn scene_manager(&mut self) -> &mut dyn SceneManager;

    /// Frame resolution service.
    fn frame_manager(&self) -> &dyn TransformResolver;

    /// Current time on the host clock.
    fn now(&self) -> Timestamp;

    /// A scene-unique name starting with `prefix`.
    fn unique_name(&mut self, prefix: &str) -> String;
}

/// A visualization plugin driven by the host.
///
/// Lifecycle: `initialize` once, then `update` every frame while enabled;
/// `reset` on user request; `destroy` before the host drops the display.
pub trait Display: Any {
    /// Returns a reference to self as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns a mutable reference to self as `Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Instance name, unique within a host.
    fn name(&self) -> &str;

    /// Plugin class name, e.g. `"ground_image/StaticGroundImage"`.
    fn class_name(&self) -> &'static str;

    /// Builds scene resources. Called once after construction.
    fn initialize(&mut self, ctx: &mut dyn DisplayContext) -> Result<()>;

    /// Per-frame update. `dt` is wall time since the last frame, `ros_dt`
    /// time on the data clock.
    fn update(&mut self, ctx: &mut dyn DisplayContext, dt: f32, ros_dt: f32);

    /// Drops transient state (user-triggered).
    fn reset(&mut self, ctx: &mut dyn DisplayContext);

    /// Releases scene resources.
    fn destroy(&mut self, ctx: &mut dyn DisplayContext);

    /// Re-reads file-backed resources such as textures. Returns true if
    /// anything was reloaded.
    fn refresh_resources(&mut self) -> bool {
        false
    }

    /// User-facing status of this display.
    fn status(&self) -> &StatusProperty;

    fn is_enabled(&self) -> bool;

    /// Enables or disables the display. Disabled displays are hidden and not updated.
    fn set_enabled(&mut self, ctx: &mut dyn DisplayContext, enabled: bool);
}
