//! Display host: owns the scene, frames and clock, and drives display lifecycles.

use ground_image_core::display::{Display, DisplayContext};
use ground_image_core::error::{GroundImageError, Result};
use ground_image_core::naming::SequentialNames;
use ground_image_core::registry::{DisplayRegistry, PluginRegistry};
use ground_image_core::scene::SceneManager;
use ground_image_core::transform::{Timestamp, TransformResolver};
use ground_image_render::SceneGraph;

use crate::frames::FrameTable;

/// Borrowed view of host services handed to one display call.
struct HostContext<'a> {
    scene: &'a mut SceneGraph,
    frames: &'a FrameTable,
    names: &'a mut SequentialNames,
    now: Timestamp,
}

impl DisplayContext for HostContext<'_> {
    fn scene_manager(&mut self) -> &mut dyn SceneManager {
        self.scene
    }

    fn frame_manager(&self) -> &dyn TransformResolver {
        self.frames
    }

    fn now(&self) -> Timestamp {
        self.now
    }

    fn unique_name(&mut self, prefix: &str) -> String {
        self.names.next(prefix)
    }
}

/// Headless viewer core: plugin classes, live displays and the services they use.
pub struct DisplayHost {
    scene: SceneGraph,
    frames: FrameTable,
    names: SequentialNames,
    clock: Timestamp,
    plugins: PluginRegistry,
    displays: DisplayRegistry,
}

impl DisplayHost {
    /// Creates a host whose poses are expressed in `fixed_frame`, with every
    /// built-in display class registered.
    pub fn new(fixed_frame: impl Into<String>) -> Result<Self> {
        let mut plugins = PluginRegistry::new();
        ground_image_displays::register_plugins(&mut plugins)?;
        Ok(Self {
            scene: SceneGraph::new(),
            frames: FrameTable::new(fixed_frame),
            names: SequentialNames::new(),
            clock: Timestamp::ZERO,
            plugins,
            displays: DisplayRegistry::new(),
        })
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn frames(&self) -> &FrameTable {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut FrameTable {
        &mut self.frames
    }

    pub fn plugins_mut(&mut self) -> &mut PluginRegistry {
        &mut self.plugins
    }

    /// Current host time.
    pub fn now(&self) -> Timestamp {
        self.clock
    }

    /// Instantiates, initializes and registers a display of class `class_name`.
    pub fn create_display(&mut self, class_name: &str, name: &str) -> Result<()> {
        let display = self.plugins.create(class_name, name)?;
        self.add_display(display)
    }

    /// Initializes and registers an already constructed display.
    pub fn add_display(&mut self, mut display: Box<dyn Display>) -> Result<()> {
        if self.displays.contains(display.name()) {
            return Err(GroundImageError::DisplayExists(display.name().to_string()));
        }
        let Self {
            scene,
            frames,
            names,
            clock,
            displays,
            ..
        } = self;
        let mut ctx = HostContext {
            scene,
            frames,
            names,
            now: *clock,
        };
        display.initialize(&mut ctx)?;
        log::info!(
            "added display '{}' ({})",
            display.name(),
            display.class_name()
        );
        displays.register(display)
    }

    /// Destroys and drops a display.
    pub fn remove_display(&mut self, name: &str) -> Result<()> {
        let mut display = self
            .displays
            .remove(name)
            .ok_or_else(|| GroundImageError::DisplayNotFound(name.to_string()))?;
        let mut ctx = HostContext {
            scene: &mut self.scene,
            frames: &self.frames,
            names: &mut self.names,
            now: self.clock,
        };
        display.destroy(&mut ctx);
        log::info!("removed display '{name}'");
        Ok(())
    }

    /// Destroys every display.
    pub fn clear(&mut self) {
        let mut ctx = HostContext {
            scene: &mut self.scene,
            frames: &self.frames,
            names: &mut self.names,
            now: self.clock,
        };
        for mut display in self.displays.drain() {
            display.destroy(&mut ctx);
        }
    }

    pub fn display(&self, name: &str) -> Option<&dyn Display> {
        self.displays.get(name)
    }

    /// Gets a display downcast to its concrete type.
    pub fn display_as<T: Display>(&self, name: &str) -> Option<&T> {
        self.displays.get(name)?.as_any().downcast_ref::<T>()
    }

    /// Display names in update order.
    pub fn display_names(&self) -> Vec<&str> {
        self.displays.iter().map(|d| d.name()).collect()
    }

    /// Runs `f` on a display of concrete type `T` with host services available,
    /// e.g. to edit properties that trigger a reload.
    pub fn with_display<T: Display, R>(
        &mut self,
        name: &str,
        f: impl FnOnce(&mut T, &mut dyn DisplayContext) -> R,
    ) -> Result<R> {
        let Self {
            scene,
            frames,
            names,
            clock,
            displays,
            ..
        } = self;
        let display = displays
            .get_mut(name)
            .ok_or_else(|| GroundImageError::DisplayNotFound(name.to_string()))?;
        let concrete = display
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or_else(|| {
                GroundImageError::DisplayTypeMismatch(name.to_string(), std::any::type_name::<T>())
            })?;
        let mut ctx = HostContext {
            scene,
            frames,
            names,
            now: *clock,
        };
        let ctx: &mut dyn DisplayContext = &mut ctx;
        Ok(f(concrete, ctx))
    }

    /// Enables or disables a display.
    pub fn set_display_enabled(&mut self, name: &str, enabled: bool) -> Result<()> {
        let Self {
            scene,
            frames,
            names,
            clock,
            displays,
            ..
        } = self;
        let display = displays
            .get_mut(name)
            .ok_or_else(|| GroundImageError::DisplayNotFound(name.to_string()))?;
        let mut ctx = HostContext {
            scene,
            frames,
            names,
            now: *clock,
        };
        display.set_enabled(&mut ctx, enabled);
        Ok(())
    }

    /// Advances the clock by `dt` seconds and updates every enabled display.
    pub fn update(&mut self, dt: f32) {
        self.clock = self.clock.advanced_by(dt);
        let Self {
            scene,
            frames,
            names,
            clock,
            displays,
            ..
        } = self;
        let mut ctx = HostContext {
            scene,
            frames,
            names,
            now: *clock,
        };
        for display in displays.iter_mut() {
            if display.is_enabled() {
                display.update(&mut ctx, dt, dt);
            }
        }
    }

    /// Re-reads file-backed resources of every display. Returns how many
    /// displays reloaded something.
    pub fn refresh_resources(&mut self) -> usize {
        let refreshed = self
            .displays
            .iter_mut()
            .map(|display| display.refresh_resources())
            .filter(|reloaded| *reloaded)
            .count();
        log::debug!("refreshed resources of {refreshed} display(s)");
        refreshed
    }

    /// Resets every display.
    pub fn reset(&mut self) {
        let Self {
            scene,
            frames,
            names,
            clock,
            displays,
            ..
        } = self;
        let mut ctx = HostContext {
            scene,
            frames,
            names,
            now: *clock,
        };
        for display in displays.iter_mut() {
            display.reset(&mut ctx);
        }
        log::info!("reset {} display(s)", displays.len());
    }
}
