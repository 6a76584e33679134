//! Static ground image display.
//!
//! Shows an image file as a textured rectangle anchored to a coordinate frame.
//! The rectangle's top-left corner sits at the frame origin and it extends
//! `width` meters along +X and `height` meters along -Y.
//!
//! Two independent status categories are reported:
//! - `"Image"`: set whenever the image path or size changes.
//! - `"Transform"`: set every frame.
//!
//! The rectangle is shown only when both the current frame resolves and the
//! last image load succeeded.

use std::any::Any;

use ground_image_core::display::{Display, DisplayContext};
use ground_image_core::error::Result;
use ground_image_core::geometry::ManualGeometry;
use ground_image_core::material::Material;
use ground_image_core::properties::{FloatProperty, FrameProperty, StringProperty};
use ground_image_core::scene::{NodeId, ObjectId, SceneManager};
use ground_image_core::status::{StatusLevel, StatusProperty, StatusSink};
use ground_image_core::DisplayConfig;
use ground_image_render::StaticImageTexture;

/// Plugin class name of [`GroundImageDisplay`].
pub const CLASS_NAME: &str = "ground_image/StaticGroundImage";

const OBJECT_NAME_PREFIX: &str = "StaticImageDisplayObject";
const STATUS_IMAGE: &str = "Image";
const STATUS_TRANSFORM: &str = "Transform";

/// Scene resources created by `initialize`.
#[derive(Debug, Clone, Copy)]
struct SceneHandles {
    /// Follows the anchor frame's pose.
    scene_node: NodeId,
    /// Child of `scene_node`; carries the rectangle and gates its visibility.
    object_node: NodeId,
    screen_rect: ObjectId,
}

/// Displays a static image on a rectangle anchored to a frame.
pub struct GroundImageDisplay {
    name: String,
    enabled: bool,
    status: StatusProperty,
    texture: StaticImageTexture,
    image_loaded: bool,
    image_path_property: StringProperty,
    frame_property: FrameProperty,
    width_property: FloatProperty,
    height_property: FloatProperty,
    scene: Option<SceneHandles>,
    object_name: Option<String>,
}

impl GroundImageDisplay {
    /// Creates a display with default properties. Nothing is loaded until `initialize`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let texture = StaticImageTexture::new(format!("GroundImageTexture:{name}"));
        Self {
            name,
            enabled: true,
            status: StatusProperty::new(),
            texture,
            image_loaded: false,
            image_path_property: StringProperty::new(
                "Image Path",
                "",
                "Path to the image to be displayed.",
            ),
            frame_property: FrameProperty::new(
                "Frame",
                FrameProperty::FIXED_FRAME_STRING,
                "The frame the image should be displayed in.",
            ),
            width_property: FloatProperty::new(
                "Width",
                10.0,
                "Width of the displayed image in meters.",
            )
            .with_min(0.0),
            height_property: FloatProperty::new(
                "Height",
                10.0,
                "Height of the displayed image in meters.",
            )
            .with_min(0.0),
            scene: None,
            object_name: None,
        }
    }

    /// Creates a display preloaded with a saved configuration.
    pub fn with_config(name: impl Into<String>, config: &DisplayConfig) -> Self {
        let mut display = Self::new(name);
        display.image_path_property.set(config.image_path.as_str());
        display.frame_property.set(config.frame_name.as_str());
        display.width_property.set(config.width);
        display.height_property.set(config.height);
        display
    }

    /// Boxed factory for plugin registration.
    pub fn create(name: &str) -> Box<dyn Display> {
        Box::new(Self::new(name))
    }

    /// Whether the last image/geometry refresh loaded an image.
    #[must_use]
    pub fn image_loaded(&self) -> bool {
        self.image_loaded
    }

    /// The texture loader backing the rectangle.
    #[must_use]
    pub fn texture(&self) -> &StaticImageTexture {
        &self.texture
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.scene.is_some()
    }

    /// Node that follows the anchor frame.
    #[must_use]
    pub fn scene_node(&self) -> Option<NodeId> {
        self.scene.map(|h| h.scene_node)
    }

    /// Node carrying the rectangle.
    #[must_use]
    pub fn object_node(&self) -> Option<NodeId> {
        self.scene.map(|h| h.object_node)
    }

    /// The rectangle's manual object.
    #[must_use]
    pub fn screen_rect(&self) -> Option<ObjectId> {
        self.scene.map(|h| h.screen_rect)
    }

    /// Scene name of the rectangle and its material.
    #[must_use]
    pub fn object_name(&self) -> Option<&str> {
        self.object_name.as_deref()
    }

    #[must_use]
    pub fn image_path(&self) -> &str {
        self.image_path_property.get()
    }

    /// Raw frame property value, possibly the fixed-frame placeholder.
    #[must_use]
    pub fn frame(&self) -> &str {
        self.frame_property.get()
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.width_property.get()
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.height_property.get()
    }

    /// Snapshot of the current property values.
    #[must_use]
    pub fn config(&self) -> DisplayConfig {
        DisplayConfig {
            image_path: self.image_path().to_string(),
            frame_name: self.frame().to_string(),
            width: self.width(),
            height: self.height(),
        }
    }

    /// Sets the image path; reloads if it changed.
    pub fn set_image_path(&mut self, ctx: &mut dyn DisplayContext, path: &str) {
        if self.image_path_property.set(path) {
            self.update_image_and_dimensions(ctx);
        }
    }

    /// Sets the anchor frame. Takes effect on the next update.
    pub fn set_frame(&mut self, frame: &str) {
        self.frame_property.set(frame);
    }

    /// Sets the width (clamped to non-negative); reloads if it changed.
    pub fn set_width(&mut self, ctx: &mut dyn DisplayContext, width: f32) {
        if self.width_property.set(width) {
            self.update_image_and_dimensions(ctx);
        }
    }

    /// Sets the height (clamped to non-negative); reloads if it changed.
    pub fn set_height(&mut self, ctx: &mut dyn DisplayContext, height: f32) {
        if self.height_property.set(height) {
            self.update_image_and_dimensions(ctx);
        }
    }

    /// Applies a whole configuration. Reloads at most once, and only if the
    /// path, width or height changed.
    pub fn apply_config(&mut self, ctx: &mut dyn DisplayContext, config: &DisplayConfig) {
        self.frame_property.set(config.frame_name.as_str());

        let mut changed = self.image_path_property.set(config.image_path.as_str());
        changed |= self.width_property.set(config.width);
        changed |= self.height_property.set(config.height);
        if changed {
            self.update_image_and_dimensions(ctx);
        }
    }

    /// Re-reads the image file into the texture without touching geometry,
    /// status or [`Self::image_loaded`]. A failed read keeps the previous image.
    pub fn reload_texture(&mut self) -> bool {
        self.texture.update()
    }

    /// Reloads the image and rebuilds the rectangle from the current properties.
    ///
    /// Never raises visibility: the next `update` decides that.
    pub fn update_image_and_dimensions(&mut self, ctx: &mut dyn DisplayContext) {
        let Some(handles) = self.scene else {
            return;
        };
        self.image_loaded = false;

        let image_path = self.image_path_property.get().to_string();
        if image_path.is_empty() {
            log::error!("[{}] No image path specified", self.name);
            self.status
                .set_status(StatusLevel::Error, STATUS_IMAGE, "No image path specified");
            ctx.scene_manager().set_node_visible(handles.object_node, false);
            return;
        }

        if !self.texture.load_image_from_path(&image_path) {
            log::error!("[{}] Could not load image from path: {image_path}", self.name);
            self.status.set_status(
                StatusLevel::Error,
                STATUS_IMAGE,
                "Could not load image from given path",
            );
            ctx.scene_manager().set_node_visible(handles.object_node, false);
            return;
        }

        self.status.set_status(StatusLevel::Ok, STATUS_IMAGE, "Image OK");
        self.image_loaded = true;

        let geometry = ManualGeometry::ground_quad(self.width(), self.height());
        if let Err(e) = ctx
            .scene_manager()
            .update_manual_object(handles.screen_rect, geometry)
        {
            log::error!("[{}] failed to rebuild image rectangle: {e}", self.name);
        }
    }
}

impl Display for GroundImageDisplay {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &'static str {
        CLASS_NAME
    }

    fn initialize(&mut self, ctx: &mut dyn DisplayContext) -> Result<()> {
        if self.scene.is_some() {
            log::warn!("[{}] already initialized", self.name);
            return Ok(());
        }

        self.frame_property.bind_frame_manager();

        let object_name = ctx.unique_name(OBJECT_NAME_PREFIX);
        log::info!("[{}] setting up screen rectangle '{object_name}'", self.name);

        let material = Material::ground_image(object_name.as_str(), self.texture.name());
        let geometry = ManualGeometry::ground_quad(self.width(), self.height());

        let handles = build_screen_rect(ctx.scene_manager(), &object_name, material, geometry)?;
        self.scene = Some(handles);
        self.object_name = Some(object_name);

        self.update_image_and_dimensions(ctx);
        Ok(())
    }

    fn update(&mut self, ctx: &mut dyn DisplayContext, _dt: f32, _ros_dt: f32) {
        let Some(handles) = self.scene else {
            return;
        };

        let frames = ctx.frame_manager();
        let frame = self.frame_property.frame_std(frames);
        let Some(pose) = frames.resolve(&frame, ctx.now()) else {
            let message = format!(
                "Error transforming from frame '{frame}' to frame '{}'",
                frames.fixed_frame()
            );
            log::error!("[{}] {message}", self.name);
            self.status
                .set_status(StatusLevel::Error, STATUS_TRANSFORM, &message);
            ctx.scene_manager().set_node_visible(handles.object_node, false);
            return;
        };

        self.status
            .set_status(StatusLevel::Ok, STATUS_TRANSFORM, "Transform OK");

        let scene = ctx.scene_manager();
        scene.set_node_position(handles.scene_node, pose.position);
        scene.set_node_orientation(handles.scene_node, pose.orientation);
        scene.set_node_visible(handles.object_node, self.image_loaded);
    }

    fn reset(&mut self, _ctx: &mut dyn DisplayContext) {
        // `image_loaded` is left as is; the next property change recomputes it.
        log::debug!("[{}] reset: clearing texture", self.name);
        self.texture.clear();
    }

    fn destroy(&mut self, ctx: &mut dyn DisplayContext) {
        let Some(handles) = self.scene.take() else {
            return;
        };
        let scene = ctx.scene_manager();
        scene.destroy_manual_object(handles.screen_rect);
        scene.destroy_node(handles.scene_node);
        self.object_name = None;
        log::debug!("[{}] destroyed scene resources", self.name);
    }

    fn refresh_resources(&mut self) -> bool {
        self.reload_texture()
    }

    fn status(&self) -> &StatusProperty {
        &self.status
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, ctx: &mut dyn DisplayContext, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if let Some(handles) = self.scene {
            ctx.scene_manager()
                .set_node_visible(handles.scene_node, enabled);
        }
    }
}

/// Creates the anchor node, the rectangle and the object node carrying it.
/// On failure, whatever was already created is destroyed again.
fn build_screen_rect(
    scene: &mut dyn SceneManager,
    object_name: &str,
    material: Material,
    geometry: ManualGeometry,
) -> Result<SceneHandles> {
    let root = scene.root_node();
    let scene_node = scene.create_child_node(root)?;

    let screen_rect = match scene.create_manual_object(object_name, material, geometry) {
        Ok(object) => object,
        Err(e) => {
            scene.destroy_node(scene_node);
            return Err(e);
        }
    };

    let attached = scene
        .create_child_node(scene_node)
        .and_then(|object_node| {
            scene.attach_object(object_node, screen_rect)?;
            Ok(object_node)
        });
    match attached {
        Ok(object_node) => Ok(SceneHandles {
            scene_node,
            object_node,
            screen_rect,
        }),
        Err(e) => {
            scene.destroy_manual_object(screen_rect);
            scene.destroy_node(scene_node);
            Err(e)
        }
    }
}
