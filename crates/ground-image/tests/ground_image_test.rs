//! Integration tests for ground image displays driven through a `DisplayHost`.
//!
//! Each test builds its own host, so tests are independent and can run in parallel.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use ground_image::*;
use proptest::prelude::*;

static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

/// Writes a small RGBA PNG to a unique temp path.
fn write_png(width: u32, height: u32) -> PathBuf {
    let id = NEXT_FILE.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!(
        "ground_image_it_{}_{id}.png",
        std::process::id()
    ));
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x * 20) as u8, (y * 20) as u8, 128, 255])
    });
    img.save(&path).expect("failed to write test image");
    path
}

fn ground_image<'a>(host: &'a DisplayHost, name: &str) -> &'a GroundImageDisplay {
    host.display_as::<GroundImageDisplay>(name)
        .expect("display should exist")
}

/// True if the display's rectangle would be drawn this frame.
fn quad_visible(host: &DisplayHost, name: &str) -> bool {
    let node = ground_image(host, name)
        .object_node()
        .expect("display should be initialized");
    host.scene().is_effectively_visible(node)
}

fn quad_positions(host: &DisplayHost, name: &str) -> Vec<Vec3> {
    let rect = ground_image(host, name)
        .screen_rect()
        .expect("display should be initialized");
    host.scene()
        .object(rect)
        .expect("rectangle should exist")
        .geometry()
        .positions()
}

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-5
}

#[test]
fn test_georeferenced_image_follows_frame() {
    init_logging();
    let path = write_png(8, 4);

    let mut host = DisplayHost::new("map").unwrap();
    host.frames_mut().set_transform(
        "gps",
        "map",
        Pose::from_translation(Vec3::new(5.0, 2.0, 0.0)),
    );

    let config = DisplayConfig::new()
        .with_image_path(path.to_string_lossy())
        .with_frame("gps")
        .with_size(40.0, 30.0);
    host.add_display(Box::new(GroundImageDisplay::with_config("site", &config)))
        .unwrap();

    // Loaded, but not shown until the first update resolves the frame.
    assert!(ground_image(&host, "site").image_loaded());
    assert!(!quad_visible(&host, "site"));

    host.update(0.1);
    assert!(quad_visible(&host, "site"));

    let display = ground_image(&host, "site");
    assert_eq!(display.status().level_of("Image"), Some(StatusLevel::Ok));
    assert_eq!(display.status().get("Transform").unwrap().message, "Transform OK");

    let positions = quad_positions(&host, "site");
    assert_eq!(
        positions,
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(40.0, 0.0, 0.0),
            Vec3::new(40.0, -30.0, 0.0),
            Vec3::new(0.0, -30.0, 0.0),
        ]
    );

    let anchor = display.scene_node().unwrap();
    let pose = host.scene().world_pose(anchor).unwrap();
    assert!(approx(pose.position, Vec3::new(5.0, 2.0, 0.0)));

    // Moving the frame moves the rectangle on the next update.
    host.frames_mut().set_transform(
        "gps",
        "map",
        Pose::new(
            Vec3::new(-1.0, 3.0, 0.5),
            Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
        ),
    );
    host.update(0.1);
    let anchor = ground_image(&host, "site").scene_node().unwrap();
    let pose = host.scene().world_pose(anchor).unwrap();
    assert!(approx(pose.position, Vec3::new(-1.0, 3.0, 0.5)));
    let corner = pose.transform_point(Vec3::new(40.0, 0.0, 0.0));
    assert!(approx(corner, Vec3::new(-1.0, 43.0, 0.5)));

    std::fs::remove_file(path).ok();
}

#[test]
fn test_missing_frame_hides_and_recovers() {
    let path = write_png(4, 4);

    let mut host = DisplayHost::new("map").unwrap();
    let config = DisplayConfig::new()
        .with_image_path(path.to_string_lossy())
        .with_frame("gps");
    host.add_display(Box::new(GroundImageDisplay::with_config("site", &config)))
        .unwrap();

    host.update(0.1);
    assert!(!quad_visible(&host, "site"));
    let entry = ground_image(&host, "site").status().get("Transform").unwrap();
    assert_eq!(entry.level, StatusLevel::Error);
    assert_eq!(entry.message, "Error transforming from frame 'gps' to frame 'map'");
    // The image status is independent of the transform status.
    assert_eq!(
        ground_image(&host, "site").status().level_of("Image"),
        Some(StatusLevel::Ok)
    );

    host.frames_mut().set_transform("gps", "map", Pose::identity());
    host.update(0.1);
    assert!(quad_visible(&host, "site"));
    assert_eq!(
        ground_image(&host, "site").status().level_of("Transform"),
        Some(StatusLevel::Ok)
    );

    host.frames_mut().remove_transform("gps").unwrap();
    host.update(0.1);
    assert!(!quad_visible(&host, "site"));

    std::fs::remove_file(path).ok();
}

#[test]
fn test_bad_image_stays_hidden_with_valid_frame() {
    let mut host = DisplayHost::new("map").unwrap();
    host.create_display(GROUND_IMAGE_CLASS, "empty").unwrap();

    let entry = ground_image(&host, "empty").status().get("Image").unwrap();
    assert_eq!(entry.level, StatusLevel::Error);
    assert_eq!(entry.message, "No image path specified");

    host.update(0.1);
    assert!(!quad_visible(&host, "empty"));
    assert_eq!(
        ground_image(&host, "empty").status().level_of("Transform"),
        Some(StatusLevel::Ok)
    );

    host.with_display::<GroundImageDisplay, _>("empty", |display, ctx| {
        display.set_image_path(ctx, "/nonexistent/ground_image/site.png");
    })
    .unwrap();
    let entry = ground_image(&host, "empty").status().get("Image").unwrap();
    assert_eq!(entry.message, "Could not load image from given path");

    host.update(0.1);
    assert!(!quad_visible(&host, "empty"));
}

#[test]
fn test_resize_and_reconfigure_through_host() {
    let path = write_png(4, 4);
    let other = write_png(2, 6);

    let mut host = DisplayHost::new("map").unwrap();
    let config = DisplayConfig::new().with_image_path(path.to_string_lossy());
    host.add_display(Box::new(GroundImageDisplay::with_config("site", &config)))
        .unwrap();
    host.update(0.1);
    assert_eq!(quad_positions(&host, "site")[2], Vec3::new(10.0, -10.0, 0.0));

    host.with_display::<GroundImageDisplay, _>("site", |display, ctx| {
        display.set_width(ctx, 2.5);
        display.set_height(ctx, -4.0);
    })
    .unwrap();
    assert_eq!(quad_positions(&host, "site")[2], Vec3::new(2.5, 0.0, 0.0));

    // Saved layout round trip, then switch to a different image.
    let saved = ground_image(&host, "site").config().to_json().unwrap();
    let mut restored = DisplayConfig::from_json(&saved).unwrap();
    assert_eq!(restored.width, 2.5);
    assert_eq!(restored.height, 0.0);
    restored.image_path = other.to_string_lossy().into_owned();
    restored.height = 7.0;

    host.with_display::<GroundImageDisplay, _>("site", |display, ctx| {
        display.apply_config(ctx, &restored);
    })
    .unwrap();
    host.update(0.1);

    let display = ground_image(&host, "site");
    let image = display.texture().texture().image().unwrap();
    assert_eq!((image.width(), image.height()), (2, 6));
    assert_eq!(quad_positions(&host, "site")[2], Vec3::new(2.5, -7.0, 0.0));
    assert!(quad_visible(&host, "site"));

    std::fs::remove_file(path).ok();
    std::fs::remove_file(other).ok();
}

#[test]
fn test_host_lifecycle() {
    let path = write_png(4, 4);

    let mut host = DisplayHost::new("map").unwrap();
    let config = DisplayConfig::new().with_image_path(path.to_string_lossy());
    host.add_display(Box::new(GroundImageDisplay::with_config("a", &config)))
        .unwrap();
    host.add_display(Box::new(GroundImageDisplay::with_config("b", &config)))
        .unwrap();
    assert_eq!(host.display_names(), vec!["a", "b"]);

    // Duplicate display names and unknown classes are rejected.
    assert!(matches!(
        host.create_display(GROUND_IMAGE_CLASS, "a"),
        Err(GroundImageError::DisplayExists(_))
    ));
    assert!(matches!(
        host.create_display("ground_image/Nope", "c"),
        Err(GroundImageError::UnknownDisplayClass(_))
    ));

    // Each display gets its own scene object name.
    let a = ground_image(&host, "a").object_name().unwrap().to_string();
    let b = ground_image(&host, "b").object_name().unwrap().to_string();
    assert_ne!(a, b);
    assert!(host.scene().object_by_name(&a).is_some());

    host.update(0.1);
    assert_eq!(host.scene().visible_objects().len(), 2);

    host.set_display_enabled("b", false).unwrap();
    host.update(0.1);
    assert_eq!(host.scene().visible_objects().len(), 1);
    assert!(!host.display("b").unwrap().is_enabled());

    // Reset keeps the rectangle but empties its texture.
    host.reset();
    assert!(!ground_image(&host, "a").texture().texture().is_loaded());
    assert!(ground_image(&host, "a").image_loaded());

    host.remove_display("a").unwrap();
    assert!(host.scene().object_by_name(&a).is_none());
    assert!(host.display("a").is_none());
    assert!(matches!(
        host.remove_display("a"),
        Err(GroundImageError::DisplayNotFound(_))
    ));

    host.clear();
    assert!(host.display_names().is_empty());
    assert_eq!(host.scene().object_count(), 0);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_refresh_resources_reloads_textures() {
    let path = std::env::temp_dir().join(format!(
        "ground_image_it_late_{}.png",
        std::process::id()
    ));
    std::fs::remove_file(&path).ok();

    let mut host = DisplayHost::new("map").unwrap();
    let config = DisplayConfig::new().with_image_path(path.to_string_lossy());
    host.add_display(Box::new(GroundImageDisplay::with_config("late", &config)))
        .unwrap();
    host.create_display(GROUND_IMAGE_CLASS, "empty").unwrap();
    assert_eq!(host.refresh_resources(), 0);

    image::RgbaImage::from_pixel(5, 3, image::Rgba([9, 9, 9, 255]))
        .save(&path)
        .unwrap();
    assert_eq!(host.refresh_resources(), 1);

    let display = ground_image(&host, "late");
    assert!(display.texture().texture().is_loaded());
    assert!(!display.image_loaded());
    host.update(0.1);
    assert!(!quad_visible(&host, "late"));

    // A later property change runs the full refresh and shows the image.
    host.with_display::<GroundImageDisplay, _>("late", |display, ctx| {
        display.set_width(ctx, 3.0);
    })
    .unwrap();
    host.update(0.1);
    assert!(quad_visible(&host, "late"));

    // Once the file disappears, refreshing keeps the loaded image.
    std::fs::remove_file(&path).unwrap();
    let generation = ground_image(&host, "late").texture().texture().generation();
    assert_eq!(host.refresh_resources(), 0);
    let display = ground_image(&host, "late");
    assert_eq!(display.texture().texture().generation(), generation);
    assert!(display.texture().texture().is_loaded());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_host_shows_quad_iff_frame_and_image_are_good(
        frame_linked in any::<bool>(),
        image_ok in any::<bool>(),
        x in -100.0f32..100.0,
        y in -100.0f32..100.0,
    ) {
        let path = write_png(2, 2);
        let image_path = if image_ok {
            path.to_string_lossy().into_owned()
        } else {
            "/nonexistent/ground_image/site.png".to_string()
        };

        let mut host = DisplayHost::new("map").unwrap();
        if frame_linked {
            host.frames_mut()
                .set_transform("gps", "map", Pose::from_translation(Vec3::new(x, y, 0.0)));
        }
        let config = DisplayConfig::new().with_image_path(image_path).with_frame("gps");
        host.add_display(Box::new(GroundImageDisplay::with_config("site", &config)))
            .unwrap();
        host.update(0.1);

        prop_assert_eq!(quad_visible(&host, "site"), frame_linked && image_ok);
        if frame_linked {
            let anchor = ground_image(&host, "site").scene_node().unwrap();
            let pose = host.scene().world_pose(anchor).unwrap();
            prop_assert!(approx(pose.position, Vec3::new(x, y, 0.0)));
        }
        std::fs::remove_file(path).ok();
    }
}
