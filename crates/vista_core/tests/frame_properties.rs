use vista_core::glam::Vec3;
use vista_core::{
    Camera, ControlsConfig, FrameDriver, FrameOutcome, FramePacket, InputEvent, InteractionMode,
    KeyCode, Look, SceneContext, SceneDescription,
};

const HIERARCHY: &str = r#"{
    "objects": [
        { "name": "base", "type": "cube", "position": [0, 0, 2] },
        { "name": "arm",  "type": "cube", "position": [1, 0, 0], "parent": "base" },
        { "name": "hand", "type": "cube", "position": [0, 1, 0], "parent": "arm" }
    ]
}"#;

const ROW: &str = r#"[
    { "name": "mid",  "type": "cube", "position": [0, 0, 0] },
    { "name": "far",  "type": "cube", "position": [0, 0, 5] },
    { "name": "near", "type": "cube", "position": [0, 0, -5] }
]"#;

fn driver(json: &str, camera: Camera, mode: InteractionMode) -> FrameDriver {
    let scene = SceneDescription::from_json(json).unwrap().build().unwrap();
    let controls = ControlsConfig {
        mode,
        ..ControlsConfig::default()
    };
    FrameDriver::new(SceneContext::new(scene, camera, &controls))
}

fn draw(d: &mut FrameDriver, t: f64) -> FramePacket {
    match d.frame_at(t, &mut ()) {
        FrameOutcome::Draw(packet) => packet,
        FrameOutcome::Exit => panic!("unexpected exit"),
    }
}

fn centroid_of(packet: &FramePacket, object: usize) -> Vec3 {
    let draw = packet.world.iter().find(|d| d.object == object).unwrap();
    // cubes are generated around their local origin
    draw.model.transform_point3(Vec3::ZERO)
}

#[test]
fn moving_a_parent_moves_every_descendant() {
    let mut d = driver(HIERARCHY, Camera::default(), InteractionMode::Edit);
    let before = draw(&mut d, 0.0);
    assert!(centroid_of(&before, 2).abs_diff_eq(Vec3::new(1.0, 1.0, 2.0), 1e-5));

    let v = Vec3::new(0.5, -1.0, 3.0);
    let base = d.ctx.scene.find("base").unwrap();
    d.ctx.scene.translate(base, v);
    let after = draw(&mut d, 0.1);

    for object in 0..3 {
        let moved = centroid_of(&after, object) - centroid_of(&before, object);
        assert!(moved.abs_diff_eq(v, 1e-5), "object {object} moved by {moved}");
    }
}

#[test]
fn world_draws_are_farthest_first() {
    let camera = Camera::new(Vec3::new(0.0, 0.0, -10.0), Look::Direction(Vec3::Z), Vec3::Y);
    let mut d = driver(ROW, camera, InteractionMode::Fly);
    let packet = draw(&mut d, 0.0);
    assert_eq!(packet.world_order(), vec![1, 0, 2]);
    assert!(packet.lights.is_empty());
    assert!(packet.world.windows(2).all(|w| w[0].distance >= w[1].distance));
}

#[test]
fn select_then_deselect_leaves_only_scale_changed() {
    let mut d = driver(ROW, Camera::default(), InteractionMode::Edit);
    let before = d.ctx.scene.objects()[0].transform;

    for key in [KeyCode::Space, KeyCode::Space] {
        d.push(InputEvent::KeyDown { key, repeat: false });
        d.push(InputEvent::KeyUp { key });
    }
    draw(&mut d, 0.0);

    let after = d.ctx.scene.objects()[0].transform;
    assert_eq!(after.position, before.position);
    assert_eq!(after.rotation, before.rotation);
    assert!(after.scale.abs_diff_eq(before.scale * 1.02, 1e-6));
    assert!(d.ctx.scene.selected().is_none());
}

#[test]
fn auto_repeat_does_not_retrigger_edit_commands() {
    let mut d = driver(ROW, Camera::default(), InteractionMode::Edit);
    d.push(InputEvent::KeyDown { key: KeyCode::Space, repeat: false });
    d.push(InputEvent::KeyUp { key: KeyCode::Space });
    d.push(InputEvent::KeyDown { key: KeyCode::KeyA, repeat: false });
    for _ in 0..10 {
        d.push(InputEvent::KeyDown { key: KeyCode::KeyA, repeat: true });
    }
    draw(&mut d, 0.0);
    let pos = d.ctx.scene.objects()[0].transform.position;
    assert!(pos.abs_diff_eq(Vec3::new(0.1, 0.0, 0.0), 1e-6));
}

#[test]
fn held_forward_key_moves_one_step_per_frame() {
    let camera = Camera::new(Vec3::ZERO, Look::Direction(Vec3::Z), Vec3::Y);
    let mut d = driver(ROW, camera, InteractionMode::Fly);
    let step = ControlsConfig::default().move_step;

    d.push(InputEvent::KeyDown { key: KeyCode::KeyW, repeat: false });
    let frames = 30;
    for i in 0..frames {
        draw(&mut d, i as f64 / 60.0);
    }
    let expected = Vec3::Z * step * frames as f32;
    assert!(d.ctx.camera.position.abs_diff_eq(expected, 1e-4));
}

#[test]
fn walking_speed_does_not_depend_on_look_direction() {
    let camera = Camera::new(
        Vec3::new(2.0, 1.5, -1.0),
        Look::Direction(Vec3::new(0.7, -0.6, 0.3)),
        Vec3::Y,
    );
    let mut d = driver(ROW, camera, InteractionMode::Fly);
    let step = ControlsConfig::default().move_step;

    d.push(InputEvent::CaptureChanged(true));
    d.push(InputEvent::MouseMotion { dx: 37.0, dy: -22.0 });
    draw(&mut d, 0.0);
    d.push(InputEvent::MouseMotion { dx: -90.0, dy: 15.0 });
    draw(&mut d, 0.01);

    let frames = 20;
    let walk = |d: &mut FrameDriver, start: f64| {
        let from = d.ctx.camera.position;
        for i in 0..frames {
            draw(d, start + i as f64 / 60.0);
        }
        d.ctx.camera.position - from
    };

    d.push(InputEvent::KeyDown { key: KeyCode::KeyW, repeat: false });
    let forward = walk(&mut d, 1.0);
    assert_eq!(forward.y, 0.0);
    assert!((forward.length() - step * frames as f32).abs() < 1e-4, "{forward}");

    d.push(InputEvent::KeyDown { key: KeyCode::KeyD, repeat: false });
    let diagonal = walk(&mut d, 2.0);
    assert_eq!(diagonal.y, 0.0);
    let expected = std::f32::consts::SQRT_2 * step * frames as f32;
    assert!((diagonal.length() - expected).abs() < 1e-4, "{diagonal}");
}

#[test]
fn mouse_motion_turns_only_while_captured() {
    let camera = Camera::new(Vec3::ZERO, Look::Direction(Vec3::Z), Vec3::Y);
    let mut d = driver(ROW, camera, InteractionMode::Fly);

    d.push(InputEvent::MouseMotion { dx: 100.0, dy: 0.0 });
    draw(&mut d, 0.0);
    assert!(d.ctx.camera.at().abs_diff_eq(Vec3::Z, 1e-6));

    d.push(InputEvent::CaptureChanged(true));
    d.push(InputEvent::MouseMotion { dx: 100.0, dy: 0.0 });
    draw(&mut d, 0.1);
    assert!(d.ctx.camera.at().x < 0.0);
    assert!((d.ctx.camera.up.length() - 1.0).abs() < 1e-5);
}
