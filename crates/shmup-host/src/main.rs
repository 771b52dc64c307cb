//! Demo host: a field of spinning cubes and a player cube moved with WASD.

use anyhow::Result;
use glam::{Mat4, Quat, Vec2, Vec3};

use shmup_platform::core::{AppControl, Game, PlatformConfig};
use shmup_platform::input::{keys, InputEvent, InputState};
use shmup_platform::logging::{init_logging, LoggingConfig};
use shmup_platform::render::{
    Camera, Entity, Material, Player, RendererBackend, Texture, TextureFormat, Vertex, World,
};
use shmup_platform::time::FrameTime;
use shmup_platform::window::Runtime;

const GRID: i32 = 5;
const SPACING: f32 = 4.0;
const PLAYER_SPEED: f32 = 8.0;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = PlatformConfig::default();
    let aspect = config.display.width as f32 / config.display.height as f32;
    Runtime::run(config, Demo::new(aspect))
}

struct Demo {
    world: World,
    checker: Texture,
    player_pos: Vec3,
    elapsed: f32,
    quit: bool,
}

impl Demo {
    fn new(aspect: f32) -> Self {
        let world = World {
            camera: Camera {
                position: Vec3::new(0.0, 14.0, 18.0),
                forward: Vec3::new(0.0, -0.6, -1.0).normalize(),
                aspect,
                ..Camera::default()
            },
            ..World::default()
        };

        Self {
            world,
            checker: checker_texture(64, 8),
            player_pos: Vec3::new(0.0, 0.0, 6.0),
            elapsed: 0.0,
            quit: false,
        }
    }
}

impl Game for Demo {
    fn world(&self) -> &World {
        &self.world
    }

    fn on_renderer_bound(&mut self, renderer: &mut dyn RendererBackend) {
        let (vertices, indices) = cube();
        let Some(mesh) = renderer.upload_mesh(&vertices, &indices) else {
            log::error!("cube upload failed; nothing will be drawn");
            return;
        };

        // Texture data is consumed by the upload, so rebuild it on rebind.
        if self.checker.data.is_none() {
            self.checker = checker_texture(64, 8);
        }
        self.checker.id = None;
        renderer.upload_texture_to_gpu(&mut self.checker);
        let material = Material {
            diffuse: self.checker.id,
        };

        self.world.map = grid_positions()
            .map(|p| Entity::new(Mat4::from_translation(p), mesh, material))
            .collect();
        self.world.players = vec![Player {
            entity: Entity::new(Mat4::from_translation(self.player_pos), mesh, Material::default()),
        }];

        log::info!("demo scene: {} cubes + 1 player", self.world.map.len());
    }

    fn on_input(&mut self, event: &InputEvent) {
        if let InputEvent::KeyDown { key_code: keys::ESCAPE } = event {
            self.quit = true;
        }
    }

    fn update(&mut self, time: FrameTime, input: &InputState) -> AppControl {
        if self.quit {
            return AppControl::Exit;
        }

        self.elapsed += time.dt;

        let mut dir = Vec2::ZERO;
        let held = |c: u8| input.is_key_down(c as i32);
        if held(b'a') {
            dir.x -= 1.0;
        }
        if held(b'd') {
            dir.x += 1.0;
        }
        if held(b'w') {
            dir.y -= 1.0;
        }
        if held(b's') {
            dir.y += 1.0;
        }
        let step = dir.normalize_or_zero() * PLAYER_SPEED * time.dt;
        self.player_pos += Vec3::new(step.x, 0.0, step.y);

        for (i, (entity, pos)) in self.world.map.iter_mut().zip(grid_positions()).enumerate() {
            let spin = Quat::from_rotation_y(self.elapsed + i as f32 * 0.3);
            entity.matrix = Mat4::from_rotation_translation(spin, pos);
        }
        if let Some(player) = self.world.players.first_mut() {
            player.entity.matrix = Mat4::from_translation(self.player_pos);
        }

        AppControl::Continue
    }
}

fn grid_positions() -> impl Iterator<Item = Vec3> {
    let half = (GRID - 1) as f32 * SPACING / 2.0;
    (0..GRID).flat_map(move |z| {
        (0..GRID).map(move |x| Vec3::new(x as f32 * SPACING - half, 0.0, z as f32 * SPACING - half - 6.0))
    })
}

/// Unit cube, four vertices per face so normals and UVs stay flat.
fn cube() -> (Vec<Vertex>, Vec<u16>) {
    let faces = [
        (Vec3::X, Vec3::Y),
        (Vec3::NEG_X, Vec3::Y),
        (Vec3::Y, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::Z),
        (Vec3::Z, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, up) in faces {
        let right = up.cross(normal);
        let base = vertices.len() as u16;
        for (u, v) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            let pos = normal + right * (u * 2.0 - 1.0) + up * (v * 2.0 - 1.0);
            vertices.push(Vertex::pack(pos * 0.5, normal, Vec2::new(u, v)));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}

fn checker_texture(size: u32, cell: u32) -> Texture {
    let mut data = Vec::with_capacity((size * size * 3) as usize);
    for y in 0..size {
        for x in 0..size {
            let light = ((x / cell) + (y / cell)) % 2 == 0;
            data.extend_from_slice(if light { &[230, 230, 230] } else { &[40, 60, 120] });
        }
    }
    Texture::new(size, size, TextureFormat::Rgb, data)
}
