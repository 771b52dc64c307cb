//! Engine-owned scene data the renderer reads.
//!
//! The game fills a [`World`] and hands it to the renderer once per frame;
//! nothing in here is mutated while drawing.

use glam::{Mat4, Vec2, Vec3};

slotmap::new_key_type! {
    /// A texture object owned by the bound renderer.
    pub struct TextureId;
    /// A vertex or index buffer object owned by the bound renderer.
    pub struct BufferId;
}

/// Packed vertex: float position, normalized-short normal and UV.
///
/// 24 bytes per vertex; the attribute pointers set by the draw routine are
/// derived from this layout.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub normal: [i16; 3],
    pub text: [i16; 2],
    _pad: i16,
}

impl Vertex {
    pub fn new(pos: [f32; 3], normal: [i16; 3], text: [i16; 2]) -> Self {
        Self { pos, normal, text, _pad: 0 }
    }

    /// Packs a float normal and UV (both expected in [-1, 1]) into shorts.
    pub fn pack(pos: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self::new(
            pos.to_array(),
            normal.to_array().map(to_snorm16),
            uv.to_array().map(to_snorm16),
        )
    }
}

fn to_snorm16(v: f32) -> i16 {
    (v.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16
}

/// Vertex used by the 2D sprite paths (HUD text, colorless sprites).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteVertex {
    pub pos: [f32; 2],
    pub text: [f32; 2],
}

/// Geometry uploaded to the GPU: a vertex buffer of [`Vertex`] and an
/// index buffer of `u16`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Mesh {
    pub vertex_buffer: BufferId,
    pub index_buffer: BufferId,
    pub num_indices: u32,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Material {
    pub diffuse: Option<TextureId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub matrix: Mat4,
    pub mesh: Option<Mesh>,
    pub material: Option<Material>,
    pub num_indices: u32,
}

impl Entity {
    /// Entity drawing all indices of `mesh`.
    pub fn new(matrix: Mat4, mesh: Mesh, material: Material) -> Self {
        Self {
            matrix,
            mesh: Some(mesh),
            material: Some(material),
            num_indices: mesh.num_indices,
        }
    }

    pub fn is_drawable(&self) -> bool {
        self.num_indices > 0 && self.mesh.is_some()
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self {
            matrix: Mat4::IDENTITY,
            mesh: None,
            material: None,
            num_indices: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Player {
    pub entity: Entity,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TextureFormat {
    Rgb,
    Rgba,
}

impl TextureFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            TextureFormat::Rgb => 3,
            TextureFormat::Rgba => 4,
        }
    }
}

/// A texture as the engine holds it.
///
/// `data` is the CPU-side pixel buffer. Uploading moves it to the GPU and
/// drops it, so an uploaded texture has `data == None` and `id == Some(..)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub id: Option<TextureId>,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub data: Option<Vec<u8>>,
}

impl Texture {
    pub fn new(width: u32, height: u32, format: TextureFormat, data: Vec<u8>) -> Self {
        Self {
            id: None,
            width,
            height,
            format,
            data: Some(data),
        }
    }

    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.format.bytes_per_pixel()
    }
}

/// Perspective camera. `fov` is the vertical field of view in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub fov: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    /// Right-handed look-at from `position` towards `position + forward`.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward, self.up)
    }

    /// GL clip-space perspective (depth in [-1, 1]).
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.z_near, self.z_far)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            fov: 60.0,
            aspect: 4.0 / 3.0,
            z_near: 1.0,
            z_far: 1000.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 100.0, 100.0),
            ambient: Vec3::splat(0.3),
            diffuse: Vec3::splat(0.7),
        }
    }
}

/// Everything the entity pass draws in one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct World {
    pub camera: Camera,
    pub light: Light,
    pub map: Vec<Entity>,
    pub players: Vec<Player>,
}
