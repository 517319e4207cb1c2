//! Scene math: vectors, object transforms, bounds, camera and lights.

use crate::error::{CoreError, Result};

/// 3D vector
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const ONE: Vec3 = Vec3::new(1.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// All three components set to `v`
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    pub fn sub(&self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn min(&self, other: Vec3) -> Vec3 {
        Vec3::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    pub fn max(&self, other: Vec3) -> Vec3 {
        Vec3::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    pub fn max_element(&self) -> f32 {
        self.x.max(self.y).max(self.z)
    }
}

/// Position, Euler rotation (radians, XYZ order) and scale of a scene object
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform3D {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform3D {
    /// Set a uniform scale
    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.scale = Vec3::splat(scale);
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centred on the origin with the given extents
    pub fn from_size(size: Vec3) -> Self {
        let half = Vec3::new(size.x / 2.0, size.y / 2.0, size.z / 2.0);
        Self::new(Vec3::ZERO.sub(half), half)
    }

    /// Smallest box containing every point
    pub fn from_points(points: &[Vec3]) -> Result<Self> {
        let (first, rest) = points.split_first().ok_or(CoreError::EmptyBounds)?;
        Ok(rest.iter().fold(Self::new(*first, *first), |acc, p| {
            Self::new(acc.min.min(*p), acc.max.max(*p))
        }))
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    pub fn size(&self) -> Vec3 {
        self.max.sub(self.min)
    }

    /// Largest extent along any axis
    pub fn max_dim(&self) -> f32 {
        self.size().max_element()
    }
}

/// Perspective camera looking down -Z at the origin
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::ZERO,
        }
    }
}

impl Camera {
    pub fn perspective(fov_deg: f32, near: f32, far: f32) -> Self {
        Self {
            fov_deg,
            near,
            far,
            ..Default::default()
        }
    }

    /// Recompute the aspect ratio for a viewport. Zero-height viewports keep
    /// the previous aspect.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Back the camera away from the origin along +Z
    pub fn set_distance(&mut self, distance: f32) {
        self.position = Vec3::new(0.0, 0.0, distance);
    }
}

/// Light type for the scene
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    Ambient,
    Directional { position: Vec3 },
    Hemisphere { position: Vec3 },
}

/// A white light with an intensity
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    /// Packed 0xRRGGBB
    pub color: u32,
    pub intensity: f32,
}

impl Light {
    pub const fn new(kind: LightKind, intensity: f32) -> Self {
        Self {
            kind,
            color: 0xffffff,
            intensity,
        }
    }

    /// Ambient, key, fill and sky lights used by the scan page
    pub fn studio_rig() -> Vec<Light> {
        vec![
            Light::new(LightKind::Ambient, 3.0),
            Light::new(
                LightKind::Directional {
                    position: Vec3::new(5.0, 10.0, 7.5),
                },
                1.0,
            ),
            Light::new(
                LightKind::Directional {
                    position: Vec3::new(-5.0, 0.0, -5.0),
                },
                3.0,
            ),
            Light::new(
                LightKind::Hemisphere {
                    position: Vec3::new(0.0, 25.0, 0.0),
                },
                2.0,
            ),
        ]
    }
}
