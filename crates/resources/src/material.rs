//! Material definitions.

use glam::Vec4;

use crate::ubo::MaterialUbo;

/// Lighting properties applied before a mesh is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Base color not affected by lighting
    pub ambient: Vec4,
    /// Color affected by lighting
    pub diffuse: Vec4,
    /// Highlight color
    pub specular: Vec4,
    /// Color emitted by the material
    pub emissive: Vec4,
    /// Sharpness of the highlight
    pub specular_power: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
            diffuse: Vec4::new(0.8, 0.8, 0.8, 1.0),
            specular: Vec4::ONE,
            emissive: Vec4::ZERO,
            specular_power: 40.0,
        }
    }
}

impl Material {
    /// Create a material with default properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ambient color.
    pub fn with_ambient(mut self, ambient: Vec4) -> Self {
        self.ambient = ambient;
        self
    }

    /// Set the diffuse color.
    pub fn with_diffuse(mut self, diffuse: Vec4) -> Self {
        self.diffuse = diffuse;
        self
    }

    /// Set the specular color and power.
    pub fn with_specular(mut self, specular: Vec4, power: f32) -> Self {
        self.specular = specular;
        self.specular_power = power;
        self
    }

    /// Set the emissive color.
    pub fn with_emissive(mut self, emissive: Vec4) -> Self {
        self.emissive = emissive;
        self
    }

    /// Uniform block for upload to the current draw state.
    pub fn uniforms(&self) -> MaterialUbo {
        MaterialUbo::new(self)
    }
}
