//! Spatial and common types

use crate::error::{EddyError, Result};
use serde::{Deserialize, Serialize};

/// World-space extent of the simulation, in the host's world units.
///
/// Both dimensions are positive and finite; this is checked once at
/// construction so nothing downstream has to guard against division by zero.
/// Deserializing goes through the same check.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ViewportExtent")]
pub struct Viewport {
    width: f64,
    height: f64,
}

/// Unchecked wire form of a [`Viewport`]
#[derive(Deserialize)]
struct ViewportExtent {
    width: f64,
    height: f64,
}

impl TryFrom<ViewportExtent> for Viewport {
    type Error = EddyError;

    fn try_from(extent: ViewportExtent) -> Result<Self> {
        Viewport::new(extent.width, extent.height)
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(EddyError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Size of one flow-field cell as `(cell_width, cell_height)`
    pub fn cell_size(&self, rows: usize, cols: usize) -> (f64, f64) {
        (self.width / cols as f64, self.height / rows as f64)
    }

    /// Map a pointer in normalized device coordinates (`[-1, 1]` per axis)
    /// to world space (`[0, width] x [0, height]`).
    pub fn pointer_to_world(&self, ndc: [f64; 2]) -> [f64; 2] {
        [
            (ndc[0] * 0.5 + 0.5) * self.width,
            (ndc[1] * 0.5 + 0.5) * self.height,
        ]
    }

    /// Translation a host applies to the whole instance batch so the
    /// simulation's `[0, w] x [0, h]` space is centered on screen.
    pub fn render_offset(&self) -> [f64; 3] {
        [-self.width * 0.5, -self.height * 0.5, 0.0]
    }
}

/// One particle as the renderer sees it: position, uniform scale, orientation.
///
/// `rotation` is a unit quaternion `[x, y, z, w]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstanceTransform {
    pub position: [f32; 3],
    pub scale: f32,
    pub rotation: [f32; 4],
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl InstanceTransform {
    pub const IDENTITY: Self = Self {
        position: [0.0; 3],
        scale: 1.0,
        rotation: [0.0, 0.0, 0.0, 1.0],
    };

    /// Convert to a 4x4 model matrix (column-major)
    pub fn to_matrix(&self) -> [[f32; 4]; 4] {
        let [x, y, z, w] = self.rotation;
        let s = self.scale;

        let r00 = 1.0 - 2.0 * (y * y + z * z);
        let r01 = 2.0 * (x * y - w * z);
        let r02 = 2.0 * (x * z + w * y);
        let r10 = 2.0 * (x * y + w * z);
        let r11 = 1.0 - 2.0 * (x * x + z * z);
        let r12 = 2.0 * (y * z - w * x);
        let r20 = 2.0 * (x * z - w * y);
        let r21 = 2.0 * (y * z + w * x);
        let r22 = 1.0 - 2.0 * (x * x + y * y);

        let [px, py, pz] = self.position;
        [
            [r00 * s, r10 * s, r20 * s, 0.0],
            [r01 * s, r11 * s, r21 * s, 0.0],
            [r02 * s, r12 * s, r22 * s, 0.0],
            [px, py, pz, 1.0],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialized_viewport_is_validated() {
        let viewport: Viewport = toml::from_str("width = 16.0\nheight = 9.0").unwrap();
        assert_eq!(viewport, Viewport::new(16.0, 9.0).unwrap());

        assert!(toml::from_str::<Viewport>("width = 0.0\nheight = 9.0").is_err());
        assert!(toml::from_str::<Viewport>("width = 16.0\nheight = -1.0").is_err());
    }

    #[test]
    fn viewport_rejects_non_positive() {
        assert!(Viewport::new(0.0, 10.0).is_err());
        assert!(Viewport::new(10.0, -1.0).is_err());
        assert!(Viewport::new(f64::NAN, 10.0).is_err());
        assert!(Viewport::new(f64::INFINITY, 10.0).is_err());
        assert!(Viewport::new(10.0, 5.0).is_ok());
    }

    #[test]
    fn pointer_maps_ndc_corners() {
        let vp = Viewport::new(10.0, 4.0).unwrap();
        assert_eq!(vp.pointer_to_world([-1.0, -1.0]), [0.0, 0.0]);
        assert_eq!(vp.pointer_to_world([1.0, 1.0]), [10.0, 4.0]);
        assert_eq!(vp.pointer_to_world([0.0, 0.0]), [5.0, 2.0]);
    }

    #[test]
    fn cell_size_divides_by_cols_then_rows() {
        let vp = Viewport::new(10.0, 20.0).unwrap();
        assert_eq!(vp.cell_size(4, 2), (5.0, 5.0));
    }

    #[test]
    fn render_offset_centers_viewport() {
        let vp = Viewport::new(8.0, 6.0).unwrap();
        assert_eq!(vp.render_offset(), [-4.0, -3.0, 0.0]);
    }

    #[test]
    fn identity_matrix_with_translation() {
        let t = InstanceTransform {
            position: [1.0, 2.0, 0.0],
            ..InstanceTransform::IDENTITY
        };
        let m = t.to_matrix();
        assert_eq!(m[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(m[1], [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(m[2], [0.0, 0.0, 1.0, 0.0]);
        assert_eq!(m[3], [1.0, 2.0, 0.0, 1.0]);
    }

    #[test]
    fn matrix_applies_uniform_scale_and_quarter_turn() {
        // 90 degrees about +Z
        let h = std::f32::consts::FRAC_1_SQRT_2;
        let t = InstanceTransform {
            position: [0.0; 3],
            scale: 2.0,
            rotation: [0.0, 0.0, h, h],
        };
        let m = t.to_matrix();
        // +X column maps to +Y, scaled by 2
        assert!((m[0][0]).abs() < 1e-6);
        assert!((m[0][1] - 2.0).abs() < 1e-6);
        // +Y column maps to -X
        assert!((m[1][0] + 2.0).abs() < 1e-6);
        assert!((m[2][2] - 2.0).abs() < 1e-6);
    }
}
