//! Hands per-frame particle transforms to the host renderer

use crate::particle::ParticleStore;
use bytemuck::{Pod, Zeroable};
use eddy_core::InstanceTransform;

/// GPU instance data: one column-major model matrix.
/// 64 bytes, 4-byte aligned (4 columns of vec4).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
}

impl InstanceRaw {
    pub fn from_transform(t: &InstanceTransform) -> Self {
        Self {
            model: t.to_matrix(),
        }
    }
}

/// Pre-allocated per-frame instance data, indexed like the particle store.
///
/// The host reads either the structured transforms or the packed matrices,
/// uploads them however its pipeline wants, and checks [`take_dirty`]
/// to know whether a re-upload is needed.
///
/// [`take_dirty`]: InstanceBuffer::take_dirty
pub struct InstanceBuffer {
    transforms: Vec<InstanceTransform>,
    raw: Vec<InstanceRaw>,
    dirty: bool,
}

impl InstanceBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            transforms: Vec::with_capacity(capacity),
            raw: Vec::with_capacity(capacity),
            dirty: false,
        }
    }

    /// Overwrite the buffer with the store's current state
    pub fn pack(&mut self, store: &ParticleStore) {
        self.transforms.clear();
        self.raw.clear();

        for p in store.particles() {
            let t = p.instance();
            self.raw.push(InstanceRaw::from_transform(&t));
            self.transforms.push(t);
        }
        self.dirty = true;
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn transforms(&self) -> &[InstanceTransform] {
        &self.transforms
    }

    pub fn raw(&self) -> &[InstanceRaw] {
        &self.raw
    }

    /// Packed matrices as bytes, ready for a buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.raw)
    }

    /// Returns whether the buffer changed since the last call, and clears the flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::rng::ParticleRng;
    use glam::DVec2;

    #[test]
    fn instance_raw_layout() {
        assert_eq!(std::mem::size_of::<InstanceRaw>(), 64);
        assert_eq!(std::mem::align_of::<InstanceRaw>(), 4);
    }

    #[test]
    fn pack_preserves_order_and_sets_dirty() {
        let config = SimConfig {
            count: 3,
            ..Default::default()
        };
        let mut store = ParticleStore::new(&config, &mut ParticleRng::new(4));
        for (i, p) in store.particles_mut().iter_mut().enumerate() {
            p.position = DVec2::new(i as f64, 2.0 * i as f64);
            p.scale = 0.25;
        }

        let mut buffer = InstanceBuffer::new(3);
        assert!(!buffer.take_dirty());
        buffer.pack(&store);

        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.transforms()[2].position, [2.0, 4.0, 0.0]);
        assert_eq!(buffer.raw()[2].model[3], [2.0, 4.0, 0.0, 1.0]);
        assert_eq!(buffer.as_bytes().len(), 3 * 64);
        assert!(buffer.take_dirty());
        assert!(!buffer.take_dirty());
    }

    #[test]
    fn repacking_replaces_previous_frame() {
        let config = SimConfig {
            count: 2,
            ..Default::default()
        };
        let mut store = ParticleStore::new(&config, &mut ParticleRng::new(4));
        let mut buffer = InstanceBuffer::new(2);
        buffer.pack(&store);
        store.particles_mut()[0].position = DVec2::new(9.0, 9.0);
        buffer.pack(&store);
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.transforms()[0].position, [9.0, 9.0, 0.0]);
    }
}
