use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};

use crate::device::GpuDescriptorHandle;
use crate::resources::{Handle, Material};

use super::Mesh;

/// Per-object constants as read by the shaders.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ObjectConstants {
    /// Transposed world matrix.
    pub world: [[f32; 4]; 4],
}

impl ObjectConstants {
    pub fn from_world(world: &Mat4) -> Self {
        Self {
            world: world.transpose().to_cols_array_2d(),
        }
    }
}

/// One camera-facing quad of an instanced foliage set.
#[derive(Debug, Clone, PartialEq)]
pub struct BillboardInstance {
    pub world: Mat4,
    /// Constant-buffer slot, equal to the instance index.
    pub slot: u32,
    /// Byte offset of the slot in the constant block.
    pub constants_offset: u64,
    /// GPU handle of the slot's constant buffer view.
    pub cbv_gpu: GpuDescriptorHandle,
    pub mesh: Handle<Box<dyn Mesh>>,
    pub material: Handle<Material>,
}

impl BillboardInstance {
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.world.w_axis.truncate()
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.world.w_axis = position.extend(1.0);
    }

    /// Turns the quad toward `target`, rotating only around `up`.
    ///
    /// Leaves the orientation alone when `target` lies on the up axis through
    /// the instance.
    pub fn set_look_at(&mut self, target: Vec3, up: Vec3) {
        let up = up.normalize_or_zero();
        if up == Vec3::ZERO {
            return;
        }
        let to_target = target - self.position();
        let look = (to_target - up * to_target.dot(up)).normalize_or_zero();
        if look == Vec3::ZERO {
            return;
        }
        let right = up.cross(look);

        self.world.x_axis = right.extend(0.0);
        self.world.y_axis = up.extend(0.0);
        self.world.z_axis = look.extend(0.0);
        debug_assert_eq!(self.world.w_axis.w, 1.0);
    }

    #[inline]
    pub fn constants(&self) -> ObjectConstants {
        ObjectConstants::from_world(&self.world)
    }

    /// Axes of the world matrix, for inspection.
    pub fn axes(&self) -> [Vec4; 3] {
        [self.world.x_axis, self.world.y_axis, self.world.z_axis]
    }
}
