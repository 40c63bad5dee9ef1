//! GPU instance data for follower labels

use bytemuck::{Pod, Zeroable};
use glam::DMat4;

/// Label instance data - passed as vertex instance
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LabelInstance {
    /// Column-major model matrix
    pub transform: [[f32; 4]; 4],
    /// 1.0 when drawn, 0.0 when culled
    pub visible: f32,
    /// Padding for 16-byte alignment
    pub _pad: [f32; 3],
}

impl Default for LabelInstance {
    fn default() -> Self {
        Self {
            transform: DMat4::IDENTITY.as_mat4().to_cols_array_2d(),
            visible: 1.0,
            _pad: [0.0; 3],
        }
    }
}

impl LabelInstance {
    /// Pack a follower matrix and visibility flag
    pub fn new(transform: &DMat4, visible: bool) -> Self {
        Self {
            transform: transform.as_mat4().to_cols_array_2d(),
            visible: if visible { 1.0 } else { 0.0 },
            _pad: [0.0; 3],
        }
    }
}
