//! Per-chunk draw command records for indirect rendering.
//!
//! Every chunk owns a fixed slot in one shared geometry buffer. The slot is assigned
//! at creation and never moves, so the record only changes its vertex count.

use super::vertex::BlockVertex;

/// Where a chunk's geometry lives in the shared buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawCommand {
    /// Number of valid vertices in the slot
    pub vertex_count: u32,
    /// Always 1: each chunk is drawn once
    pub instance_count: u32,
    /// Byte offset of the slot in the shared geometry buffer
    pub byte_offset: u32,
    /// Always 0; slots are told apart by their first vertex alone
    pub base_instance: u32,
}

impl DrawCommand {
    /// Builds the record for buffer slot `slot`.
    ///
    /// # Arguments
    /// * `slot` - Index of the chunk in creation order
    /// * `max_vertices_per_chunk` - Capacity of every slot
    ///
    /// # Returns
    /// `None` if the offset does not fit the 32-bit record.
    pub fn for_slot(slot: usize, max_vertices_per_chunk: usize) -> Option<Self> {
        let byte_offset = slot
            .checked_mul(max_vertices_per_chunk)?
            .checked_mul(BlockVertex::SIZE)?;
        Some(DrawCommand {
            vertex_count: 0,
            instance_count: 1,
            byte_offset: u32::try_from(byte_offset).ok()?,
            base_instance: 0,
        })
    }

    /// Index of the slot's first vertex in the shared buffer.
    pub fn first_vertex(&self) -> u32 {
        self.byte_offset / BlockVertex::SIZE as u32
    }

    /// The record in the layout `draw_indirect` reads.
    pub fn to_indirect_args(&self) -> wgpu::util::DrawIndirectArgs {
        wgpu::util::DrawIndirectArgs {
            vertex_count: self.vertex_count,
            instance_count: self.instance_count,
            first_vertex: self.first_vertex(),
            first_instance: self.base_instance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_slot_times_capacity() {
        let command = DrawCommand::for_slot(3, 1000).unwrap();
        assert_eq!(command.byte_offset, 3 * 1000 * 36);
        assert_eq!(command.first_vertex(), 3000);
        assert_eq!(command.instance_count, 1);
        assert_eq!(command.base_instance, 0);
    }

    #[test]
    fn oversized_offsets_are_rejected() {
        assert!(DrawCommand::for_slot(1 << 20, 98_304).is_none());
    }

    #[test]
    fn indirect_args_carry_the_vertex_count() {
        let mut command = DrawCommand::for_slot(2, 10).unwrap();
        command.vertex_count = 6;
        let args = command.to_indirect_args();
        assert_eq!(args.vertex_count, 6);
        assert_eq!(args.first_vertex, 20);
        assert_eq!(args.first_instance, 0);
    }
}
