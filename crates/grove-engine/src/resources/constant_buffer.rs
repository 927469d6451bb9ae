use std::marker::PhantomData;
use std::ops::Range;

use bytemuck::Pod;

use crate::device::{Buffer, BufferDesc, Device, DeviceError, HeapType, ResourceState};

/// Constant buffer views must start on 256-byte boundaries.
pub const CONSTANT_BUFFER_ALIGNMENT: u64 = 256;

/// Rounds `size` up to the constant buffer alignment.
#[inline]
pub const fn aligned_stride(size: u64) -> u64 {
    (size + CONSTANT_BUFFER_ALIGNMENT - 1) & !(CONSTANT_BUFFER_ALIGNMENT - 1)
}

/// Upload-heap buffer holding `count` aligned slots of `T`.
#[derive(Debug)]
pub struct ConstantBufferBlock<T: Pod> {
    buffer: Buffer,
    count: u32,
    stride: u64,
    _marker: PhantomData<T>,
}

impl<T: Pod> ConstantBufferBlock<T> {
    pub fn new(device: &Device, label: &'static str, count: u32) -> Result<Self, DeviceError> {
        let stride = aligned_stride(size_of::<T>() as u64);
        let buffer = device.create_buffer(&BufferDesc {
            label,
            size: stride * count as u64,
            heap: HeapType::Upload,
            initial_state: ResourceState::GenericRead,
        })?;
        Ok(Self {
            buffer,
            count,
            stride,
            _marker: PhantomData,
        })
    }

    #[inline]
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// Byte range of slot `index` inside the buffer.
    #[inline]
    pub fn slot_range(&self, index: u32) -> Range<u64> {
        let start = index as u64 * self.stride;
        start..start + size_of::<T>() as u64
    }

    #[inline]
    pub fn gpu_address(&self, index: u32) -> u64 {
        self.buffer.gpu_address() + index as u64 * self.stride
    }

    /// Writes `value` into slot `index`; neighbouring slots are untouched.
    pub fn write(&self, index: u32, value: &T) -> Result<(), DeviceError> {
        if index >= self.count {
            return Err(DeviceError::WriteOutOfBounds {
                offset: index as u64 * self.stride,
                len: size_of::<T>() as u64,
                size: self.buffer.size(),
            });
        }
        self.buffer
            .write(self.slot_range(index).start, bytemuck::bytes_of(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingDevice;

    #[repr(C)]
    #[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
    struct Tint {
        rgba: [f32; 4],
    }

    #[test]
    fn stride_rounds_up_to_256() {
        assert_eq!(aligned_stride(0), 0);
        assert_eq!(aligned_stride(1), 256);
        assert_eq!(aligned_stride(64), 256);
        assert_eq!(aligned_stride(256), 256);
        assert_eq!(aligned_stride(257), 512);
    }

    #[test]
    fn write_touches_only_its_slot() {
        let (rec, device) = RecordingDevice::shared(32);
        let block = ConstantBufferBlock::<Tint>::new(&device, "tint", 3).unwrap();
        assert_eq!(block.buffer().size(), 768);

        block.write(1, &Tint { rgba: [1.0; 4] }).unwrap();

        let bytes = rec.buffer_contents(block.buffer().id()).unwrap();
        assert!(bytes[..256].iter().all(|b| *b == 0));
        let slot: &[f32] = bytemuck::cast_slice(&bytes[256..272]);
        assert_eq!(slot, &[1.0; 4]);
        assert!(bytes[272..].iter().all(|b| *b == 0));
    }

    #[repr(C)]
    #[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
    struct FullSlot {
        bytes: [u8; 256],
    }

    #[repr(C)]
    #[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
    struct OverSlot {
        bytes: [u8; 256],
        tail: u8,
    }

    #[test]
    fn struct_filling_a_slot_keeps_one_slot_stride() {
        let (rec, device) = RecordingDevice::shared(32);
        let block = ConstantBufferBlock::<FullSlot>::new(&device, "full", 3).unwrap();
        assert_eq!(block.stride(), 256);

        block.write(1, &FullSlot { bytes: [0xab; 256] }).unwrap();

        let bytes = rec.buffer_contents(block.buffer().id()).unwrap();
        assert!(bytes[..256].iter().all(|b| *b == 0));
        assert!(bytes[256..512].iter().all(|b| *b == 0xab));
        assert!(bytes[512..].iter().all(|b| *b == 0));
    }

    #[test]
    fn struct_past_a_slot_takes_two() {
        let (rec, device) = RecordingDevice::shared(32);
        let block = ConstantBufferBlock::<OverSlot>::new(&device, "over", 3).unwrap();
        assert_eq!(block.stride(), 512);
        assert_eq!(block.buffer().size(), 1536);

        block.write(0, &OverSlot { bytes: [1; 256], tail: 2 }).unwrap();
        block.write(1, &OverSlot { bytes: [3; 256], tail: 4 }).unwrap();

        let bytes = rec.buffer_contents(block.buffer().id()).unwrap();
        assert_eq!(bytes[256], 2);
        assert!(bytes[257..512].iter().all(|b| *b == 0));
        assert!(bytes[512..768].iter().all(|b| *b == 3));
        assert_eq!(bytes[768], 4);
        assert!(bytes[769..].iter().all(|b| *b == 0));
    }

    #[test]
    fn write_past_count_is_rejected() {
        let (_rec, device) = RecordingDevice::shared(32);
        let block = ConstantBufferBlock::<Tint>::new(&device, "tint", 2).unwrap();
        assert!(matches!(
            block.write(2, &Tint { rgba: [0.0; 4] }),
            Err(DeviceError::WriteOutOfBounds { .. })
        ));
    }

    #[test]
    fn gpu_address_steps_by_stride() {
        let (_rec, device) = RecordingDevice::shared(32);
        let block = ConstantBufferBlock::<Tint>::new(&device, "tint", 4).unwrap();
        assert_eq!(block.gpu_address(3) - block.gpu_address(0), 768);
    }
}
