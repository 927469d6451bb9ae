use crate::device::{CpuDescriptorHandle, GpuDescriptorHandle};

/// Contiguous block of a shader-visible heap: CBVs first, then SRVs.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DescriptorRegion {
    pub cpu_start: CpuDescriptorHandle,
    pub gpu_start: GpuDescriptorHandle,
    pub cbv_count: u32,
    pub srv_count: u32,
    /// Captured from the device that created the heap.
    pub increment_size: u32,
}

impl DescriptorRegion {
    #[inline]
    pub fn total(&self) -> u32 {
        self.cbv_count + self.srv_count
    }

    #[inline]
    pub fn srv_cpu_start(&self) -> CpuDescriptorHandle {
        self.cpu_start.offset(self.cbv_count, self.increment_size)
    }

    #[inline]
    pub fn srv_gpu_start(&self) -> GpuDescriptorHandle {
        self.gpu_start.offset(self.cbv_count, self.increment_size)
    }

    #[inline]
    pub fn cbv_cpu(&self, index: u32) -> CpuDescriptorHandle {
        self.cpu_start.offset(index, self.increment_size)
    }

    #[inline]
    pub fn cbv_gpu(&self, index: u32) -> GpuDescriptorHandle {
        self.gpu_start.offset(index, self.increment_size)
    }
}

/// Run of consecutive descriptors handed out by one bind call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DescriptorRange {
    pub cpu_start: CpuDescriptorHandle,
    pub gpu_start: GpuDescriptorHandle,
    pub count: u32,
    pub increment_size: u32,
}

impl DescriptorRange {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn cpu(&self, index: u32) -> CpuDescriptorHandle {
        self.cpu_start.offset(index, self.increment_size)
    }

    #[inline]
    pub fn gpu(&self, index: u32) -> GpuDescriptorHandle {
        self.gpu_start.offset(index, self.increment_size)
    }

    /// First handles past the end of the range.
    #[inline]
    pub fn end(&self) -> (CpuDescriptorHandle, GpuDescriptorHandle) {
        (self.cpu(self.count), self.gpu(self.count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(cbv: u32, srv: u32, inc: u32) -> DescriptorRegion {
        DescriptorRegion {
            cpu_start: CpuDescriptorHandle(1000),
            gpu_start: GpuDescriptorHandle(9000),
            cbv_count: cbv,
            srv_count: srv,
            increment_size: inc,
        }
    }

    #[test]
    fn srv_block_follows_cbv_block() {
        let r = region(25, 5, 32);
        assert_eq!(r.srv_cpu_start(), CpuDescriptorHandle(1000 + 25 * 32));
        assert_eq!(r.srv_gpu_start(), GpuDescriptorHandle(9000 + 25 * 32));
        assert_eq!(r.total(), 30);
    }

    #[test]
    fn no_cbvs_means_srvs_start_at_region_start() {
        let r = region(0, 1, 64);
        assert_eq!(r.srv_cpu_start(), r.cpu_start);
        assert_eq!(r.srv_gpu_start(), r.gpu_start);
    }

    #[test]
    fn cbv_handles_step_by_increment() {
        let r = region(4, 0, 48);
        assert_eq!(r.cbv_gpu(3), GpuDescriptorHandle(9000 + 3 * 48));
        assert_eq!(r.cbv_cpu(0), r.cpu_start);
    }

    #[test]
    fn range_end_is_one_past_last() {
        let range = DescriptorRange {
            cpu_start: CpuDescriptorHandle(0),
            gpu_start: GpuDescriptorHandle(100),
            count: 3,
            increment_size: 32,
        };
        assert_eq!(range.end(), (CpuDescriptorHandle(96), GpuDescriptorHandle(196)));
        assert_eq!(range.gpu(1), GpuDescriptorHandle(132));
    }
}
