use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::device::{
    BufferDesc, ConstantBufferViewDesc, CpuDescriptorHandle, DescriptorHeapDesc, Device,
    DeviceError, GpuDescriptorHandle, GraphicsDevice, HeapType, ObjectId, RawBuffer,
    RawDescriptorHeap, ResourceId, ShaderResourceViewDesc,
};
use crate::pipeline::PipelineStateDesc;

/// Increment size reported unless configured otherwise.
pub const DEFAULT_INCREMENT_SIZE: u32 = 32;

const CPU_HEAP_BASE: u64 = 0x0010_0000;
const GPU_HEAP_BASE: u64 = 0x7f00_0000_0000;
const HEAP_SPACING: u64 = 0x0100_0000;
const BUFFER_BASE: u64 = 0x0001_0000_0000;
const BUFFER_PLACEMENT: u64 = 0x1_0000;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ObjectKind {
    DescriptorHeap,
    PipelineState,
    Buffer(HeapType),
}

/// Device call that a test can make fail once.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FailPoint {
    DescriptorHeap,
    PipelineState,
    Buffer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    CreateDescriptorHeap {
        id: ObjectId,
        descriptors: u32,
    },
    CreatePipelineState {
        id: ObjectId,
        topology: wgpu::PrimitiveTopology,
        render_targets: usize,
        has_geometry_stage: bool,
    },
    CreateBuffer {
        id: ObjectId,
        size: u64,
        heap: HeapType,
    },
    WriteBuffer {
        id: ObjectId,
        offset: u64,
        len: u64,
    },
    CreateConstantBufferView {
        desc: ConstantBufferViewDesc,
        dest: CpuDescriptorHandle,
    },
    CreateShaderResourceView {
        resource: ResourceId,
        desc: ShaderResourceViewDesc,
        dest: CpuDescriptorHandle,
    },
    Release {
        id: ObjectId,
    },
}

#[derive(Debug)]
struct LiveObject {
    kind: ObjectKind,
    contents: Vec<u8>,
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    heaps_created: u64,
    next_buffer_address: u64,
    live: BTreeMap<ObjectId, LiveObject>,
    calls: Vec<DeviceCall>,
    fail_next: Vec<FailPoint>,
}

impl State {
    fn issue(&mut self, kind: ObjectKind, size: usize) -> ObjectId {
        self.next_id += 1;
        let id = ObjectId(self.next_id);
        self.live.insert(
            id,
            LiveObject {
                kind,
                contents: vec![0; size],
            },
        );
        id
    }

    fn take_failure(&mut self, point: FailPoint) -> bool {
        match self.fail_next.iter().position(|p| *p == point) {
            Some(i) => {
                self.fail_next.remove(i);
                true
            }
            None => false,
        }
    }
}

/// In-memory backend recording every device call.
///
/// Tracks live objects and host-visible buffer contents so tests can check
/// for leaks and inspect constant writes. Used by `grove-inspect` for dry
/// runs as well.
#[derive(Debug)]
pub struct RecordingDevice {
    increment_size: u32,
    state: RefCell<State>,
}

impl Default for RecordingDevice {
    fn default() -> Self {
        Self::new(DEFAULT_INCREMENT_SIZE)
    }
}

impl RecordingDevice {
    pub fn new(increment_size: u32) -> Self {
        Self {
            increment_size,
            state: RefCell::new(State {
                next_buffer_address: BUFFER_BASE,
                ..State::default()
            }),
        }
    }

    /// Returns the recorder together with a [`Device`] front end over it.
    pub fn shared(increment_size: u32) -> (Rc<Self>, Device) {
        let recorder = Rc::new(Self::new(increment_size));
        let device = Device::new(recorder.clone());
        (recorder, device)
    }

    /// Makes the next call of the given kind fail.
    pub fn fail_next(&self, point: FailPoint) {
        self.state.borrow_mut().fail_next.push(point);
    }

    pub fn calls(&self) -> Vec<DeviceCall> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn live_objects(&self) -> usize {
        self.state.borrow().live.len()
    }

    pub fn live_objects_of(&self, kind: ObjectKind) -> usize {
        self.state
            .borrow()
            .live
            .values()
            .filter(|o| o.kind == kind)
            .count()
    }

    pub fn is_live(&self, id: ObjectId) -> bool {
        self.state.borrow().live.contains_key(&id)
    }

    /// Current contents of a live buffer.
    pub fn buffer_contents(&self, id: ObjectId) -> Option<Vec<u8>> {
        self.state.borrow().live.get(&id).map(|o| o.contents.clone())
    }
}

impl GraphicsDevice for RecordingDevice {
    fn descriptor_increment_size(&self) -> u32 {
        self.increment_size
    }

    fn create_descriptor_heap(
        &self,
        desc: &DescriptorHeapDesc,
    ) -> Result<RawDescriptorHeap, DeviceError> {
        let mut state = self.state.borrow_mut();
        if desc.descriptors == 0 || state.take_failure(FailPoint::DescriptorHeap) {
            return Err(DeviceError::DescriptorHeap {
                descriptors: desc.descriptors,
                reason: "E_INVALIDARG".into(),
            });
        }

        let n = state.heaps_created;
        state.heaps_created += 1;
        let id = state.issue(ObjectKind::DescriptorHeap, 0);
        state.calls.push(DeviceCall::CreateDescriptorHeap {
            id,
            descriptors: desc.descriptors,
        });

        Ok(RawDescriptorHeap {
            id,
            cpu_start: CpuDescriptorHandle(CPU_HEAP_BASE + n * HEAP_SPACING),
            gpu_start: GpuDescriptorHandle(GPU_HEAP_BASE + n * HEAP_SPACING),
        })
    }

    fn create_pipeline_state(&self, desc: &PipelineStateDesc<'_>) -> Result<ObjectId, DeviceError> {
        let mut state = self.state.borrow_mut();
        if state.take_failure(FailPoint::PipelineState) {
            return Err(DeviceError::PipelineState {
                label: format!("{:?}", desc.config.topology),
                reason: "E_INVALIDARG".into(),
            });
        }

        let id = state.issue(ObjectKind::PipelineState, 0);
        state.calls.push(DeviceCall::CreatePipelineState {
            id,
            topology: desc.config.topology,
            render_targets: desc.config.color_formats.len(),
            has_geometry_stage: desc.geometry.is_some(),
        });
        Ok(id)
    }

    fn create_buffer(&self, desc: &BufferDesc) -> Result<RawBuffer, DeviceError> {
        let mut state = self.state.borrow_mut();
        if desc.size == 0 || state.take_failure(FailPoint::Buffer) {
            return Err(DeviceError::Buffer {
                label: desc.label.to_owned(),
                size: desc.size,
                reason: "E_OUTOFMEMORY".into(),
            });
        }

        let gpu_address = state.next_buffer_address;
        state.next_buffer_address += desc.size.div_ceil(BUFFER_PLACEMENT) * BUFFER_PLACEMENT;

        let id = state.issue(ObjectKind::Buffer(desc.heap), desc.size as usize);
        state.calls.push(DeviceCall::CreateBuffer {
            id,
            size: desc.size,
            heap: desc.heap,
        });
        Ok(RawBuffer { id, gpu_address })
    }

    fn write_buffer(&self, buffer: ObjectId, offset: u64, data: &[u8]) -> Result<(), DeviceError> {
        let mut state = self.state.borrow_mut();
        let object = state
            .live
            .get_mut(&buffer)
            .ok_or(DeviceError::UnknownObject(buffer.0))?;

        let size = object.contents.len() as u64;
        let len = data.len() as u64;
        if offset + len > size {
            return Err(DeviceError::WriteOutOfBounds { offset, len, size });
        }
        object.contents[offset as usize..(offset + len) as usize].copy_from_slice(data);
        state.calls.push(DeviceCall::WriteBuffer {
            id: buffer,
            offset,
            len,
        });
        Ok(())
    }

    fn create_constant_buffer_view(&self, desc: &ConstantBufferViewDesc, dest: CpuDescriptorHandle) {
        self.state
            .borrow_mut()
            .calls
            .push(DeviceCall::CreateConstantBufferView { desc: *desc, dest });
    }

    fn create_shader_resource_view(
        &self,
        resource: ResourceId,
        desc: &ShaderResourceViewDesc,
        dest: CpuDescriptorHandle,
    ) {
        self.state
            .borrow_mut()
            .calls
            .push(DeviceCall::CreateShaderResourceView {
                resource,
                desc: *desc,
                dest,
            });
    }

    fn release(&self, object: ObjectId) {
        let mut state = self.state.borrow_mut();
        if state.live.remove(&object).is_none() {
            log::warn!("release of unknown object {object:?}");
        }
        state.calls.push(DeviceCall::Release { id: object });
    }
}
