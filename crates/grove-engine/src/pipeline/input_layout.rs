use wgpu::VertexFormat;

/// Rate at which an input element advances.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputRate {
    PerVertex,
    PerInstance { step_rate: u32 },
}

/// One vertex attribute as seen by the vertex shader.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InputElement {
    pub semantic: &'static str,
    pub semantic_index: u32,
    pub format: VertexFormat,
    pub input_slot: u32,
    /// Byte offset inside the vertex of `input_slot`.
    pub offset: u32,
    pub rate: InputRate,
}

impl InputElement {
    #[inline]
    pub fn size(&self) -> u32 {
        self.format.size() as u32
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.offset + self.size()
    }
}

/// Ordered input-element list.
///
/// Empty for passes that generate their vertices in the shader.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputLayout {
    elements: Vec<InputElement>,
}

impl InputLayout {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Layout with explicit offsets, taken as given.
    pub fn from_elements(elements: Vec<InputElement>) -> Self {
        Self { elements }
    }

    #[inline]
    pub fn builder() -> InputLayoutBuilder {
        InputLayoutBuilder::default()
    }

    #[inline]
    pub fn elements(&self) -> &[InputElement] {
        &self.elements
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Size in bytes of one vertex in `slot`.
    pub fn stride(&self, slot: u32) -> u32 {
        self.elements
            .iter()
            .filter(|e| e.input_slot == slot)
            .map(InputElement::end)
            .max()
            .unwrap_or(0)
    }

    /// Returns the first pair of elements in the same slot whose bytes overlap.
    pub fn find_overlap(&self) -> Option<(&InputElement, &InputElement)> {
        for (i, a) in self.elements.iter().enumerate() {
            for b in &self.elements[i + 1..] {
                if a.input_slot == b.input_slot && a.offset < b.end() && b.offset < a.end() {
                    return Some((a, b));
                }
            }
        }
        None
    }
}

/// Appends elements at the next free offset of their slot.
#[derive(Debug, Default)]
pub struct InputLayoutBuilder {
    elements: Vec<InputElement>,
}

impl InputLayoutBuilder {
    /// Per-vertex element in slot 0.
    pub fn element(self, semantic: &'static str, semantic_index: u32, format: VertexFormat) -> Self {
        self.element_in_slot(0, semantic, semantic_index, format, InputRate::PerVertex)
    }

    pub fn element_in_slot(
        mut self,
        input_slot: u32,
        semantic: &'static str,
        semantic_index: u32,
        format: VertexFormat,
        rate: InputRate,
    ) -> Self {
        let offset = self
            .elements
            .iter()
            .filter(|e| e.input_slot == input_slot)
            .map(InputElement::end)
            .max()
            .unwrap_or(0);

        self.elements.push(InputElement {
            semantic,
            semantic_index,
            format,
            input_slot,
            offset,
            rate,
        });
        self
    }

    pub fn build(self) -> InputLayout {
        InputLayout {
            elements: self.elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_appended() {
        let layout = InputLayout::builder()
            .element("POSITION", 0, VertexFormat::Float32x3)
            .element("COLOR", 0, VertexFormat::Float32x4)
            .element("TEXCOORD", 0, VertexFormat::Float32x2)
            .element("TEXCOORD", 1, VertexFormat::Float32x2)
            .build();

        let offsets: Vec<u32> = layout.elements().iter().map(|e| e.offset).collect();
        assert_eq!(offsets, vec![0, 12, 28, 36]);
        assert_eq!(layout.stride(0), 44);
        assert!(layout.find_overlap().is_none());
    }

    #[test]
    fn slots_have_independent_offsets() {
        let layout = InputLayout::builder()
            .element("POSITION", 0, VertexFormat::Float32x3)
            .element_in_slot(1, "WORLD", 0, VertexFormat::Float32x4, InputRate::PerInstance {
                step_rate: 1,
            })
            .build();

        assert_eq!(layout.elements()[1].offset, 0);
        assert_eq!(layout.stride(1), 16);
    }

    #[test]
    fn overlapping_explicit_offsets_are_found() {
        let pos = InputElement {
            semantic: "POSITION",
            semantic_index: 0,
            format: VertexFormat::Float32x3,
            input_slot: 0,
            offset: 0,
            rate: InputRate::PerVertex,
        };
        let uv = InputElement {
            semantic: "TEXCOORD",
            offset: 8,
            format: VertexFormat::Float32x2,
            ..pos
        };
        let layout = InputLayout::from_elements(vec![pos, uv]);
        let (a, b) = layout.find_overlap().unwrap();
        assert_eq!((a.semantic, b.semantic), ("POSITION", "TEXCOORD"));
    }

    #[test]
    fn empty_layout_has_zero_stride() {
        let layout = InputLayout::empty();
        assert!(layout.is_empty());
        assert_eq!(layout.stride(0), 0);
    }
}
