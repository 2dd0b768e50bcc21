use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// A contiguous slice of the index buffer drawn with one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRange {
    pub first_index: u32,
    pub index_count: u32,
}

impl DrawRange {
    pub fn indices(&self) -> std::ops::Range<u32> {
        self.first_index..self.first_index + self.index_count
    }
}

/// The base square, two triangles.
pub const BASE_RANGE: DrawRange = DrawRange {
    first_index: 0,
    index_count: 6,
};

/// The first side triangle, meeting at the apex.
pub const APEX_RANGE: DrawRange = DrawRange {
    first_index: 6,
    index_count: 3,
};

/// Draw order for one frame.
pub const FRAME_DRAWS: [DrawRange; 2] = [BASE_RANGE, APEX_RANGE];

const BASE_COLOR: [f32; 3] = [0.1, 0.8, 0.1];
const APEX_COLOR: [f32; 3] = [0.9, 0.1, 0.1];

/// Five vertices: the base square at y = -0.5, then the apex.
pub fn pyramid_vertices() -> [Vertex; 5] {
    #[rustfmt::skip]
    let vertices = [
        Vertex { position: [-0.5, -0.5, -0.5], color: BASE_COLOR }, // left back
        Vertex { position: [ 0.5, -0.5, -0.5], color: BASE_COLOR }, // right back
        Vertex { position: [ 0.5, -0.5,  0.5], color: BASE_COLOR }, // right front
        Vertex { position: [-0.5, -0.5,  0.5], color: BASE_COLOR }, // left front
        Vertex { position: [ 0.0,  0.5,  0.0], color: APEX_COLOR }, // apex
    ];
    vertices
}

pub fn pyramid_indices() -> [u32; 18] {
    #[rustfmt::skip]
    let indices = [
        0, 1, 2,  0, 2, 3, // base
        4, 0, 1,  4, 1, 2,  4, 2, 3,  4, 3, 0, // sides
    ];
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_is_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[1].shader_location, 1);
    }

    #[test]
    fn indices_reference_existing_vertices() {
        let n = pyramid_vertices().len() as u32;
        assert!(pyramid_indices().iter().all(|&i| i < n));
    }

    #[test]
    fn draw_ranges_fit_index_buffer() {
        let count = pyramid_indices().len() as u32;
        for range in FRAME_DRAWS {
            assert_eq!(range.index_count % 3, 0);
            assert!(range.indices().end <= count);
        }
        assert_eq!(FRAME_DRAWS[0], BASE_RANGE);
        assert_eq!(FRAME_DRAWS[1], APEX_RANGE);
    }

    #[test]
    fn base_is_flat_and_apex_on_top() {
        let verts = pyramid_vertices();
        let indices = pyramid_indices();
        for &i in &indices[BASE_RANGE.indices().start as usize..BASE_RANGE.indices().end as usize] {
            assert_eq!(verts[i as usize].position[1], -0.5);
        }
        let apex = &indices[APEX_RANGE.indices().start as usize..APEX_RANGE.indices().end as usize];
        assert_eq!(apex, &[4, 0, 1]);
        assert_eq!(verts[4].position, [0.0, 0.5, 0.0]);
        assert_eq!(verts[4].color, APEX_COLOR);
    }
}
