/// WGSL shader for the pyramid: per-vertex color, one projection-view matrix.
pub const BASE_SHADER: &str = r#"
struct Transformations {
    pvm: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> transformations: Transformations;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = transformations.pvm * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, 1.0);
}
"#;
