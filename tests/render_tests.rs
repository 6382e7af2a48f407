mod support;

use meshcleave::{
    Mesh, Plane, Slicer,
    render::RenderBuffers,
    segment::palette_color,
    triangulated::Triangulated3D,
};

#[test]
fn buffers_concatenate_segments_with_offsets() {
    let mut slicer = Slicer::new(Mesh::cube(2.0));
    slicer.slice(&[Plane::new(0.0, 1.0, 0.0, 0.0)]).unwrap();
    let buffers = RenderBuffers::from(&slicer);

    let segments = slicer.segments();
    let first_vertices = segments[0].vertex_count();
    assert_eq!(buffers.vertices.len(), first_vertices + segments[1].vertex_count());
    assert_eq!(buffers.triangle_count(), 28);
    assert_eq!(buffers.ranges.len(), 2);

    let second = buffers.ranges[1];
    assert_eq!(second.base_vertex as usize, first_vertices);
    assert_eq!(second.first_index, segments[0].indices().len());
    assert_eq!(buffers.indices[second.first_index], segments[1].indices()[0] + second.base_vertex);
    assert!(buffers.indices.iter().all(|&i| (i as usize) < buffers.vertices.len()));
}

#[test]
fn segment_color_replaces_vertex_color() {
    let mut slicer = Slicer::new(Mesh::cube(2.0));
    slicer.slice(&[Plane::new(0.0, 0.0, 1.0, 0.0)]).unwrap();
    let buffers = RenderBuffers::from_segments(slicer.segments());

    let red = palette_color(0);
    let green = palette_color(1);
    let split = buffers.ranges[1].base_vertex as usize;
    let red = [red.x as f32, red.y as f32, red.z as f32];
    let green = [green.x as f32, green.y as f32, green.z as f32];
    assert!(buffers.vertices[..split].iter().all(|v| v.color == red));
    assert!(buffers.vertices[split..].iter().all(|v| v.color == green));
}

#[test]
fn empty_slicer_gives_empty_buffers() {
    let buffers = RenderBuffers::from(&Slicer::default());
    assert!(buffers.is_empty());
    assert!(buffers.vertices.is_empty());
}

#[test]
fn triangle_visitors_agree() {
    let mesh = Mesh::cube(2.0);
    assert_eq!(mesh.count_triangles(), 12);

    let mut slicer = Slicer::new(mesh);
    slicer.slice(&[Plane::new(1.0, 0.0, 0.0, 0.0)]).unwrap();
    assert_eq!(slicer.count_triangles(), 28);
    assert_eq!(slicer.segments()[0].count_triangles(), slicer.segments()[0].triangle_count());
}
