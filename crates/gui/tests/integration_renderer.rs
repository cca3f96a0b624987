//! Integration tests for the renderer against the recording backend.

use std::sync::Arc;

use c3d_gui_lib::harness::{Failure, GlCall, RecordingBackend};
use c3d_gui_lib::render::{
    camera_matrices, Primitive, Renderer, RendererError, RendererState, ShaderStage,
};
use glam::Vec3;
use pretty_assertions::assert_eq;
use shared::Color;

const TRIANGLE: [Vec3; 3] = [
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(1.0, 0.0, 0.0),
];

fn ready_renderer() -> Renderer<RecordingBackend> {
    let mut r = Renderer::new(RecordingBackend::new());
    r.initialize().unwrap();
    r.backend().clear_calls();
    r
}

#[test]
fn test_initialize_creates_program_and_buffers() {
    let mut r = Renderer::new(RecordingBackend::new());
    assert_eq!(r.state(), RendererState::Uninitialized);

    r.initialize().unwrap();

    assert_eq!(r.state(), RendererState::Ready);
    // program + vao + vbo, shaders already released
    assert_eq!(r.backend().live_objects(), 3);
}

#[test]
fn test_initialize_twice_is_noop() {
    let mut r = Renderer::new(RecordingBackend::new());
    r.initialize().unwrap();
    let before = r.backend().calls().len();

    r.initialize().unwrap();
    assert_eq!(r.backend().calls().len(), before);
}

#[test]
fn test_draw_triangle_fill_then_outline() {
    let r = ready_renderer();
    r.draw_triangle(&TRIANGLE, Color::white(), Some(Color::red()));

    let b = r.backend();
    assert_eq!(
        b.draws(),
        vec![(Primitive::Triangles, 3), (Primitive::LineLoop, 3)]
    );
    assert_eq!(b.uploads(), vec![TRIANGLE.to_vec(), TRIANGLE.to_vec()]);

    let colors: Vec<Color> = b
        .calls()
        .iter()
        .filter_map(|c| match c {
            GlCall::UniformColor { color, .. } => Some(*color),
            _ => None,
        })
        .collect();
    assert_eq!(colors, vec![Color::red(), Color::white()]);
    assert_eq!(b.calls().last(), Some(&GlCall::UnbindVertexArray));
}

#[test]
fn test_draw_triangle_outline_only() {
    let r = ready_renderer();
    r.draw_triangle(&TRIANGLE, Color::green(), None);

    assert_eq!(r.backend().draws(), vec![(Primitive::LineLoop, 3)]);
    assert_eq!(r.backend().last_color("color"), Some(Color::green()));
}

#[test]
fn test_draw_triangle_too_few_vertices() {
    let r = ready_renderer();
    r.draw_triangle(&TRIANGLE[..2], Color::white(), Some(Color::red()));
    r.draw_triangle(&[], Color::white(), None);

    assert!(r.backend().calls().is_empty());
}

#[test]
fn test_draw_triangle_uses_every_vertex() {
    let r = ready_renderer();
    let quad = [TRIANGLE[0], TRIANGLE[1], TRIANGLE[2], Vec3::new(0.0, -1.0, 0.0)];
    r.draw_triangle(&quad, Color::white(), None);

    assert_eq!(r.backend().draws(), vec![(Primitive::LineLoop, 4)]);
}

#[test]
fn test_draw_line() {
    let r = ready_renderer();
    let start = Vec3::new(-1.0, -1.0, 0.0);
    let end = Vec3::new(1.0, 1.0, 0.0);
    r.draw_line(start, end, Color::blue());

    assert_eq!(r.backend().uploads(), vec![vec![start, end]]);
    assert_eq!(r.backend().draws(), vec![(Primitive::Lines, 2)]);
    assert_eq!(r.backend().last_color("color"), Some(Color::blue()));
}

#[test]
fn test_draw_points() {
    let r = ready_renderer();
    let points = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z, Vec3::ONE];
    r.draw_points(&points, Color::white());

    assert_eq!(r.backend().draws(), vec![(Primitive::Points, 5)]);
}

#[test]
fn test_draw_points_empty() {
    let r = ready_renderer();
    r.draw_points(&[], Color::white());
    assert!(r.backend().calls().is_empty());
}

#[test]
fn test_draws_before_initialize_are_ignored() {
    let r = Renderer::new(RecordingBackend::new());
    r.draw_triangle(&TRIANGLE, Color::white(), Some(Color::red()));
    r.draw_line(Vec3::ZERO, Vec3::X, Color::white());
    r.draw_points(&TRIANGLE, Color::white());
    r.set_projection();

    assert!(r.backend().calls().is_empty());
}

#[test]
fn test_begin_frame_clears_and_enables_depth_test() {
    let r = ready_renderer();
    r.begin_frame();
    r.end_frame();
    assert_eq!(
        r.backend().calls(),
        vec![GlCall::Clear(Color::black()), GlCall::EnableDepthTest]
    );
}

#[test]
fn test_set_viewport_updates_canvas_and_projection() {
    let mut r = ready_renderer();
    r.set_viewport(800, 600);

    assert_eq!(r.canvas().width(), 800);
    assert_eq!(r.canvas().height(), 600);
    assert!((r.canvas().aspect_ratio() - 800.0 / 600.0).abs() < 1e-6);

    let b = r.backend();
    assert_eq!(
        b.calls().first(),
        Some(&GlCall::Viewport { x: 0, y: 0, width: 800, height: 600 })
    );

    let (projection, view, model) = camera_matrices(r.canvas());
    assert_eq!(b.last_mat4("projection"), Some(projection));
    assert_eq!(b.last_mat4("view"), Some(view));
    assert_eq!(b.last_mat4("model"), Some(model));
}

#[test]
fn test_set_viewport_zero_height() {
    let mut r = ready_renderer();
    r.set_viewport(640, 0);
    assert_eq!(r.canvas().aspect_ratio(), 1.0);
}

#[test]
fn test_vertex_compile_failure() {
    let mut r = Renderer::new(RecordingBackend::failing(Failure::Compile(ShaderStage::Vertex)));
    let err = r.initialize().unwrap_err();

    assert!(matches!(
        err,
        RendererError::ShaderCompile { stage: ShaderStage::Vertex, .. }
    ));
    assert_eq!(r.state(), RendererState::Uninitialized);
    assert_eq!(r.backend().live_objects(), 0);
}

#[test]
fn test_fragment_compile_failure_releases_vertex_shader() {
    let mut r = Renderer::new(RecordingBackend::failing(Failure::Compile(ShaderStage::Fragment)));
    let err = r.initialize().unwrap_err();

    assert!(matches!(
        err,
        RendererError::ShaderCompile { stage: ShaderStage::Fragment, .. }
    ));
    assert_eq!(r.backend().live_objects(), 0);
    assert!(err.to_string().contains("fragment"));
}

#[test]
fn test_link_failure_releases_shaders() {
    let mut r = Renderer::new(RecordingBackend::failing(Failure::Link));
    let err = r.initialize().unwrap_err();

    assert!(matches!(err, RendererError::ProgramLink { .. }));
    assert_eq!(r.backend().live_objects(), 0);

    // later draws are no-ops
    r.draw_triangle(&TRIANGLE, Color::white(), Some(Color::red()));
    assert!(r.backend().draws().is_empty());
}

#[test]
fn test_resource_failures_release_program() {
    for failure in [Failure::VertexArray, Failure::Buffer] {
        let mut r = Renderer::new(RecordingBackend::failing(failure));
        let err = r.initialize().unwrap_err();

        assert!(matches!(err, RendererError::Resource(_)), "{failure:?}");
        assert_eq!(r.backend().live_objects(), 0, "{failure:?}");
        assert_eq!(r.state(), RendererState::Uninitialized);
    }
}

#[test]
fn test_empty_shader_source_fails() {
    let mut r = Renderer::new(RecordingBackend::new());
    let err = r.initialize_with_sources("", "void main() {}").unwrap_err();
    assert!(matches!(err, RendererError::ShaderCompile { .. }));
}

#[test]
fn test_cleanup_is_idempotent() {
    let mut r = Renderer::new(RecordingBackend::new());
    r.initialize().unwrap();

    r.cleanup();
    r.cleanup();

    let b = r.backend();
    assert_eq!(r.state(), RendererState::Destroyed);
    assert_eq!(b.live_objects(), 0);
    let deletes = b
        .calls()
        .iter()
        .filter(|c| {
            matches!(
                c,
                GlCall::DeleteProgram(_) | GlCall::DeleteVertexArray(_) | GlCall::DeleteBuffer(_)
            )
        })
        .count();
    assert_eq!(deletes, 3);
}

#[test]
fn test_cleanup_before_initialize() {
    let mut r = Renderer::new(RecordingBackend::new());
    r.cleanup();
    assert_eq!(r.state(), RendererState::Destroyed);
    assert!(r.backend().calls().is_empty());
}

#[test]
fn test_initialize_after_cleanup_fails() {
    let mut r = Renderer::new(RecordingBackend::new());
    r.initialize().unwrap();
    r.cleanup();

    assert_eq!(r.initialize(), Err(RendererError::Destroyed));

    r.backend().clear_calls();
    r.draw_line(Vec3::ZERO, Vec3::X, Color::white());
    assert!(r.backend().calls().is_empty());
}

#[test]
fn test_drop_releases_resources() {
    let backend = Arc::new(RecordingBackend::new());
    {
        let mut r = Renderer::new(backend.clone());
        r.initialize().unwrap();
        assert_eq!(backend.live_objects(), 3);
    }
    assert_eq!(backend.live_objects(), 0);
}
