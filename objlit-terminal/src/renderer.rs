/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor::MoveTo,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use objlit_core::{
    algebra, project_to_screen, FlatMesh, Lighting, Mat4, Pose, Texture, Transform, Triangle,
    Vec2,
};
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Everything besides the mesh that shading one frame needs
pub struct Frame<'a> {
    pub pose: &'a Pose,
    pub projection: &'a Mat4,
    pub lighting: &'a Lighting,
    pub texture: Option<&'a Texture>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: [u8; 3],
}

const BLANK: Cell = Cell {
    glyph: ' ',
    color: [0, 0, 0],
};

/// A projected, lit triangle corner
#[derive(Debug, Clone, Copy)]
struct Corner {
    x: f32,
    y: f32,
    depth: f32,
    intensity: f32,
    uv: Option<Vec2>,
}

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![BLANK; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(BLANK);
    }

    pub fn glyph_at(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width {
            return None;
        }
        self.cells.get(y * self.width + x).map(|cell| cell.glyph)
    }

    pub fn color_at(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width {
            return None;
        }
        self.cells.get(y * self.width + x).map(|cell| cell.color)
    }

    pub fn render_mesh(&mut self, mesh: &FlatMesh, frame: &Frame<'_>) {
        let mvp = Transform::mvp_matrix(&frame.pose.model, &frame.pose.view, frame.projection);
        for triangle in mesh.triangles() {
            self.render_triangle(&triangle, &mvp, frame);
        }
    }

    fn render_triangle(&mut self, triangle: &Triangle, mvp: &Mat4, frame: &Frame<'_>) {
        let model = &frame.pose.model;
        let mut corners = [Corner {
            x: 0.0,
            y: 0.0,
            depth: 0.0,
            intensity: 0.0,
            uv: None,
        }; 3];

        for (corner, vertex) in corners.iter_mut().zip(&triangle.vertices) {
            // Triangle is clipped
            let Some(screen) =
                project_to_screen(mvp, &vertex.position, self.width as u32, self.height as u32)
            else {
                return;
            };

            // Gouraud shading in world space
            let world_position = algebra::transform_point(model, &vertex.position);
            let world_normal = model.transform_vector(&vertex.normal);
            *corner = Corner {
                x: screen.x,
                y: screen.y,
                depth: screen.depth,
                intensity: frame.lighting.intensity(&world_position, &world_normal),
                uv: vertex.tex_coord,
            };
        }

        self.rasterize_triangle(&corners, frame);
    }

    fn rasterize_triangle(&mut self, corners: &[Corner; 3], frame: &Frame<'_>) {
        let [v0, v1, v2] = *corners;

        // Bounding box
        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.x, v0.y), (v1.x, v1.y), (v2.x, v2.y), (px, py))
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                // Interpolate depth
                let depth = w0 * v0.depth + w1 * v1.depth + w2 * v2.depth;
                let idx = y as usize * self.width + x as usize;
                if depth >= self.depth_buffer[idx] {
                    continue;
                }
                self.depth_buffer[idx] = depth;

                let intensity = w0 * v0.intensity + w1 * v1.intensity + w2 * v2.intensity;
                let uv = match (v0.uv, v1.uv, v2.uv) {
                    (Some(a), Some(b), Some(c)) => Some(a * w0 + b * w1 + c * w2),
                    _ => None,
                };
                self.cells[idx] = shade(intensity, uv, frame);
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            writer.queue(MoveTo(0, y as u16))?;
            for cell in &self.cells[y * self.width..(y + 1) * self.width] {
                if current != Some(cell.color) {
                    let [r, g, b] = cell.color;
                    writer.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Pick the glyph from the light intensity and the colour from the texture
/// (white when untextured) tinted by the light colour
fn shade(intensity: f32, uv: Option<Vec2>, frame: &Frame<'_>) -> Cell {
    let intensity = intensity.clamp(0.0, 1.0);
    let char_index = (intensity * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
    let glyph = LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)];

    let base = match (frame.texture, uv) {
        (Some(texture), Some(uv)) => texture.sample(uv),
        _ => [255, 255, 255],
    };
    let tint: [f32; 3] = frame.lighting.color.into();
    let mut color = [0u8; 3];
    for ((out, channel), light) in color.iter_mut().zip(base).zip(tint) {
        *out = (channel as f32 * light.clamp(0.0, 1.0) * intensity).round() as u8;
    }

    Cell { glyph, color }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use objlit_core::{parse_obj, Camera, PointLight, Vec3};

    const FACING_QUAD: &str = "\
v -1 -1 0
v 1 -1 0
v 1 1 0
v -1 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    fn head_on_light() -> Lighting {
        Lighting {
            ambient: 0.0,
            diffuse: 1.0,
            color: Vec3::repeat(1.0),
            lights: [
                PointLight::new(Vec3::new(0.0, 0.0, 100.0), true),
                PointLight::new(Vec3::zeros(), false),
                PointLight::new(Vec3::zeros(), false),
            ],
        }
    }

    fn render(texture: Option<&Texture>) -> AsciiRenderer {
        let mesh = parse_obj(FACING_QUAD).unwrap().flatten().unwrap();
        let camera = Camera::new(40, 40);
        let pose = Pose {
            model: Mat4::identity(),
            view: camera.view_matrix().unwrap(),
        };
        let projection = camera.projection_matrix();
        let lighting = head_on_light();
        let frame = Frame {
            pose: &pose,
            projection: &projection,
            lighting: &lighting,
            texture,
        };

        let mut renderer = AsciiRenderer::new(40, 40);
        renderer.render_mesh(&mesh, &frame);
        renderer
    }

    #[test]
    fn test_barycentric_vertices() {
        let (w0, w1, w2) = barycentric((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (0.0, 0.0)).unwrap();
        assert!((w0 - 1.0).abs() < 1e-6 && w1.abs() < 1e-6 && w2.abs() < 1e-6);
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.5, 0.5)).is_none());
    }

    #[test]
    fn test_facing_quad_is_bright() {
        let renderer = render(None);
        assert_eq!(renderer.glyph_at(20, 20), Some('@'));
        assert_eq!(renderer.color_at(20, 20), Some([255, 255, 255]));
        assert_eq!(renderer.glyph_at(0, 0), Some(' '));
        assert_eq!(renderer.glyph_at(40, 0), None);
    }

    #[test]
    fn test_texture_colors_cells() {
        let texture = Texture::new(1, 1, vec![[200, 100, 0]]).unwrap();
        let renderer = render(Some(&texture));
        assert_eq!(renderer.color_at(20, 20), Some([200, 100, 0]));
    }

    #[test]
    fn test_clear_resets_cells() {
        let mut renderer = render(None);
        renderer.clear();
        assert_eq!(renderer.glyph_at(20, 20), Some(' '));

        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        assert!(!out.is_empty());
    }
}
