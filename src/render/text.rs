//! Proportional bitmap text meshing for the HUD.
//!
//! The font atlas is a 16 by 8 grid of ASCII glyph cells. Layout walks the
//! text one character at a time, advancing the cursor by the character's
//! advance width rather than the fixed cell width; `'\n'` is the only break
//! marker it honors.

use std::sync::Arc;

use glam::Vec2;

use crate::abs::{Mesh, Texture};
use crate::render::UIVertex;
use crate::text::char_width;

/// Glyph cells per atlas row.
pub const ATLAS_COLS: u32 = 16;
/// Glyph cell rows in the atlas.
pub const ATLAS_ROWS: u32 = 8;

/// Texture coordinates of `c`'s cell in the atlas grid, as a min/max pair.
/// Characters past ASCII have no cell.
pub fn glyph_uvs(c: char) -> Option<[Vec2; 2]> {
    let index = c as u32;
    if index >= ATLAS_COLS * ATLAS_ROWS {
        return None;
    }
    let col = index % ATLAS_COLS;
    let row = index / ATLAS_COLS;
    let size = Vec2::new(1.0 / ATLAS_COLS as f32, 1.0 / ATLAS_ROWS as f32);
    let min = Vec2::new(col as f32, row as f32) * size;
    Some([min, min + size])
}

/// A glyph placed on screen: its quad rectangle and atlas rectangle, both
/// as min/max pairs.
#[derive(Clone, Copy, Debug)]
pub struct GlyphQuad {
    pub rect: [Vec2; 2],
    pub uv: [Vec2; 2],
}

/// Lays out `text` starting at `origin`, one cell-sized quad per glyph.
///
/// The cursor advances by the glyph's advance width times `scale`, so
/// narrow characters pack tighter than wide ones. A `'\n'` returns the
/// cursor to `origin.x` and steps down one cell height. Characters without
/// a glyph produce no quad and no advance.
pub fn layout_text(text: &str, cell: Vec2, origin: Vec2, scale: f32) -> Vec<GlyphQuad> {
    let mut quads = Vec::new();
    let mut cursor = origin;
    for line in text.split('\n') {
        for c in line.chars() {
            if let Some(uv) = glyph_uvs(c) {
                quads.push(GlyphQuad {
                    rect: [cursor, cursor + cell * scale],
                    uv,
                });
            }
            cursor.x += char_width(c) as f32 * scale;
        }
        cursor.x = origin.x;
        cursor.y += cell.y * scale;
    }
    quads
}

/// Expands glyph quads into the vertex and index buffers of a triangle mesh.
pub fn glyph_buffers(quads: &[GlyphQuad]) -> (Vec<UIVertex>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(quads.len() * 4);
    let mut indices = Vec::with_capacity(quads.len() * 6);
    for quad in quads {
        let base = vertices.len() as u32;
        let [min, max] = quad.rect;
        let [uv_min, uv_max] = quad.uv;
        vertices.push(UIVertex {
            position: min,
            uv: uv_min,
        });
        vertices.push(UIVertex {
            position: Vec2::new(max.x, min.y),
            uv: Vec2::new(uv_max.x, uv_min.y),
        });
        vertices.push(UIVertex {
            position: max,
            uv: uv_max,
        });
        vertices.push(UIVertex {
            position: Vec2::new(min.x, max.y),
            uv: Vec2::new(uv_min.x, uv_max.y),
        });
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}

/// The HUD font: an ASCII atlas texture plus the glyph cell size derived
/// from its dimensions.
pub struct Font {
    atlas: Texture,
    cell: Vec2,
}

impl Font {
    pub fn new(atlas: Texture) -> Self {
        let cell = Vec2::new(
            atlas.width() as f32 / ATLAS_COLS as f32,
            atlas.height() as f32 / ATLAS_ROWS as f32,
        );
        Self { atlas, cell }
    }

    pub fn atlas(&self) -> &Texture {
        &self.atlas
    }

    /// Vertical distance between line starts, in screen pixels.
    pub fn line_height(&self, scale: f32) -> f32 {
        self.cell.y * scale
    }

    /// Vertex and index buffers for `text` laid out at `origin`.
    pub fn buffers(&self, text: &str, origin: Vec2, scale: f32) -> (Vec<UIVertex>, Vec<u32>) {
        glyph_buffers(&layout_text(text, self.cell, origin, scale))
    }

    /// Builds a triangle mesh for `text`.
    pub fn build_mesh(
        &self,
        gl: &Arc<glow::Context>,
        text: &str,
        origin: Vec2,
        scale: f32,
    ) -> Mesh {
        let (vertices, indices) = self.buffers(text, origin, scale);
        Mesh::new(gl, &vertices, &indices, glow::TRIANGLES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_uvs_grid_position() {
        let [min, max] = glyph_uvs('A').unwrap();
        assert_eq!(min, Vec2::new(1.0 / 16.0, 4.0 / 8.0));
        assert_eq!(max, Vec2::new(2.0 / 16.0, 5.0 / 8.0));
    }

    #[test]
    fn test_glyph_uvs_end_at_ascii() {
        assert!(glyph_uvs('\u{7f}').is_some());
        assert!(glyph_uvs('\u{80}').is_none());
        assert!(glyph_uvs('中').is_none());
    }

    #[test]
    fn test_layout_advances_proportionally() {
        let cell = Vec2::new(12.0, 16.0);
        let quads = layout_text("ab c", cell, Vec2::ZERO, 1.0);
        assert_eq!(quads.len(), 4);
        assert_eq!(quads[0].rect[0], Vec2::ZERO);
        assert_eq!(quads[0].rect[1], cell);
        // 'a' is 7 wide, 'b' 6, the space 4.
        assert_eq!(quads[1].rect[0].x, 7.0);
        assert_eq!(quads[2].rect[0].x, 13.0);
        assert_eq!(quads[3].rect[0].x, 17.0);
    }

    #[test]
    fn test_layout_newline_steps_down() {
        let cell = Vec2::new(12.0, 16.0);
        let quads = layout_text("a\nb", cell, Vec2::new(5.0, 5.0), 2.0);
        assert_eq!(quads.len(), 2);
        assert_eq!(quads[0].rect[0], Vec2::new(5.0, 5.0));
        assert_eq!(quads[1].rect[0], Vec2::new(5.0, 37.0));
    }

    #[test]
    fn test_layout_skips_unmapped_characters() {
        let quads = layout_text("a中b", Vec2::new(12.0, 16.0), Vec2::ZERO, 1.0);
        assert_eq!(quads.len(), 2);
        assert_eq!(quads[1].rect[0].x, 7.0);
    }

    #[test]
    fn test_glyph_buffers_expand_quads() {
        let quads = layout_text("ab", Vec2::new(12.0, 16.0), Vec2::ZERO, 1.0);
        let (vertices, indices) = glyph_buffers(&quads);
        assert_eq!(vertices.len(), 8);
        assert_eq!(indices.len(), 12);
        assert_eq!(&indices[..6], &[0, 1, 2, 0, 2, 3]);
        assert_eq!(&indices[6..], &[4, 5, 6, 4, 6, 7]);
    }
}
