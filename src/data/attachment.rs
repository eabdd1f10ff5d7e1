use std::sync::Arc;
use crate::shared_types::Color;

/// Identifies an attachment by where it lives: skin index, slot index and the
/// entry name it was registered under in that skin.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttachmentKey {
    pub skin: usize,
    pub slot: usize,
    pub name: String,
}

impl AttachmentKey {
    pub fn new(skin: usize, slot: usize, name: impl Into<String>) -> Self {
        Self { skin, slot, name: name.into() }
    }
}

/// Where an attachment's image sits inside its texture, as provided by an
/// [`AttachmentLoader`](crate::loader::AttachmentLoader). Sizes are in pixels,
/// `u`/`v` in normalized texture space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextureRegion {
    pub u: f32,
    pub v: f32,
    pub u2: f32,
    pub v2: f32,
    /// Stored rotated 90 degrees counter-clockwise in the texture.
    pub rotate: bool,
    /// Whitespace stripped from the left and bottom when packing.
    pub offset_x: f32,
    pub offset_y: f32,
    pub packed_width: f32,
    pub packed_height: f32,
    pub original_width: f32,
    pub original_height: f32,
}

/// Vertex payload of bounding boxes, meshes, paths and clipping polygons.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexData {
    /// For weighted vertices: per vertex, a bone count followed by that many
    /// bone indices. `None` when vertices are plain local coordinates.
    pub bones: Option<Vec<usize>>,
    /// Plain `x, y` pairs, or `x, y, weight` triples per bone influence.
    pub vertices: Vec<f32>,
    /// Length of the `x, y` buffer once the vertices are computed.
    pub world_vertices_length: usize,
}

impl VertexData {
    pub fn is_weighted(&self) -> bool {
        self.bones.is_some()
    }

    /// Number of values a deform key carries for these vertices.
    pub fn deform_length(&self) -> usize {
        if self.is_weighted() {
            self.vertices.len() / 3 * 2
        } else {
            self.vertices.len()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RegionAttachment {
    pub name: String,
    pub path: String,
    pub region: Option<TextureRegion>,
    pub x: f32,
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    /// Corner positions relative to the bone: bottom left, upper left, upper
    /// right, bottom right, each as `x, y`.
    pub offset: [f32; 8],
}

impl RegionAttachment {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            region: None,
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            width: 0.0,
            height: 0.0,
            color: Color::WHITE,
            offset: [0.0; 8],
        }
    }

    pub fn update_offset(&mut self) {
        let (width, height) = (self.width, self.height);
        let mut local_x2 = width / 2.0;
        let mut local_y2 = height / 2.0;
        let mut local_x = -local_x2;
        let mut local_y = -local_y2;
        if let Some(region) = &self.region {
            if region.original_width > 0.0 && region.original_height > 0.0 {
                local_x += region.offset_x / region.original_width * width;
                local_y += region.offset_y / region.original_height * height;
                let (packed_w, packed_h) = if region.rotate {
                    (region.packed_height, region.packed_width)
                } else {
                    (region.packed_width, region.packed_height)
                };
                local_x2 -= (region.original_width - region.offset_x - packed_w) / region.original_width * width;
                local_y2 -= (region.original_height - region.offset_y - packed_h) / region.original_height * height;
            }
        }

        let scale = nalgebra::Vector2::new(self.scale_x, self.scale_y);
        let rotation = nalgebra::Rotation2::new(self.rotation.to_radians());
        let translation = nalgebra::Vector2::new(self.x, self.y);
        let corners = [
            (local_x, local_y),
            (local_x, local_y2),
            (local_x2, local_y2),
            (local_x2, local_y),
        ];
        for (i, &(cx, cy)) in corners.iter().enumerate() {
            let corner = rotation * nalgebra::Vector2::new(cx, cy).component_mul(&scale) + translation;
            self.offset[i * 2] = corner.x;
            self.offset[i * 2 + 1] = corner.y;
        }
    }
}

/// Triangulated geometry of a mesh. Linked meshes share their parent's.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshGeometry {
    pub vertices: VertexData,
    pub region_uvs: Vec<f32>,
    pub triangles: Vec<u16>,
    /// Number of hull vertex values (hull vertex count times 2).
    pub hull_length: usize,
    pub edges: Option<Vec<u16>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeshAttachment {
    pub name: String,
    pub path: String,
    pub region: Option<TextureRegion>,
    pub color: Color,
    pub width: f32,
    pub height: f32,
    pub geometry: Arc<MeshGeometry>,
    /// `region_uvs` mapped into `region`.
    pub uvs: Vec<f32>,
    pub parent_mesh: Option<AttachmentKey>,
    /// Attachment whose deform keys apply to this mesh. `None` means itself.
    pub deform_attachment: Option<AttachmentKey>,
}

impl MeshAttachment {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            region: None,
            color: Color::WHITE,
            width: 0.0,
            height: 0.0,
            geometry: Arc::new(MeshGeometry::default()),
            uvs: Vec::new(),
            parent_mesh: None,
            deform_attachment: None,
        }
    }

    pub fn update_uvs(&mut self) {
        let region_uvs = &self.geometry.region_uvs;
        self.uvs.clear();
        self.uvs.reserve(region_uvs.len());
        let (u, v, width, height, rotate) = match &self.region {
            None => (0.0, 0.0, 1.0, 1.0, false),
            Some(region) => (region.u, region.v, region.u2 - region.u, region.v2 - region.v, region.rotate),
        };
        for uv in region_uvs.chunks_exact(2) {
            if rotate {
                self.uvs.push(u + uv[1] * width);
                self.uvs.push(v + height - uv[0] * height);
            } else {
                self.uvs.push(u + uv[0] * width);
                self.uvs.push(v + uv[1] * height);
            }
        }
    }

    /// Adopts the parent's geometry and size.
    pub fn set_parent_mesh(&mut self, key: AttachmentKey, parent: &MeshAttachment) {
        self.geometry = Arc::clone(&parent.geometry);
        self.width = parent.width;
        self.height = parent.height;
        self.parent_mesh = Some(key);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBoxAttachment {
    pub name: String,
    pub vertices: VertexData,
    pub color: Color,
}

impl BoundingBoxAttachment {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), vertices: VertexData::default(), color: Color::new(0.38, 0.94, 0.0, 1.0) }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PathAttachment {
    pub name: String,
    pub vertices: VertexData,
    /// Length of each curve segment.
    pub lengths: Vec<f32>,
    pub closed: bool,
    pub constant_speed: bool,
    pub color: Color,
}

impl PathAttachment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: VertexData::default(),
            lengths: Vec::new(),
            closed: false,
            constant_speed: true,
            color: Color::new(1.0, 0.5, 0.0, 1.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointAttachment {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub color: Color,
}

impl PointAttachment {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), x: 0.0, y: 0.0, rotation: 0.0, color: Color::new(0.9451, 0.9451, 0.0, 1.0) }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClippingAttachment {
    pub name: String,
    pub vertices: VertexData,
    /// Slot index after which clipping stops.
    pub end_slot: Option<usize>,
    pub color: Color,
}

impl ClippingAttachment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: VertexData::default(),
            end_slot: None,
            color: Color::new(0.2275, 0.2275, 0.8078, 1.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Attachment {
    Region(RegionAttachment),
    BoundingBox(BoundingBoxAttachment),
    Mesh(MeshAttachment),
    Path(PathAttachment),
    Point(PointAttachment),
    Clipping(ClippingAttachment),
}

impl Attachment {
    pub fn name(&self) -> &str {
        match self {
            Attachment::Region(it) => &it.name,
            Attachment::BoundingBox(it) => &it.name,
            Attachment::Mesh(it) => &it.name,
            Attachment::Path(it) => &it.name,
            Attachment::Point(it) => &it.name,
            Attachment::Clipping(it) => &it.name,
        }
    }

    /// Vertex payload, for the kinds that have one.
    pub fn vertex_data(&self) -> Option<&VertexData> {
        match self {
            Attachment::BoundingBox(it) => Some(&it.vertices),
            Attachment::Mesh(it) => Some(&it.geometry.vertices),
            Attachment::Path(it) => Some(&it.vertices),
            Attachment::Clipping(it) => Some(&it.vertices),
            Attachment::Region(_) | Attachment::Point(_) => None,
        }
    }

    pub fn as_mesh(&self) -> Option<&MeshAttachment> {
        match self {
            Attachment::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }
}
