use serde::Deserialize;
use serde_json::Value;
use indexmap::IndexMap;
use crate::shared_types::{default_one, default_true};

#[derive(Clone, Deserialize, Debug)]
pub struct RawSkin {
    pub name: String,

    #[serde(default)]
    pub bones: Vec<String>,

    #[serde(default)]
    pub ik: Vec<String>,

    #[serde(default)]
    pub transform: Vec<String>,

    #[serde(default)]
    pub path: Vec<String>,

    /// slot name -> attachment entry name -> attachment node
    #[serde(default)]
    pub attachments: IndexMap<String, IndexMap<String, Value>>,
}

#[derive(Copy, Clone, Deserialize, Debug, PartialEq, Eq)]
pub enum AttachmentType {
    #[serde(rename = "region")]
    Region,
    #[serde(rename = "boundingbox")]
    BoundingBox,
    #[serde(rename = "mesh")]
    Mesh,
    #[serde(rename = "linkedmesh")]
    LinkedMesh,
    #[serde(rename = "path")]
    Path,
    #[serde(rename = "point")]
    Point,
    #[serde(rename = "clipping")]
    Clipping,
}
impl Default for AttachmentType {
    fn default() -> Self {
        Self::Region
    }
}

/// The fields every attachment node shares. They are read before the
/// attachment loader is asked for an instance, the rest only after it agreed.
#[derive(Clone, Deserialize, Debug)]
pub struct RawAttachmentHeader {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[serde(default)]
    pub attachment_type: AttachmentType,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl RawAttachmentHeader {
    pub fn parse(node: &Value) -> Result<Self, serde_json::Error> {
        match node {
            Value::Object(_) => Self::deserialize(node),
            _ => Err(serde::de::Error::custom("Unexpected JSON field type! Object expected")),
        }
    }
}

#[derive(Clone, Deserialize, Debug)]
pub struct RawRegionAttachment {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(rename = "scaleX")]
    #[serde(default = "default_one")]
    pub scale_x: f32,
    #[serde(rename = "scaleY")]
    #[serde(default = "default_one")]
    pub scale_y: f32,
    #[serde(default)]
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
}

/// Bounding boxes and clipping polygons.
#[derive(Clone, Deserialize, Debug)]
pub struct RawPolygonAttachment {
    #[serde(rename = "vertexCount")]
    pub vertex_count: usize,
    pub vertices: Vec<f32>,
    /// Clipping only.
    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct RawMeshAttachment {
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    /// Present only on linked meshes.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub skin: Option<String>,
    #[serde(rename = "deform")]
    #[serde(default = "default_true")]
    pub inherit_deform: bool,
}

#[derive(Clone, Deserialize, Debug)]
pub struct RawMeshGeometry {
    pub uvs: Vec<f32>,
    pub vertices: Vec<f32>,
    pub triangles: Vec<u16>,
    #[serde(default)]
    pub hull: Option<usize>,
    #[serde(default)]
    pub edges: Option<Vec<u16>>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct RawPathAttachment {
    #[serde(default)]
    pub closed: bool,
    #[serde(rename = "constantSpeed")]
    #[serde(default = "default_true")]
    pub constant_speed: bool,
    #[serde(rename = "vertexCount")]
    pub vertex_count: usize,
    pub vertices: Vec<f32>,
    pub lengths: Vec<f32>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct RawPointAttachment {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub rotation: f32,
}
