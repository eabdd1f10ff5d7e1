//! Decoding of single attachment nodes.

use std::sync::Arc;
use serde::Deserialize;
use serde_json::Value;

use crate::data::attachment::{Attachment, AttachmentKey, MeshGeometry, VertexData};
use crate::data::skin::Skin;
use crate::data::SkeletonData;
use crate::error::SkeletonError;
use crate::shared_types::Color;
use crate::skeleton_data::skin::{
    AttachmentType, RawAttachmentHeader, RawMeshAttachment, RawMeshGeometry, RawPathAttachment,
    RawPointAttachment, RawPolygonAttachment, RawRegionAttachment,
};
use super::attachment_loader::AttachmentLoader;
use super::linked_mesh::LinkedMesh;

/// Where the attachment being read will be registered.
pub(crate) struct AttachmentSite<'a> {
    pub skin: &'a Skin,
    pub skin_index: usize,
    pub slot: usize,
    /// Entry name in the skin, also the default attachment name.
    pub entry: &'a str,
}

/// Reads one attachment node. `Ok(None)` means the loader declined to create it.
/// Linked meshes come back without geometry and are queued in `linked_meshes`.
pub(crate) fn read_attachment<L: AttachmentLoader>(
    loader: &L,
    node: &Value,
    site: &AttachmentSite<'_>,
    data: &SkeletonData,
    scale: f32,
    linked_meshes: &mut Vec<LinkedMesh>,
) -> Result<Option<Attachment>, SkeletonError> {
    let header = RawAttachmentHeader::parse(node)?;
    let name = header.name.as_deref().unwrap_or(site.entry);
    let path = header.path.as_deref().unwrap_or(name);
    let color = header.color.as_deref().map(Color::from_hex).transpose()?;

    let attachment = match header.attachment_type {
        AttachmentType::Region => {
            let mut region = match loader.new_region_attachment(site.skin, name, path) {
                Some(region) => region,
                None => return Ok(None),
            };
            let raw = RawRegionAttachment::deserialize(node)?;
            region.path = path.to_string();
            region.x = raw.x * scale;
            region.y = raw.y * scale;
            region.scale_x = raw.scale_x;
            region.scale_y = raw.scale_y;
            region.rotation = raw.rotation;
            region.width = raw.width * scale;
            region.height = raw.height * scale;
            if let Some(color) = color {
                region.color = color;
            }
            region.update_offset();
            Attachment::Region(region)
        }
        AttachmentType::BoundingBox => {
            let mut bounding_box = match loader.new_bounding_box_attachment(site.skin, name) {
                Some(bounding_box) => bounding_box,
                None => return Ok(None),
            };
            let raw = RawPolygonAttachment::deserialize(node)?;
            bounding_box.vertices = read_vertices(&raw.vertices, world_length(raw.vertex_count)?, scale)?;
            if let Some(color) = color {
                bounding_box.color = color;
            }
            Attachment::BoundingBox(bounding_box)
        }
        AttachmentType::Mesh | AttachmentType::LinkedMesh => {
            let mut mesh = match loader.new_mesh_attachment(site.skin, name, path) {
                Some(mesh) => mesh,
                None => return Ok(None),
            };
            let raw = RawMeshAttachment::deserialize(node)?;
            mesh.path = path.to_string();
            if let Some(color) = color {
                mesh.color = color;
            }
            mesh.width = raw.width * scale;
            mesh.height = raw.height * scale;

            if let Some(parent) = raw.parent {
                linked_meshes.push(LinkedMesh {
                    mesh: AttachmentKey::new(site.skin_index, site.slot, site.entry),
                    skin: raw.skin,
                    parent,
                    inherit_deform: raw.inherit_deform,
                });
                return Ok(Some(Attachment::Mesh(mesh)));
            }

            let geometry = RawMeshGeometry::deserialize(node)?;
            mesh.geometry = Arc::new(MeshGeometry {
                vertices: read_vertices(&geometry.vertices, geometry.uvs.len(), scale)?,
                region_uvs: geometry.uvs,
                triangles: geometry.triangles,
                hull_length: geometry.hull.map_or(0, |hull| hull * 2),
                edges: geometry.edges,
            });
            mesh.update_uvs();
            Attachment::Mesh(mesh)
        }
        AttachmentType::Path => {
            let mut path_attachment = match loader.new_path_attachment(site.skin, name) {
                Some(path_attachment) => path_attachment,
                None => return Ok(None),
            };
            let raw = RawPathAttachment::deserialize(node)?;
            path_attachment.closed = raw.closed;
            path_attachment.constant_speed = raw.constant_speed;
            path_attachment.vertices = read_vertices(&raw.vertices, world_length(raw.vertex_count)?, scale)?;
            path_attachment.lengths = raw.lengths.iter().map(|length| length * scale).collect();
            path_attachment.lengths.resize(raw.vertex_count / 3, 0.0);
            if let Some(color) = color {
                path_attachment.color = color;
            }
            Attachment::Path(path_attachment)
        }
        AttachmentType::Point => {
            let mut point = match loader.new_point_attachment(site.skin, name) {
                Some(point) => point,
                None => return Ok(None),
            };
            let raw = RawPointAttachment::deserialize(node)?;
            point.x = raw.x * scale;
            point.y = raw.y * scale;
            point.rotation = raw.rotation;
            if let Some(color) = color {
                point.color = color;
            }
            Attachment::Point(point)
        }
        AttachmentType::Clipping => {
            let mut clipping = match loader.new_clipping_attachment(site.skin, name) {
                Some(clipping) => clipping,
                None => return Ok(None),
            };
            let raw = RawPolygonAttachment::deserialize(node)?;
            if let Some(end) = &raw.end {
                let end_slot = data
                    .find_slot_index(end)
                    .ok_or_else(|| SkeletonError::not_found("Clipping end slot", end.as_str()))?;
                clipping.end_slot = Some(end_slot);
            }
            clipping.vertices = read_vertices(&raw.vertices, world_length(raw.vertex_count)?, scale)?;
            if let Some(color) = color {
                clipping.color = color;
            }
            Attachment::Clipping(clipping)
        }
    };
    log::trace!("read {:?} attachment {} in skin {}", header.attachment_type, name, site.skin.name);
    Ok(Some(attachment))
}

/// Number of coordinates held by `vertex_count` vertices.
fn world_length(vertex_count: usize) -> Result<usize, SkeletonError> {
    vertex_count.checked_mul(2).ok_or(SkeletonError::MalformedVertices { vertex: vertex_count })
}

/// Decodes a vertex stream. When it holds exactly `world_vertices_length`
/// values they are plain coordinates. Otherwise each vertex is a bone count
/// `k` followed by `k` groups of `bone, x, y, weight`.
pub(crate) fn read_vertices(vertices: &[f32], world_vertices_length: usize, scale: f32) -> Result<VertexData, SkeletonError> {
    if vertices.len() == world_vertices_length {
        return Ok(VertexData {
            bones: None,
            vertices: vertices.iter().map(|value| value * scale).collect(),
            world_vertices_length,
        });
    }

    let mut bones = Vec::with_capacity(vertices.len() / 4);
    let mut weights = Vec::with_capacity(vertices.len());
    let mut rest = vertices;
    let mut vertex = 0;
    while let Some((&bone_count, tail)) = rest.split_first() {
        let influences = match (bone_count as usize).checked_mul(4) {
            Some(influences) if influences <= tail.len() => influences,
            _ => return Err(SkeletonError::MalformedVertices { vertex }),
        };
        bones.push(bone_count as usize);
        for influence in tail[..influences].chunks_exact(4) {
            bones.push(influence[0] as usize);
            weights.extend_from_slice(&[influence[1] * scale, influence[2] * scale, influence[3]]);
        }
        rest = &tail[influences..];
        vertex += 1;
    }
    Ok(VertexData { bones: Some(bones), vertices: weights, world_vertices_length })
}
