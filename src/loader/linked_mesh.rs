use crate::data::attachment::{Attachment, AttachmentKey};
use crate::data::SkeletonData;
use crate::error::SkeletonError;

/// A mesh whose geometry comes from a parent mesh that may not be read yet.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LinkedMesh {
    /// Where the linked mesh itself is registered.
    pub mesh: AttachmentKey,
    /// Skin holding the parent, the default skin when absent.
    pub skin: Option<String>,
    pub parent: String,
    pub inherit_deform: bool,
}

/// Wires every queued mesh to its parent in queue order. Must run once every
/// skin is registered. Returns the number of meshes linked.
pub(crate) fn resolve_linked_meshes(data: &mut SkeletonData, linked_meshes: Vec<LinkedMesh>) -> Result<usize, SkeletonError> {
    let count = linked_meshes.len();
    for linked in linked_meshes {
        let skin = match &linked.skin {
            Some(name) => data.find_skin_index(name).ok_or_else(|| SkeletonError::not_found("Skin", name.as_str()))?,
            None => data.default_skin_index().ok_or_else(|| SkeletonError::not_found("Skin", "default"))?,
        };
        let slot = linked.mesh.slot;
        let parent = data.skins()[skin]
            .attachment(slot, &linked.parent)
            .and_then(Attachment::as_mesh)
            .cloned()
            .ok_or_else(|| SkeletonError::not_found("Parent mesh", linked.parent.as_str()))?;
        let parent_key = AttachmentKey::new(skin, slot, linked.parent.as_str());

        let mesh = match data.skin_mut(linked.mesh.skin).attachment_mut(slot, &linked.mesh.name) {
            Some(Attachment::Mesh(mesh)) => mesh,
            _ => return Err(SkeletonError::not_found("Linked mesh", linked.mesh.name.as_str())),
        };
        let deform_source = if linked.inherit_deform { parent_key.clone() } else { linked.mesh.clone() };
        mesh.set_parent_mesh(parent_key, &parent);
        mesh.deform_attachment = Some(deform_source);
        mesh.update_uvs();
        log::trace!("linked mesh {} to parent {}", linked.mesh.name, linked.parent);
    }
    Ok(count)
}
