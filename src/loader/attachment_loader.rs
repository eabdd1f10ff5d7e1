use crate::data::attachment::{
    BoundingBoxAttachment, ClippingAttachment, MeshAttachment, PathAttachment, PointAttachment, RegionAttachment,
};
use crate::data::skin::Skin;

/// Creates attachment instances for the JSON reader, typically resolving the
/// texture region of regions and meshes. Returning `None` skips the attachment
/// without failing the load.
///
/// Every method creates a plain attachment by default.
pub trait AttachmentLoader {
    fn new_region_attachment(&self, _skin: &Skin, name: &str, path: &str) -> Option<RegionAttachment> {
        Some(RegionAttachment::new(name, path))
    }

    fn new_mesh_attachment(&self, _skin: &Skin, name: &str, path: &str) -> Option<MeshAttachment> {
        Some(MeshAttachment::new(name, path))
    }

    fn new_bounding_box_attachment(&self, _skin: &Skin, name: &str) -> Option<BoundingBoxAttachment> {
        Some(BoundingBoxAttachment::new(name))
    }

    fn new_path_attachment(&self, _skin: &Skin, name: &str) -> Option<PathAttachment> {
        Some(PathAttachment::new(name))
    }

    fn new_point_attachment(&self, _skin: &Skin, name: &str) -> Option<PointAttachment> {
        Some(PointAttachment::new(name))
    }

    fn new_clipping_attachment(&self, _skin: &Skin, name: &str) -> Option<ClippingAttachment> {
        Some(ClippingAttachment::new(name))
    }
}

/// Creates every attachment without a texture region.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultAttachmentLoader;

impl AttachmentLoader for DefaultAttachmentLoader {}

impl<L: AttachmentLoader + ?Sized> AttachmentLoader for &L {
    fn new_region_attachment(&self, skin: &Skin, name: &str, path: &str) -> Option<RegionAttachment> {
        (**self).new_region_attachment(skin, name, path)
    }

    fn new_mesh_attachment(&self, skin: &Skin, name: &str, path: &str) -> Option<MeshAttachment> {
        (**self).new_mesh_attachment(skin, name, path)
    }

    fn new_bounding_box_attachment(&self, skin: &Skin, name: &str) -> Option<BoundingBoxAttachment> {
        (**self).new_bounding_box_attachment(skin, name)
    }

    fn new_path_attachment(&self, skin: &Skin, name: &str) -> Option<PathAttachment> {
        (**self).new_path_attachment(skin, name)
    }

    fn new_point_attachment(&self, skin: &Skin, name: &str) -> Option<PointAttachment> {
        (**self).new_point_attachment(skin, name)
    }

    fn new_clipping_attachment(&self, skin: &Skin, name: &str) -> Option<ClippingAttachment> {
        (**self).new_clipping_attachment(skin, name)
    }
}
