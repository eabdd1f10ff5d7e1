use indexmap::IndexMap;
use super::attachment::Attachment;
use super::constraint::ConstraintRef;

#[derive(Clone, Debug, PartialEq)]
pub struct Skin {
    pub name: String,
    /// Skin-required bones this skin activates.
    pub bones: Vec<usize>,
    pub constraints: Vec<ConstraintRef>,
    attachments: IndexMap<(usize, String), Attachment>,
}

impl Skin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bones: Vec::new(),
            constraints: Vec::new(),
            attachments: IndexMap::new(),
        }
    }

    /// Registers an attachment, replacing any earlier one under the same key.
    pub fn set_attachment(&mut self, slot: usize, name: impl Into<String>, attachment: Attachment) -> Option<Attachment> {
        self.attachments.insert((slot, name.into()), attachment)
    }

    pub fn attachment(&self, slot: usize, name: &str) -> Option<&Attachment> {
        self.attachments.get(&(slot, name.to_string()))
    }

    pub(crate) fn attachment_mut(&mut self, slot: usize, name: &str) -> Option<&mut Attachment> {
        self.attachments.get_mut(&(slot, name.to_string()))
    }

    /// Entries in registration order as `(slot, name, attachment)`.
    pub fn attachments(&self) -> impl Iterator<Item = (usize, &str, &Attachment)> {
        self.attachments.iter().map(|((slot, name), attachment)| (*slot, name.as_str(), attachment))
    }

    pub fn attachment_count(&self) -> usize {
        self.attachments.len()
    }
}
