use thiserror::Error;

/// Everything that can abort a skeleton load. A load never returns partial data.
#[derive(Debug, Error)]
pub enum SkeletonError {
    #[error("skeleton source is empty")]
    EmptySource,

    #[error("failed to read skeleton file: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON, a missing required field or an unknown enum name.
    #[error("malformed skeleton document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    #[error("invalid timeline type for a {owner}: {timeline} ({name})")]
    UnknownTimeline {
        owner: &'static str,
        timeline: String,
        name: String,
    },

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("curve of frame {frame} has no control points for value {channel}")]
    InvalidCurve { frame: usize, channel: usize },

    #[error("weighted vertices end in the middle of vertex {vertex}")]
    MalformedVertices { vertex: usize },

    #[error("invalid draw order offset for slot {slot}: {offset}")]
    InvalidDrawOrder { slot: String, offset: i32 },

    #[error("deform of {len} values at offset {offset} exceeds {capacity} vertex values")]
    DeformOutOfRange {
        offset: usize,
        len: usize,
        capacity: usize,
    },

    #[error("error reading attachment: {attachment}, skin: {skin}: {source}")]
    Attachment {
        attachment: String,
        skin: String,
        #[source]
        source: Box<SkeletonError>,
    },

    #[error("error reading animation: {name}: {source}")]
    Animation {
        name: String,
        #[source]
        source: Box<SkeletonError>,
    },
}

impl SkeletonError {
    pub(crate) fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound { kind, name: name.into() }
    }
}
