use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Span;

/// `@tag : free text` attached to a model element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Tag as written in the source, without the leading `@`.
    pub tag: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub span: Span,
}

impl Annotation {
    /// The recognized kind, or `None` for an unknown tag.
    pub fn kind(&self) -> Option<AnnotationKind> {
        self.tag.parse().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    Description,
    Author,
    Experimental,
    Deprecated,
    See,
    Param,
    HighVolume,
    HighFrequency,
    SourceUri,
    SourceAlias,
    Details,
}

impl AnnotationKind {
    pub const ALL: [AnnotationKind; 11] = [
        AnnotationKind::Description,
        AnnotationKind::Author,
        AnnotationKind::Experimental,
        AnnotationKind::Deprecated,
        AnnotationKind::See,
        AnnotationKind::Param,
        AnnotationKind::HighVolume,
        AnnotationKind::HighFrequency,
        AnnotationKind::SourceUri,
        AnnotationKind::SourceAlias,
        AnnotationKind::Details,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            AnnotationKind::Description => "description",
            AnnotationKind::Author => "author",
            AnnotationKind::Experimental => "experimental",
            AnnotationKind::Deprecated => "deprecated",
            AnnotationKind::See => "see",
            AnnotationKind::Param => "param",
            AnnotationKind::HighVolume => "high_volume",
            AnnotationKind::HighFrequency => "high_frequency",
            AnnotationKind::SourceUri => "source_uri",
            AnnotationKind::SourceAlias => "source_alias",
            AnnotationKind::Details => "details",
        }
    }
}

impl FromStr for AnnotationKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnnotationKind::ALL
            .into_iter()
            .find(|k| k.tag() == s)
            .ok_or(())
    }
}
