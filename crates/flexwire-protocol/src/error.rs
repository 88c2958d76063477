//! Error types for the decode layer.
//!
//! Every failure aborts the whole decode. Nothing is retried and nothing
//! falls back to a default variant, so a caller either gets a complete
//! [`FlexContainer`](crate::FlexContainer) or exactly one `DecodeError`.

use std::fmt;

use serde::de::Error as _;

/// The three independently tagged node families.
///
/// Each family has its own discriminator domain: `"box"` is a component
/// tag, not a container tag, even though both live in a `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Container,
    Component,
    Action,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container => write!(f, "container"),
            Self::Component => write!(f, "component"),
            Self::Action => write!(f, "action"),
        }
    }
}

// ---------------------------------------------------------------------------
// DecodePath
// ---------------------------------------------------------------------------

/// One step from a parent node to a child node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A named field, e.g. `body` or `altContent`.
    Field(&'static str),
    /// A position inside an array field.
    Index(usize),
}

/// Where in the input tree a nested failure happened.
///
/// Renders the way you would address the node by hand:
/// `body.contents[2].action`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodePath(Vec<PathSegment>);

impl DecodePath {
    /// The segments from the root object down to the failing node.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Returns `true` for the root object itself.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // Errors bubble up leaf-first, so each parent adds its step in front.
    fn prepend(&mut self, segment: PathSegment) {
        self.0.insert(0, segment);
    }
}

impl fmt::Display for DecodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{name}")?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// DecodeError
// ---------------------------------------------------------------------------

/// Errors that can occur while decoding a flex layout.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The bytes are not well-formed JSON, a node has the wrong JSON shape
    /// (e.g. `"contents"` is not an array, `"flex"` is not a number), or
    /// the input nests deeper than the configured limit.
    #[error("malformed input: {0}")]
    MalformedInput(#[from] serde_json::Error),

    /// The `type` field is absent or not a string where a node is required.
    #[error("missing discriminator: {reason}")]
    MissingDiscriminator { reason: &'static str },

    /// The `type` field holds a value the expected family doesn't know.
    #[error("unknown {family} type {value:?}")]
    UnknownVariant { family: Family, value: String },

    /// A recognized variant sitting in a slot that only admits another one,
    /// e.g. a `text` component as a bubble `body`.
    #[error("expected {expected}, found {found}")]
    UnexpectedVariant {
        expected: &'static str,
        found: &'static str,
    },

    /// Any of the above, raised while decoding a nested field.
    #[error("at {path}: {source}")]
    Nested {
        path: DecodePath,
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Builds a [`DecodeError::MalformedInput`] from a plain message.
    pub(crate) fn malformed(msg: impl fmt::Display) -> Self {
        Self::MalformedInput(serde_json::Error::custom(msg))
    }

    /// Attributes this error to a child of the node currently being decoded.
    ///
    /// Paths are merged rather than stacked, so a failure five levels down
    /// is still one `Nested` wrapping the original cause.
    pub(crate) fn at(self, segment: PathSegment) -> Self {
        match self {
            Self::Nested { mut path, source } => {
                path.prepend(segment);
                Self::Nested { path, source }
            }
            other => Self::Nested {
                path: DecodePath(vec![segment]),
                source: Box::new(other),
            },
        }
    }

    /// The innermost cause, with any path context stripped.
    pub fn root(&self) -> &DecodeError {
        match self {
            Self::Nested { source, .. } => source.root(),
            other => other,
        }
    }

    /// The location of the failing node, if it wasn't the root object.
    pub fn path(&self) -> Option<&DecodePath> {
        match self {
            Self::Nested { path, .. } => Some(path),
            _ => None,
        }
    }
}
