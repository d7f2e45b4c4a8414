//! Effect-node kind tags.

use std::fmt;

/// What kind of geometry an effect node emits.
///
/// Kinds are data-less tags: the engine treats every node uniformly and
/// only the renderer backend cares which primitive to build. `Root` nodes
/// structure the tree and are never rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The invisible root of an effect tree. Exactly one per effect,
    /// always at node index 0.
    Root,
    /// Camera-facing quad.
    #[default]
    Sprite,
    /// Connected trail segment, one per instance in a generation.
    Ribbon,
    /// Instanced mesh.
    Model,
}

impl NodeKind {
    /// Whether instances of this kind produce render records.
    pub fn is_renderable(self) -> bool {
        !matches!(self, Self::Root)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Root => "root",
            Self::Sprite => "sprite",
            Self::Ribbon => "ribbon",
            Self::Model => "model",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_not_renderable() {
        assert!(!NodeKind::Root.is_renderable());
        assert!(NodeKind::Sprite.is_renderable());
        assert!(NodeKind::Ribbon.is_renderable());
        assert!(NodeKind::Model.is_renderable());
    }

    #[test]
    fn display_names() {
        assert_eq!(NodeKind::Sprite.to_string(), "sprite");
        assert_eq!(NodeKind::Root.to_string(), "root");
    }
}
