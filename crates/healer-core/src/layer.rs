use std::fmt;

/// The seven naming layers used to organise reconnaissance data, outermost first.
///
/// database -> collection (target) -> document (domain) -> subdomain ->
/// directory -> file -> parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    Database,
    Collection,
    Document,
    Subdomain,
    Directory,
    File,
    Parameter,
}

impl Layer {
    pub const ALL: [Layer; 7] = [
        Layer::Database,
        Layer::Collection,
        Layer::Document,
        Layer::Subdomain,
        Layer::Directory,
        Layer::File,
        Layer::Parameter,
    ];

    /// 1-based depth in the hierarchy.
    pub fn depth(self) -> u8 {
        match self {
            Self::Database => 1,
            Self::Collection => 2,
            Self::Document => 3,
            Self::Subdomain => 4,
            Self::Directory => 5,
            Self::File => 6,
            Self::Parameter => 7,
        }
    }

    pub fn parent(self) -> Option<Layer> {
        Self::ALL.get((self.depth() as usize).checked_sub(2)?).copied()
    }

    pub fn child(self) -> Option<Layer> {
        Self::ALL.get(self.depth() as usize).copied()
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Database => write!(f, "database"),
            Self::Collection => write!(f, "collection"),
            Self::Document => write!(f, "document"),
            Self::Subdomain => write!(f, "subdomain"),
            Self::Directory => write!(f, "directory"),
            Self::File => write!(f, "file"),
            Self::Parameter => write!(f, "parameter"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depths_are_sequential() {
        for (i, layer) in Layer::ALL.iter().enumerate() {
            assert_eq!(layer.depth() as usize, i + 1);
        }
    }

    #[test]
    fn test_parent_and_child_walk() {
        assert_eq!(Layer::Database.parent(), None);
        assert_eq!(Layer::Database.child(), Some(Layer::Collection));
        assert_eq!(Layer::Subdomain.parent(), Some(Layer::Document));
        assert_eq!(Layer::Parameter.child(), None);
        assert_eq!(Layer::Parameter.parent(), Some(Layer::File));
    }
}
