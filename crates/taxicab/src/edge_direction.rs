/// Orientation of a directed edge relative to its canonical undirected key.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum EdgeDirection {
    /// Runs from the lower node id to the higher one.
    Forward,
    Backward,
}

impl EdgeDirection {
    pub fn opposite(&self) -> Self {
        match self {
            EdgeDirection::Forward => EdgeDirection::Backward,
            EdgeDirection::Backward => EdgeDirection::Forward,
        }
    }
}
