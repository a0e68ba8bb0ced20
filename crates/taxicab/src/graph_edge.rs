use crate::{
    constants::LENGTH_ATTRIBUTE,
    edge_attributes::EdgeAttributes,
    error::TaxicabError,
    types::{EdgeKey, NodeId},
};

#[derive(Clone, Debug)]
pub struct RoadEdge {
    key: EdgeKey,
    attributes: EdgeAttributes,
}

impl RoadEdge {
    pub fn new(key: EdgeKey, attributes: EdgeAttributes) -> Self {
        RoadEdge { key, attributes }
    }

    pub fn key(&self) -> EdgeKey {
        self.key
    }

    pub fn end_node(&self) -> NodeId {
        self.key.target
    }

    pub fn attributes(&self) -> &EdgeAttributes {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Result<f64, TaxicabError> {
        self.attributes
            .get(name)
            .ok_or_else(|| TaxicabError::MissingAttribute {
                edge: self.key,
                attribute: name.to_string(),
            })
    }

    pub fn length(&self) -> Result<f64, TaxicabError> {
        self.attribute(LENGTH_ATTRIBUTE)
    }
}
