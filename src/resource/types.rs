use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Opaque principal that holds allocations. Only structural equality is relied on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceConsumerId(String);

impl ResourceConsumerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceConsumerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceConsumerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A divisible resource: the total capacity when used as a ledger's original,
/// the granted amount when carried by an allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuousResource {
    id: ResourceId,
    value: f64,
}

impl ContinuousResource {
    pub fn new(id: ResourceId, value: f64) -> Self {
        Self { id, value }
    }

    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_valid_amount(&self) -> bool {
        self.value.is_finite() && self.value >= 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiscreteResource {
    id: ResourceId,
}

impl DiscreteResource {
    pub fn new(id: ResourceId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &ResourceId {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Resource {
    Continuous(ContinuousResource),
    Discrete(DiscreteResource),
}

impl Resource {
    pub fn id(&self) -> &ResourceId {
        match self {
            Self::Continuous(resource) => resource.id(),
            Self::Discrete(resource) => resource.id(),
        }
    }

    pub fn as_continuous(&self) -> Option<&ContinuousResource> {
        match self {
            Self::Continuous(resource) => Some(resource),
            Self::Discrete(_) => None,
        }
    }
}

impl From<ContinuousResource> for Resource {
    fn from(value: ContinuousResource) -> Self {
        Self::Continuous(value)
    }
}

impl From<DiscreteResource> for Resource {
    fn from(value: DiscreteResource) -> Self {
        Self::Discrete(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceAllocation {
    resource: Resource,
    consumer_id: ResourceConsumerId,
}

impl ResourceAllocation {
    pub fn new(resource: impl Into<Resource>, consumer_id: ResourceConsumerId) -> Self {
        Self {
            resource: resource.into(),
            consumer_id,
        }
    }

    pub fn continuous(resource: ContinuousResource, consumer_id: ResourceConsumerId) -> Self {
        Self::new(Resource::Continuous(resource), consumer_id)
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn consumer_id(&self) -> &ResourceConsumerId {
        &self.consumer_id
    }
}
