pub mod types;

pub use types::{
    ContinuousResource, DiscreteResource, Resource, ResourceAllocation, ResourceConsumerId,
    ResourceId,
};
