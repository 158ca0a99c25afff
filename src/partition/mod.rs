//! Trait partitioning of combined association exports.

mod split;

pub use split::{
    check_collisions, partition, sanitize_trait_name, split_traits, write_partitions,
    AssociationTable, TraitPartition, WrittenPartition, DEFAULT_PREFIX, TRAIT_COLUMN,
};
