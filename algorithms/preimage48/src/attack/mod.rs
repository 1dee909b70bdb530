//! Attacks
//!
//! The expandable message and the long-message second preimage that uses it.

pub mod expandable;
pub mod second_preimage;

pub use expandable::{build_expandable_message, ExpandableConfig, ExpandableMessage};
pub use second_preimage::{
    find_bridge, forge, second_preimage, second_preimage_with, AttackConfig, Bridge,
    SecondPreimage,
};
