//! # JointKit Edges
//!
//! Edge generators for laser cut parts and the code that assembles them
//! into closed outlines.
//!
//! ## Joint Families
//!
//! - **Straight**: plain and outset edges with optional bed bolts
//! - **Finger Joint**: both halves plus matching hole rows
//! - **Hinges**: pin and eye hinges, chest hinges and cabinet hinges
//! - **Dovetail**, **Click**, **Stackable**, **Lid**, **Grip**, **Flex** and **Rack**
//!
//! ## Assembly
//!
//! - **Registry**: session-owned map from one-character tags to edges
//! - **Compound / Slotted**: edges made of other edges
//! - **Contour**: polygon walls with rounded corners and matching flex panels
//! - **Layout**: placing parts on the sheet

pub mod cabinet_hinge;
pub mod chest_hinge;
pub mod click;
pub mod compound;
pub mod contour;
pub mod corner;
pub mod dovetail;
pub mod edge;
pub mod finger;
pub mod flex;
pub mod grip;
pub mod hinge;
pub mod layout;
pub mod lid;
pub mod rack;
pub mod registry;
pub mod slotted;
pub mod stackable;
pub mod straight;

// Re-export commonly used items
pub use cabinet_hinge::{CabinetHingeEdge, CabinetHingeSettings};
pub use chest_hinge::{
    ChestHinge, ChestHingeFront, ChestHingePin, ChestHingeSettings, ChestHingeTop, HingeEnd,
};
pub use click::{ClickConnector, ClickEdge, ClickSettings};
pub use compound::CompoundEdge;
pub use contour::{
    panel_flex_wall, plan_contour, polygon_wall, rectangular_wall, signed_turn_angle,
    ContourPlan, ContourSide, FlexPanel,
};
pub use corner::{edge_corner, width_jog};
pub use dovetail::{DoveTailJoint, DoveTailSettings};
pub use edge::{Edge, EdgeRef, Polarity};
pub use finger::{
    CrossingFingerHoleEdge, FingerHoleEdge, FingerHoles, FingerJointEdge, FingerJointSettings,
    FingerLayout,
};
pub use flex::{FlexEdge, FlexPattern, FlexSettings};
pub use grip::{GripSettings, GripStyle, GrippingEdge};
pub use hinge::{HingeEye, HingeLayout, HingePin, HingeSettings, HingeStyle};
pub use layout::{PartExtent, PartLayout};
pub use lid::{LidEdge, LidSettings, LidSide, LidSideEdge, Spring};
pub use rack::{GearSettings, RackEdge, RackProfile, StraightFlankRack};
pub use registry::{family_schema, family_schemas, EdgeFamily, EdgeRegistry, FAMILY_NAMES};
pub use slotted::{Slot, SlottedEdge};
pub use stackable::{StackableEdge, StackablePosition, StackableSettings};
pub use straight::{bed_bolt_hole, StraightEdge};
