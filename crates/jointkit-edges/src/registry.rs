//! Edge registry owned by a render session.
//!
//! Maps one-character tags to edge generators so walls can be described
//! compactly, e.g. `"FfeF"` for a rectangular wall.

use crate::cabinet_hinge::CabinetHingeSettings;
use crate::chest_hinge::ChestHingeSettings;
use crate::click::ClickSettings;
use crate::dovetail::DoveTailSettings;
use crate::edge::EdgeRef;
use crate::finger::{FingerHoles, FingerJointSettings};
use crate::flex::FlexSettings;
use crate::grip::GripSettings;
use crate::hinge::HingeSettings;
use crate::lid::LidSettings;
use crate::rack::GearSettings;
use crate::stackable::StackableSettings;
use crate::straight::StraightEdge;
use jointkit_core::{
    ConfigError, FamilyOverrides, FamilySettings, JointContext, Result, SettingsSchema,
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// A joint family that can build its edges.
pub trait EdgeFamily: Send + Sync {
    /// Builds the family's edges without registering them.
    fn edge_objects(
        self: &Arc<Self>,
        ctx: &JointContext,
        registry: &EdgeRegistry,
    ) -> Result<Vec<EdgeRef>>;

    /// Hole rows matching this family's joint, if it has any.
    fn finger_holes(self: &Arc<Self>, _ctx: &JointContext) -> Option<Arc<FingerHoles>> {
        None
    }
}

/// Families known to [`EdgeRegistry::standard`].
pub const FAMILY_NAMES: &[&str] = &[
    "Grip",
    "FingerJoint",
    "Stackable",
    "Hinge",
    "ChestHinge",
    "CabinetHinge",
    "Lid",
    "Click",
    "DoveTail",
    "Flex",
    "Gear",
];

/// Parameter schemas of the families in [`FAMILY_NAMES`], in the same order.
pub fn family_schemas() -> [&'static SettingsSchema; 11] {
    [
        GripSettings::schema(),
        FingerJointSettings::schema(),
        StackableSettings::schema(),
        HingeSettings::schema(),
        ChestHingeSettings::schema(),
        CabinetHingeSettings::schema(),
        LidSettings::schema(),
        ClickSettings::schema(),
        DoveTailSettings::schema(),
        FlexSettings::schema(),
        GearSettings::schema(),
    ]
}

/// Schema of the family called `name`.
pub fn family_schema(name: &str) -> Option<&'static SettingsSchema> {
    family_schemas().into_iter().find(|schema| schema.family == name)
}

#[derive(Clone, Default)]
pub struct EdgeRegistry {
    edges: BTreeMap<char, EdgeRef>,
    finger_holes: Option<Arc<FingerHoles>>,
}

impl fmt::Debug for EdgeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeRegistry")
            .field("tags", &self.edges.keys().collect::<String>())
            .field("finger_holes", &self.finger_holes.is_some())
            .finish()
    }
}

impl EdgeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with straight edges and every family that needs no extra
    /// dimensions, built from `overrides`.
    pub fn standard(ctx: &JointContext, overrides: &FamilyOverrides) -> Result<Self> {
        if let Some(unknown) = overrides
            .families
            .keys()
            .find(|name| !FAMILY_NAMES.contains(&name.as_str()))
        {
            return Err(ConfigError::UnknownFamily(unknown.clone()).into());
        }

        let mut registry = Self::new();
        registry.insert('e', Arc::new(StraightEdge::new(ctx)));
        registry.insert('E', Arc::new(StraightEdge::outset(ctx)));

        registry.add_standard::<GripSettings>(ctx, overrides)?;
        registry.add_standard::<FingerJointSettings>(ctx, overrides)?;
        registry.add_standard::<StackableSettings>(ctx, overrides)?;
        registry.add_standard::<HingeSettings>(ctx, overrides)?;
        registry.add_standard::<ChestHingeSettings>(ctx, overrides)?;
        registry.add_standard::<CabinetHingeSettings>(ctx, overrides)?;
        registry.add_standard::<LidSettings>(ctx, overrides)?;
        registry.add_standard::<ClickSettings>(ctx, overrides)?;
        registry.add_standard::<DoveTailSettings>(ctx, overrides)?;
        registry.add_standard::<GearSettings>(ctx, overrides)?;

        // flex edges need a height; only validate the overrides here
        FlexSettings::new(
            ctx.thickness,
            overrides.relative,
            &overrides.family(FlexSettings::schema().family),
        )?;

        info!(tags = %registry.tags().collect::<String>(), "edge registry ready");
        Ok(registry)
    }

    fn add_standard<F: FamilySettings + EdgeFamily>(
        &mut self,
        ctx: &JointContext,
        overrides: &FamilyOverrides,
    ) -> Result<()> {
        let family = F::schema().family;
        let settings = Arc::new(F::new(
            ctx.thickness,
            overrides.relative,
            &overrides.family(family),
        )?);
        self.add_family(&settings, ctx, None)?;
        Ok(())
    }

    /// Builds a family's edges and registers them. The n-th edge is stored
    /// under the n-th char of `chars`; edges past its end keep their tag.
    pub fn add_family<F: EdgeFamily>(
        &mut self,
        family: &Arc<F>,
        ctx: &JointContext,
        chars: Option<&str>,
    ) -> Result<Vec<EdgeRef>> {
        let edges = family.edge_objects(ctx, self)?;
        let mut chars = chars.map(|c| c.chars()).into_iter().flatten();
        for edge in &edges {
            let tag = chars.next().or_else(|| edge.tag());
            if let Some(tag) = tag {
                debug!(tag = %tag, edge = edge.description(), "registering edge");
                self.insert(tag, Arc::clone(edge));
            }
        }
        if self.finger_holes.is_none() {
            self.finger_holes = family.finger_holes(ctx);
        }
        Ok(edges)
    }

    pub fn insert(&mut self, tag: char, edge: EdgeRef) -> Option<EdgeRef> {
        self.edges.insert(tag, edge)
    }

    pub fn get(&self, tag: char) -> Option<EdgeRef> {
        self.edges.get(&tag).cloned()
    }

    pub fn contains(&self, tag: char) -> bool {
        self.edges.contains_key(&tag)
    }

    pub fn resolve(&self, tag: char) -> Result<EdgeRef> {
        self.get(tag)
            .ok_or_else(|| ConfigError::UnknownEdge(tag).into())
    }

    /// Resolves every char of `tags` in order.
    pub fn resolve_all(&self, tags: &str) -> Result<Vec<EdgeRef>> {
        tags.chars().map(|tag| self.resolve(tag)).collect()
    }

    /// Hole rows of the first registered finger joint family.
    pub fn finger_holes(&self) -> Option<Arc<FingerHoles>> {
        self.finger_holes.clone()
    }

    pub fn set_finger_holes(&mut self, holes: Arc<FingerHoles>) {
        self.finger_holes = Some(holes);
    }

    pub fn tags(&self) -> impl Iterator<Item = char> + '_ {
        self.edges.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schemas_follow_family_names() {
        let names: Vec<&str> = family_schemas().iter().map(|s| s.family).collect();
        assert_eq!(names, FAMILY_NAMES);
        assert!(family_schema("Hinge").is_some());
        assert!(family_schema("Hinges").is_none());
    }
}
