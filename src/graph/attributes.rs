//! Edge attributes and attribute sets.
//!
//! attributes.bin stores one u64 bitmask per distinct attribute set; edges
//! reference a set by index. Bit b of a mask means attribute b (in ordinal
//! order below) is present on the edge.

use std::fmt;

/// The fixed enumeration of road/surface/traffic properties an edge can
/// carry. Ordinals are part of the binary format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Attribute {
    // highway=*
    HighwayService,
    HighwayTrack,
    HighwayResidential,
    HighwayFootway,
    HighwayPath,
    HighwayUnclassified,
    HighwayTertiary,
    HighwaySecondary,
    HighwaySteps,
    HighwayPrimary,
    HighwayCycleway,
    HighwayMotorway,
    HighwayPedestrian,
    HighwayTrunk,
    HighwayLivingStreet,
    HighwayRoad,
    // tracktype=*
    TracktypeGrade1,
    TracktypeGrade2,
    TracktypeGrade3,
    TracktypeGrade4,
    TracktypeGrade5,
    // surface=*
    SurfaceAsphalt,
    SurfaceUnpaved,
    SurfaceGravel,
    SurfacePaved,
    SurfaceGround,
    SurfaceConcrete,
    SurfaceCompacted,
    SurfacePavingStones,
    SurfaceGrass,
    SurfaceDirt,
    SurfaceFineGravel,
    SurfacePebblestone,
    SurfaceWood,
    SurfaceSand,
    SurfaceCobblestone,
    // oneway=*
    OnewayYes,
    OnewayMinus1,
    OnewayBicycleYes,
    OnewayBicycleNo,
    // vehicle=*
    VehicleNo,
    VehiclePrivate,
    // access=*
    AccessYes,
    AccessNo,
    AccessPrivate,
    AccessPermissive,
    // bicycle=*
    BicycleYes,
    BicycleNo,
    BicycleDesignated,
    BicycleDismount,
    BicycleUseSidepath,
    BicyclePermissive,
    BicyclePrivate,
    // cycle route networks
    IcnYes,
    NcnYes,
    RcnYes,
    LcnYes,
}

impl Attribute {
    /// Number of attributes; bits at or above this index are invalid in a
    /// set mask.
    pub const COUNT: u32 = Self::ALL.len() as u32;

    /// All attributes in ordinal order.
    pub const ALL: [Attribute; 57] = [
        Attribute::HighwayService,
        Attribute::HighwayTrack,
        Attribute::HighwayResidential,
        Attribute::HighwayFootway,
        Attribute::HighwayPath,
        Attribute::HighwayUnclassified,
        Attribute::HighwayTertiary,
        Attribute::HighwaySecondary,
        Attribute::HighwaySteps,
        Attribute::HighwayPrimary,
        Attribute::HighwayCycleway,
        Attribute::HighwayMotorway,
        Attribute::HighwayPedestrian,
        Attribute::HighwayTrunk,
        Attribute::HighwayLivingStreet,
        Attribute::HighwayRoad,
        Attribute::TracktypeGrade1,
        Attribute::TracktypeGrade2,
        Attribute::TracktypeGrade3,
        Attribute::TracktypeGrade4,
        Attribute::TracktypeGrade5,
        Attribute::SurfaceAsphalt,
        Attribute::SurfaceUnpaved,
        Attribute::SurfaceGravel,
        Attribute::SurfacePaved,
        Attribute::SurfaceGround,
        Attribute::SurfaceConcrete,
        Attribute::SurfaceCompacted,
        Attribute::SurfacePavingStones,
        Attribute::SurfaceGrass,
        Attribute::SurfaceDirt,
        Attribute::SurfaceFineGravel,
        Attribute::SurfacePebblestone,
        Attribute::SurfaceWood,
        Attribute::SurfaceSand,
        Attribute::SurfaceCobblestone,
        Attribute::OnewayYes,
        Attribute::OnewayMinus1,
        Attribute::OnewayBicycleYes,
        Attribute::OnewayBicycleNo,
        Attribute::VehicleNo,
        Attribute::VehiclePrivate,
        Attribute::AccessYes,
        Attribute::AccessNo,
        Attribute::AccessPrivate,
        Attribute::AccessPermissive,
        Attribute::BicycleYes,
        Attribute::BicycleNo,
        Attribute::BicycleDesignated,
        Attribute::BicycleDismount,
        Attribute::BicycleUseSidepath,
        Attribute::BicyclePermissive,
        Attribute::BicyclePrivate,
        Attribute::IcnYes,
        Attribute::NcnYes,
        Attribute::RcnYes,
        Attribute::LcnYes,
    ];

    /// Position of the attribute's bit in a set mask.
    pub fn ordinal(self) -> u32 {
        self as u32
    }

    /// The `key=value` tag this attribute stands for.
    pub fn key_value(self) -> &'static str {
        match self {
            Attribute::HighwayService => "highway=service",
            Attribute::HighwayTrack => "highway=track",
            Attribute::HighwayResidential => "highway=residential",
            Attribute::HighwayFootway => "highway=footway",
            Attribute::HighwayPath => "highway=path",
            Attribute::HighwayUnclassified => "highway=unclassified",
            Attribute::HighwayTertiary => "highway=tertiary",
            Attribute::HighwaySecondary => "highway=secondary",
            Attribute::HighwaySteps => "highway=steps",
            Attribute::HighwayPrimary => "highway=primary",
            Attribute::HighwayCycleway => "highway=cycleway",
            Attribute::HighwayMotorway => "highway=motorway",
            Attribute::HighwayPedestrian => "highway=pedestrian",
            Attribute::HighwayTrunk => "highway=trunk",
            Attribute::HighwayLivingStreet => "highway=living_street",
            Attribute::HighwayRoad => "highway=road",
            Attribute::TracktypeGrade1 => "tracktype=grade1",
            Attribute::TracktypeGrade2 => "tracktype=grade2",
            Attribute::TracktypeGrade3 => "tracktype=grade3",
            Attribute::TracktypeGrade4 => "tracktype=grade4",
            Attribute::TracktypeGrade5 => "tracktype=grade5",
            Attribute::SurfaceAsphalt => "surface=asphalt",
            Attribute::SurfaceUnpaved => "surface=unpaved",
            Attribute::SurfaceGravel => "surface=gravel",
            Attribute::SurfacePaved => "surface=paved",
            Attribute::SurfaceGround => "surface=ground",
            Attribute::SurfaceConcrete => "surface=concrete",
            Attribute::SurfaceCompacted => "surface=compacted",
            Attribute::SurfacePavingStones => "surface=paving_stones",
            Attribute::SurfaceGrass => "surface=grass",
            Attribute::SurfaceDirt => "surface=dirt",
            Attribute::SurfaceFineGravel => "surface=fine_gravel",
            Attribute::SurfacePebblestone => "surface=pebblestone",
            Attribute::SurfaceWood => "surface=wood",
            Attribute::SurfaceSand => "surface=sand",
            Attribute::SurfaceCobblestone => "surface=cobblestone",
            Attribute::OnewayYes => "oneway=yes",
            Attribute::OnewayMinus1 => "oneway=-1",
            Attribute::OnewayBicycleYes => "oneway:bicycle=yes",
            Attribute::OnewayBicycleNo => "oneway:bicycle=no",
            Attribute::VehicleNo => "vehicle=no",
            Attribute::VehiclePrivate => "vehicle=private",
            Attribute::AccessYes => "access=yes",
            Attribute::AccessNo => "access=no",
            Attribute::AccessPrivate => "access=private",
            Attribute::AccessPermissive => "access=permissive",
            Attribute::BicycleYes => "bicycle=yes",
            Attribute::BicycleNo => "bicycle=no",
            Attribute::BicycleDesignated => "bicycle=designated",
            Attribute::BicycleDismount => "bicycle=dismount",
            Attribute::BicycleUseSidepath => "bicycle=use_sidepath",
            Attribute::BicyclePermissive => "bicycle=permissive",
            Attribute::BicyclePrivate => "bicycle=private",
            Attribute::IcnYes => "icn=yes",
            Attribute::NcnYes => "ncn=yes",
            Attribute::RcnYes => "rcn=yes",
            Attribute::LcnYes => "lcn=yes",
        }
    }
}

/// An immutable set of [`Attribute`]s, one bit per attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSet {
    bits: u64,
}

impl AttributeSet {
    /// Build a set from its raw bitmask.
    ///
    /// # Panics
    ///
    /// Panics if any bit at or above [`Attribute::COUNT`] is set.
    pub fn new(bits: u64) -> Self {
        assert!(
            bits >> Attribute::COUNT == 0,
            "attribute set has bits beyond the attribute count: {bits:#x}"
        );
        Self { bits }
    }

    /// The set containing exactly the given attributes.
    pub fn of(attributes: &[Attribute]) -> Self {
        let mut bits = 0u64;
        for attribute in attributes {
            bits |= 1u64 << attribute.ordinal();
        }
        Self { bits }
    }

    /// Raw bitmask of the set.
    pub fn bits(self) -> u64 {
        self.bits
    }

    /// Whether the set contains `attribute`.
    pub fn contains(self, attribute: Attribute) -> bool {
        self.bits & (1u64 << attribute.ordinal()) != 0
    }

    /// Whether the two sets share at least one attribute.
    pub fn intersects(self, that: AttributeSet) -> bool {
        self.bits & that.bits != 0
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for attribute in Attribute::ALL {
            if self.contains(attribute) {
                if !first {
                    write!(f, ",")?;
                }
                write!(f, "{}", attribute.key_value())?;
                first = false;
            }
        }
        write!(f, "}}")
    }
}
