//! The AES70 class hierarchy supported by this crate.
//!
//! The standard defines classes by a dotted numbering scheme rooted at
//! OcaRoot ("1"), e.g. OcaGain is "1.1.1.5": the fifth specialization of
//! OcaActuator ("1.1.1"). Parent links, class-ID paths, and per-class
//! property tables live in this one module so the forward (id to display
//! name) and reverse (display name to id) mappings cannot drift apart.

#[cfg(not(feature = "std"))]
use alloc::{format, string::String, vec, vec::Vec};

use crate::encoding::DataType;
use crate::object::{ObjectError, PropertyDescriptor, Result};

/// Identifier for one of the standard AES70 classes supported by the
/// codec.
///
/// The discriminant values are selection indices local to this crate; they
/// are not defined by AES70 and are unrelated to the class-ID paths (use
/// [`ClassId::class_id_path`] for those). User-defined proprietary classes
/// are deliberately not represented here - see
/// [`OcaInstance::custom`](crate::object::OcaInstance::custom).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ClassId {
    Root = 1,
    Worker = 2,
    Actuator = 3,
    BasicActuator = 4,
    Int32Actuator = 5,
    StringActuator = 6,
    Mute = 7,
    Switch = 8,
    Gain = 9,
    Delay = 10,
    Sensor = 11,
    BasicSensor = 12,
    BooleanSensor = 13,
    Int32Sensor = 14,
    Float32Sensor = 15,
    StringSensor = 16,
    LevelSensor = 17,
    AudioLevelSensor = 18,
    Agent = 19,
}

impl ClassId {
    /// All standard classes, in selection-list order.
    pub const ALL: [ClassId; 19] = [
        ClassId::Root,
        ClassId::Worker,
        ClassId::Actuator,
        ClassId::BasicActuator,
        ClassId::Int32Actuator,
        ClassId::StringActuator,
        ClassId::Mute,
        ClassId::Switch,
        ClassId::Gain,
        ClassId::Delay,
        ClassId::Sensor,
        ClassId::BasicSensor,
        ClassId::BooleanSensor,
        ClassId::Int32Sensor,
        ClassId::Float32Sensor,
        ClassId::StringSensor,
        ClassId::LevelSensor,
        ClassId::AudioLevelSensor,
        ClassId::Agent,
    ];

    /// Parent class, `None` only for OcaRoot.
    pub fn parent(&self) -> Option<ClassId> {
        match self {
            ClassId::Root => None,
            ClassId::Worker | ClassId::Agent => Some(ClassId::Root),
            ClassId::Actuator | ClassId::Sensor => Some(ClassId::Worker),
            ClassId::BasicActuator
            | ClassId::Mute
            | ClassId::Switch
            | ClassId::Gain
            | ClassId::Delay => Some(ClassId::Actuator),
            ClassId::Int32Actuator | ClassId::StringActuator => Some(ClassId::BasicActuator),
            ClassId::BasicSensor | ClassId::LevelSensor => Some(ClassId::Sensor),
            ClassId::BooleanSensor
            | ClassId::Int32Sensor
            | ClassId::Float32Sensor
            | ClassId::StringSensor => Some(ClassId::BasicSensor),
            ClassId::AudioLevelSensor => Some(ClassId::LevelSensor),
        }
    }

    /// AES70 class-ID path, e.g. `"1.1.1.5"` for OcaGain.
    pub fn class_id_path(&self) -> &'static str {
        match self {
            ClassId::Root => "1",
            ClassId::Worker => "1.1",
            ClassId::Actuator => "1.1.1",
            ClassId::BasicActuator => "1.1.1.1",
            ClassId::Int32Actuator => "1.1.1.1.4",
            ClassId::StringActuator => "1.1.1.1.12",
            ClassId::Mute => "1.1.1.2",
            ClassId::Switch => "1.1.1.4",
            ClassId::Gain => "1.1.1.5",
            ClassId::Delay => "1.1.1.7",
            ClassId::Sensor => "1.1.2",
            ClassId::BasicSensor => "1.1.2.1",
            ClassId::BooleanSensor => "1.1.2.1.1",
            ClassId::Int32Sensor => "1.1.2.1.4",
            ClassId::Float32Sensor => "1.1.2.1.10",
            ClassId::StringSensor => "1.1.2.1.12",
            ClassId::LevelSensor => "1.1.2.2",
            ClassId::AudioLevelSensor => "1.1.2.2.1",
            ClassId::Agent => "1.2",
        }
    }

    /// Class name as defined by AES70.
    pub fn name(&self) -> &'static str {
        match self {
            ClassId::Root => "OcaRoot",
            ClassId::Worker => "OcaWorker",
            ClassId::Actuator => "OcaActuator",
            ClassId::BasicActuator => "OcaBasicActuator",
            ClassId::Int32Actuator => "OcaInt32Actuator",
            ClassId::StringActuator => "OcaStringActuator",
            ClassId::Mute => "OcaMute",
            ClassId::Switch => "OcaSwitch",
            ClassId::Gain => "OcaGain",
            ClassId::Delay => "OcaDelay",
            ClassId::Sensor => "OcaSensor",
            ClassId::BasicSensor => "OcaBasicSensor",
            ClassId::BooleanSensor => "OcaBooleanSensor",
            ClassId::Int32Sensor => "OcaInt32Sensor",
            ClassId::Float32Sensor => "OcaFloat32Sensor",
            ClassId::StringSensor => "OcaStringSensor",
            ClassId::LevelSensor => "OcaLevelSensor",
            ClassId::AudioLevelSensor => "OcaAudioLevelSensor",
            ClassId::Agent => "OcaAgent",
        }
    }

    /// Display name used in selection lists: class-ID path and class name,
    /// e.g. `"1.1.1.5: OcaGain"`.
    pub fn display_name(&self) -> String {
        format!("{}: {}", self.class_id_path(), self.name())
    }

    /// Reverse lookup of [`display_name`](Self::display_name).
    ///
    /// `None` means "no such class" - a normal, checkable outcome for
    /// user-entered names, not an error.
    pub fn from_display_name(name: &str) -> Option<ClassId> {
        Self::ALL
            .iter()
            .copied()
            .find(|class_id| class_id.display_name() == name)
    }

    /// Depth of this class in the hierarchy, OcaRoot = 1.
    pub fn definition_level(&self) -> u16 {
        let mut level = 1;
        let mut current = *self;
        while let Some(parent) = current.parent() {
            level += 1;
            current = parent;
        }
        level
    }

    /// Full property list: every ancestor's properties from OcaRoot down,
    /// then the ones this class introduces.
    pub fn properties(&self) -> Vec<PropertyDescriptor> {
        self.lineage()
            .into_iter()
            .flat_map(|class_id| class_id.own_properties())
            .collect()
    }

    /// Ancestry chain, OcaRoot first, `self` last.
    fn lineage(&self) -> Vec<ClassId> {
        let mut chain = vec![*self];
        let mut current = *self;
        while let Some(parent) = current.parent() {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    /// Properties introduced by this class itself, excluding inherited
    /// ones. Property tuples follow AES70: (index, type, name, get, set),
    /// with method index 0 meaning "no such accessor".
    fn own_properties(&self) -> Vec<PropertyDescriptor> {
        let level = self.definition_level();
        match self {
            ClassId::Root => vec![PropertyDescriptor::new(
                level,
                5,
                DataType::String,
                "Role",
                5,
                0,
            )],
            ClassId::Worker => vec![PropertyDescriptor::new(
                level,
                1,
                DataType::Boolean,
                "Enabled",
                1,
                2,
            )],
            ClassId::Switch => vec![PropertyDescriptor::new(
                level,
                1,
                DataType::UInt16,
                "Position",
                1,
                2,
            )],
            ClassId::Mute => vec![PropertyDescriptor::new(
                level,
                1,
                DataType::UInt8,
                "Mute",
                1,
                2,
            )],
            ClassId::Gain => vec![PropertyDescriptor::new(
                level,
                1,
                DataType::Float32,
                "Gain",
                1,
                2,
            )],
            ClassId::Delay => vec![PropertyDescriptor::new(
                level,
                1,
                DataType::Float32,
                "DelayTime",
                1,
                2,
            )],
            ClassId::StringActuator => vec![
                PropertyDescriptor::new(level, 1, DataType::String, "Setting", 1, 2),
                PropertyDescriptor::new(level, 2, DataType::UInt16, "MaxLen", 3, 0),
            ],
            ClassId::Int32Actuator => vec![PropertyDescriptor::new(
                level,
                1,
                DataType::Int32,
                "Setting",
                1,
                2,
            )],
            ClassId::Sensor => vec![PropertyDescriptor::new(
                level,
                1,
                DataType::UInt8,
                "ReadingState",
                1,
                0,
            )],
            ClassId::BooleanSensor => vec![PropertyDescriptor::new(
                level,
                1,
                DataType::Boolean,
                "Reading",
                1,
                0,
            )],
            ClassId::Int32Sensor => vec![PropertyDescriptor::new(
                level,
                1,
                DataType::Int32,
                "Reading",
                1,
                0,
            )],
            ClassId::Float32Sensor => vec![PropertyDescriptor::new(
                level,
                1,
                DataType::Float32,
                "Reading",
                1,
                0,
            )],
            ClassId::StringSensor => vec![
                PropertyDescriptor::new(level, 1, DataType::String, "Reading", 1, 0),
                PropertyDescriptor::new(level, 2, DataType::UInt16, "MaxLen", 2, 3),
            ],
            ClassId::LevelSensor => vec![PropertyDescriptor::new(
                level,
                1,
                DataType::Float32,
                "Reading",
                1,
                0,
            )],
            ClassId::AudioLevelSensor => vec![PropertyDescriptor::new(
                level,
                1,
                DataType::UInt8,
                "Law",
                1,
                2,
            )],
            ClassId::Agent => vec![PropertyDescriptor::new(
                level,
                1,
                DataType::String,
                "Label",
                1,
                2,
            )],
            // Abstract intermediate classes contribute nothing of their own.
            ClassId::Actuator | ClassId::BasicActuator | ClassId::BasicSensor => Vec::new(),
        }
    }
}

impl From<ClassId> for u8 {
    fn from(value: ClassId) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for ClassId {
    type Error = ObjectError;

    fn try_from(value: u8) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|class_id| *class_id as u8 == value)
            .ok_or(ObjectError::UnknownClass(value))
    }
}

impl core::fmt::Display for ClassId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_completeness() {
        for class_id in ClassId::ALL {
            let level = class_id.definition_level();
            assert!(level >= 1);
            match class_id.parent() {
                Some(parent) => assert_eq!(level, parent.definition_level() + 1),
                None => assert_eq!(class_id, ClassId::Root),
            }
        }
    }

    #[test]
    fn test_known_definition_levels() {
        assert_eq!(ClassId::Root.definition_level(), 1);
        assert_eq!(ClassId::Worker.definition_level(), 2);
        assert_eq!(ClassId::Actuator.definition_level(), 3);
        assert_eq!(ClassId::Gain.definition_level(), 4);
        assert_eq!(ClassId::Int32Actuator.definition_level(), 5);
        assert_eq!(ClassId::AudioLevelSensor.definition_level(), 5);
        assert_eq!(ClassId::Agent.definition_level(), 2);
    }

    #[test]
    fn test_property_monotonicity() {
        for class_id in ClassId::ALL {
            let props = class_id.properties();

            // Definition levels never decrease along the list.
            for pair in props.windows(2) {
                assert!(pair[0].definition_level <= pair[1].definition_level);
            }

            // The parent's full list is always a prefix.
            if let Some(parent) = class_id.parent() {
                let parent_props = parent.properties();
                assert_eq!(props[..parent_props.len()], parent_props[..]);
            }
        }
    }

    #[test]
    fn test_property_index_unique_per_level() {
        for class_id in ClassId::ALL {
            let props = class_id.properties();
            for (i, a) in props.iter().enumerate() {
                for b in &props[i + 1..] {
                    assert!(
                        (a.definition_level, a.property_index)
                            != (b.definition_level, b.property_index),
                        "duplicate property coordinate in {}",
                        class_id
                    );
                }
            }
        }
    }

    #[test]
    fn test_display_name_round_trip() {
        for class_id in ClassId::ALL {
            assert_eq!(
                ClassId::from_display_name(&class_id.display_name()),
                Some(class_id)
            );
        }
        assert_eq!(ClassId::Gain.display_name(), "1.1.1.5: OcaGain");
    }

    #[test]
    fn test_from_display_name_not_found() {
        assert_eq!(ClassId::from_display_name("1.9: OcaNope"), None);
        assert_eq!(ClassId::from_display_name(""), None);
        // Name without the path prefix is not a display name.
        assert_eq!(ClassId::from_display_name("OcaGain"), None);
    }

    #[test]
    fn test_numeric_round_trip() {
        for class_id in ClassId::ALL {
            assert_eq!(ClassId::try_from(class_id as u8), Ok(class_id));
        }
        assert_eq!(ClassId::try_from(0), Err(ObjectError::UnknownClass(0)));
        assert_eq!(ClassId::try_from(20), Err(ObjectError::UnknownClass(20)));
    }

    #[test]
    fn test_string_sensor_contributes_two_properties() {
        let props = ClassId::StringSensor.properties();
        let own: Vec<_> = props
            .iter()
            .filter(|p| p.definition_level == 5)
            .collect();
        assert_eq!(own.len(), 2);
        assert_eq!(own[0].name, "Reading");
        assert_eq!(own[1].name, "MaxLen");
        assert_eq!(own[1].get_method_index, 2);
        assert_eq!(own[1].set_method_index, 3);
    }
}
