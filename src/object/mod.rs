//! AES70 Object Classes and Property Management
//!
//! This module defines the AES70 (OCA) object classes supported by the
//! codec and the properties each class exposes. AES70 models a controllable
//! device as a tree of objects - workers, actuators, sensors, agents - whose
//! classes form a strict single-inheritance hierarchy rooted at `OcaRoot`.
//!
//! # Overview
//!
//! Each class is identified by a [`ClassId`] and contributes zero or more
//! properties on top of the ones inherited from its parent. A property is
//! addressed on the wire by the pair (definition level, property index),
//! where the definition level is the depth of the *defining* class in the
//! hierarchy. `OcaRoot` sits at level 1, and the same property index can
//! recur at different levels without ambiguity.
//!
//! The hierarchy is fixed by the standard and known at compile time, so
//! classes are modeled as a closed enum with static parent links rather
//! than open subclassing. The one escape hatch is the *custom* instance,
//! which carries a single user-authored property for talking to
//! proprietary, undocumented device classes.
//!
//! # Example
//!
//! ```
//! use ocp1_rs::object::{ClassId, OcaInstance};
//!
//! let gain = OcaInstance::standard(ClassId::Gain);
//! assert_eq!(gain.definition_level(), 4);
//!
//! // Properties inherited from OcaRoot and OcaWorker come first.
//! let props = gain.properties();
//! assert_eq!(props.first().unwrap().name, "Role");
//! assert_eq!(props.last().unwrap().name, "Gain");
//! ```

#[cfg(feature = "std")]
use std::error::Error;

#[cfg(feature = "std")]
use std::fmt;

#[cfg(not(feature = "std"))]
use core::fmt;

#[cfg(not(feature = "std"))]
use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};

use crate::encoding::DataType;

pub mod hierarchy;

pub use hierarchy::ClassId;

/// Result type for object operations
#[cfg(feature = "std")]
pub type Result<T> = std::result::Result<T, ObjectError>;

#[cfg(not(feature = "std"))]
pub type Result<T> = core::result::Result<T, ObjectError>;

/// Errors that can occur with object operations
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectError {
    /// Numeric class index with no registered class definition
    UnknownClass(u8),
    /// Get/Set requested on a property lacking that accessor
    InvalidPropertyAccess {
        property: String,
        kind: CommandKind,
    },
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectError::UnknownClass(idx) => write!(f, "Unknown class index: {}", idx),
            ObjectError::InvalidPropertyAccess { property, kind } => {
                write!(f, "Property '{}' has no {} method", property, kind)
            }
        }
    }
}

#[cfg(feature = "std")]
impl Error for ObjectError {}

/// The command kinds a caller can request for a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandKind {
    Get,
    Set,
    AddSubscription,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::Get => write!(f, "Get"),
            CommandKind::Set => write!(f, "Set"),
            CommandKind::AddSubscription => write!(f, "AddSubscription"),
        }
    }
}

/// One AES70 property as defined by its class.
///
/// A method index of 0 means the property has no getter/setter
/// respectively.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyDescriptor {
    /// Level of the defining class in the hierarchy (OcaRoot = 1)
    pub definition_level: u16,
    /// Property index, unique within its definition level
    pub property_index: u16,
    /// Wire data type of the property value
    pub data_type: DataType,
    /// Display name
    pub name: String,
    /// Method index of the getter, 0 if none
    pub get_method_index: u16,
    /// Method index of the setter, 0 if none
    pub set_method_index: u16,
}

impl PropertyDescriptor {
    pub fn new(
        definition_level: u16,
        property_index: u16,
        data_type: DataType,
        name: &str,
        get_method_index: u16,
        set_method_index: u16,
    ) -> Self {
        Self {
            definition_level,
            property_index,
            data_type,
            name: name.to_string(),
            get_method_index,
            set_method_index,
        }
    }

    pub fn has_getter(&self) -> bool {
        self.get_method_index != 0
    }

    pub fn has_setter(&self) -> bool {
        self.set_method_index != 0
    }

    /// Method index for reading this property.
    pub fn getter_index(&self) -> Result<u16> {
        if self.has_getter() {
            Ok(self.get_method_index)
        } else {
            Err(ObjectError::InvalidPropertyAccess {
                property: self.name.clone(),
                kind: CommandKind::Get,
            })
        }
    }

    /// Method index for writing this property.
    pub fn setter_index(&self) -> Result<u16> {
        if self.has_setter() {
            Ok(self.set_method_index)
        } else {
            Err(ObjectError::InvalidPropertyAccess {
                property: self.name.clone(),
                kind: CommandKind::Set,
            })
        }
    }
}

/// A user-authored stand-in for a proprietary AES70 class.
///
/// Custom instances are not part of the standard hierarchy; they exist so
/// that a tool can address devices whose classes are undocumented. The
/// instance holds exactly one property, initially a placeholder the caller
/// is expected to overwrite.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomInstance {
    property: PropertyDescriptor,
}

impl CustomInstance {
    pub fn new() -> Self {
        Self {
            property: PropertyDescriptor::new(1, 1, DataType::Boolean, "Custom", 1, 2),
        }
    }

    pub fn property(&self) -> &PropertyDescriptor {
        &self.property
    }

    /// Replace the user-authored property definition.
    pub fn set_property(&mut self, property: PropertyDescriptor) {
        log::debug!(
            "custom property set to level {} index {} ({})",
            property.definition_level,
            property.property_index,
            property.data_type
        );
        self.property = property;
    }
}

impl Default for CustomInstance {
    fn default() -> Self {
        Self::new()
    }
}

/// A runtime instance of an AES70 object class.
///
/// Standard instances derive their property list from the class hierarchy;
/// custom instances carry a single user-authored property.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OcaInstance {
    Standard(ClassId),
    Custom(CustomInstance),
}

impl OcaInstance {
    /// Create an instance of a standard AES70 class.
    pub fn standard(class_id: ClassId) -> Self {
        OcaInstance::Standard(class_id)
    }

    /// Create a custom instance with the placeholder property.
    pub fn custom() -> Self {
        OcaInstance::Custom(CustomInstance::new())
    }

    /// Create an instance from a raw numeric class index, as selected in a
    /// class list. Unknown indices are a recoverable error.
    pub fn from_class_index(index: u8) -> Result<Self> {
        Ok(OcaInstance::Standard(ClassId::try_from(index)?))
    }

    /// The class behind this instance, `None` for custom instances.
    pub fn class_id(&self) -> Option<ClassId> {
        match self {
            OcaInstance::Standard(class_id) => Some(*class_id),
            OcaInstance::Custom(_) => None,
        }
    }

    /// Definition level of the instance's class.
    ///
    /// For custom instances this is the level the user typed into the
    /// property definition.
    pub fn definition_level(&self) -> u16 {
        match self {
            OcaInstance::Standard(class_id) => class_id.definition_level(),
            OcaInstance::Custom(custom) => custom.property.definition_level,
        }
    }

    /// All properties of the instance's class, ancestors first.
    ///
    /// The returned order is deterministic: the parent's full list is
    /// always a prefix, with properties introduced at deeper levels
    /// appended after it. Custom instances return exactly their single
    /// user-authored property.
    pub fn properties(&self) -> Vec<PropertyDescriptor> {
        match self {
            OcaInstance::Standard(class_id) => class_id.properties(),
            OcaInstance::Custom(custom) => vec![custom.property.clone()],
        }
    }

    /// Mutable access to the custom variant, `None` for standard classes.
    pub fn as_custom_mut(&mut self) -> Option<&mut CustomInstance> {
        match self {
            OcaInstance::Standard(_) => None,
            OcaInstance::Custom(custom) => Some(custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_instance_gain() {
        let instance = OcaInstance::standard(ClassId::Gain);
        assert_eq!(instance.class_id(), Some(ClassId::Gain));
        assert_eq!(instance.definition_level(), 4);

        let props = instance.properties();
        let gain = props.last().unwrap();
        assert_eq!(gain.name, "Gain");
        assert_eq!(gain.data_type, DataType::Float32);
        assert_eq!(gain.definition_level, 4);
        assert_eq!(gain.property_index, 1);
        assert_eq!(gain.get_method_index, 1);
        assert_eq!(gain.set_method_index, 2);
    }

    #[test]
    fn test_from_class_index() {
        let instance = OcaInstance::from_class_index(ClassId::Mute as u8).unwrap();
        assert_eq!(instance.class_id(), Some(ClassId::Mute));

        assert_eq!(
            OcaInstance::from_class_index(0),
            Err(ObjectError::UnknownClass(0))
        );
        assert_eq!(
            OcaInstance::from_class_index(200),
            Err(ObjectError::UnknownClass(200))
        );
    }

    #[test]
    fn test_custom_instance_starts_with_placeholder() {
        let instance = OcaInstance::custom();
        let props = instance.properties();
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].name, "Custom");
    }

    #[test]
    fn test_custom_instance_overwrite() {
        let mut instance = OcaInstance::custom();
        let authored = PropertyDescriptor::new(7, 3, DataType::Float32, "VendorTrim", 1, 2);
        instance
            .as_custom_mut()
            .unwrap()
            .set_property(authored.clone());

        assert_eq!(instance.properties(), vec![authored]);
        assert_eq!(instance.definition_level(), 7);
        assert_eq!(instance.class_id(), None);
    }

    #[test]
    fn test_standard_instance_is_not_customizable() {
        let mut instance = OcaInstance::standard(ClassId::Mute);
        assert!(instance.as_custom_mut().is_none());
    }

    #[test]
    fn test_accessor_checks() {
        // OcaRoot's Role property is read-only.
        let props = OcaInstance::standard(ClassId::Root).properties();
        let role = &props[0];
        assert_eq!(role.getter_index().unwrap(), 5);
        assert_eq!(
            role.setter_index(),
            Err(ObjectError::InvalidPropertyAccess {
                property: "Role".to_string(),
                kind: CommandKind::Set,
            })
        );
    }
}
